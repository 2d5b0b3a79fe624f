//! Repository abstraction shared by every aggregate.

use async_trait::async_trait;

use crate::error::RepositoryError;

/// Persistence contract for an aggregate root.
#[async_trait]
pub trait RepositoryInterface<T: Send + Sync>: Send + Sync {
    /// Persists a new aggregate. Fails if the id already exists.
    async fn create(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Persists the current state of an existing aggregate.
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Loads an aggregate by id. Fails with `NotFound` when no row matches.
    async fn find(&self, id: &str) -> Result<T, RepositoryError>;

    /// Loads every aggregate, in storage order.
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
}
