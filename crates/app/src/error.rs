//! Runner error type.

use domain::DomainError;
use row_store::StoreError;
use thiserror::Error;

/// Errors that end a checkout run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Could not connect to the database.
    #[error("Database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    /// Store setup failed, e.g. migrations.
    #[error("Store setup failed: {0}")]
    Store(#[from] StoreError),

    /// The checkout scenario failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
