//! Row-shaped persistence for the checkout domain.
//!
//! The store traits expose plain CRUD primitives over rows. They know nothing
//! about entity invariants; repositories in the `domain` crate translate
//! between rows and aggregates.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod row;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryRowStore;
pub use postgres::PostgresRowStore;
pub use row::{CustomerRow, OrderItemRow, OrderRecord, OrderRow, ProductRow};
pub use store::{CustomerStore, OrderStore, ProductStore, RowStore};
