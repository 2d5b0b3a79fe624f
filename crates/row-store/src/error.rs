use thiserror::Error;

/// Errors that can occur when interacting with the row store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with the same primary key already exists.
    #[error("Unique constraint violated: {table} row with id {id} already exists")]
    UniqueViolation { table: &'static str, id: String },

    /// A child row references a parent row that does not exist.
    #[error("Foreign key violated: {table} row references missing {references} {id}")]
    ForeignKeyViolation {
        table: &'static str,
        references: &'static str,
        id: String,
    },

    /// A strict lookup matched no row.
    #[error("No {table} row matched id {id}")]
    EmptyResult { table: &'static str, id: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub(crate) fn empty(table: &'static str, id: &str) -> Self {
        StoreError::EmptyResult {
            table,
            id: id.to_string(),
        }
    }

    /// Returns true if this error is a strict lookup that matched nothing.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, StoreError::EmptyResult { .. })
    }
}

/// Result type for row store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
