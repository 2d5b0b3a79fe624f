//! Domain error types.

use row_store::StoreError;
use thiserror::Error;

use crate::event::EventError;

/// Invariant violations raised by entity constructors and mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Id is required")]
    IdRequired,

    #[error("Name is required")]
    NameRequired,

    #[error("CustomerId is required")]
    CustomerIdRequired,

    #[error("Items are required")]
    ItemsRequired,

    #[error("Quantity must be greater than zero")]
    QuantityMustBePositive,

    #[error("Address is mandatory to activate a customer")]
    AddressRequiredToActivate,

    #[error("Street is required")]
    StreetRequired,

    #[error("Number is required")]
    NumberRequired,

    #[error("Zip is required")]
    ZipRequired,

    #[error("City is required")]
    CityRequired,

    #[error("Item ids must be unique within an order")]
    DuplicateItemId,

    /// `price * quantity` does not fit in an `i64` of cents.
    #[error("Item total is out of range")]
    ItemTotalOutOfRange,

    /// The sum of the item totals does not fit in an `i64` of cents.
    #[error("Order total is out of range")]
    OrderTotalOutOfRange,

    /// Raised by `OrderService::place_order` for an empty basket.
    #[error("Order must have at least one item")]
    OrderMustHaveItems,
}

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched the requested id.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// The storage collaborator failed; propagated unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored row does not satisfy the entity invariants.
    #[error("Invalid stored row: {0}")]
    Validation(#[from] ValidationError),

    /// A stored column is out of range for the entity field.
    #[error("Invalid {entity} row {id}: {reason}")]
    InvalidRow {
        entity: &'static str,
        id: String,
        reason: String,
    },
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Errors that can occur in domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Event(#[from] EventError),
}

/// Checks that a required string field is not empty.
pub(crate) fn require(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error);
    }
    Ok(())
}
