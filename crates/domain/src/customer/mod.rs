//! Customer aggregate, its address value object, events and persistence.

mod address;
mod entity;
mod events;
mod handlers;
mod repository;
mod service;

pub use address::Address;
pub use entity::Customer;
pub use events::{CustomerAddressChanged, CustomerCreated};
pub use handlers::{AuditCustomerCreatedHandler, LogAddressChangedHandler, LogCustomerCreatedHandler};
pub use repository::CustomerRepository;
pub use service::CustomerService;
