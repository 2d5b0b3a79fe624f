//! Domain layer for the checkout sample.
//!
//! This crate provides:
//! - entities that validate their invariants at construction
//!   (Customer, Address, Product, Order, OrderItem)
//! - domain events and a synchronous dispatcher keyed by event-type name
//! - repositories translating aggregates to and from `row-store` rows
//! - small domain services (placing orders, repricing products)

pub mod checkout;
pub mod customer;
pub mod error;
pub mod event;
pub mod money;
pub mod product;
pub mod repository;

pub use checkout::{ItemReconciliation, Order, OrderItem, OrderRepository, OrderService};
pub use customer::{
    Address, AuditCustomerCreatedHandler, Customer, CustomerAddressChanged, CustomerCreated,
    CustomerRepository, CustomerService, LogAddressChangedHandler, LogCustomerCreatedHandler,
};
pub use error::{DomainError, RepositoryError, ValidationError};
pub use event::{DomainEvent, EventDispatcher, EventError, EventHandler};
pub use money::Money;
pub use product::{
    Product, ProductCreated, ProductRepository, ProductService,
    SendEmailWhenProductIsCreatedHandler,
};
pub use repository::RepositoryInterface;
