//! Product catalog: entity, events and persistence.

mod entity;
mod events;
mod handlers;
mod repository;
mod service;

pub use entity::Product;
pub use events::ProductCreated;
pub use handlers::SendEmailWhenProductIsCreatedHandler;
pub use repository::ProductRepository;
pub use service::ProductService;
