//! Checkout: the order aggregate, its line items and persistence.

mod order;
mod order_item;
mod reconciliation;
mod repository;
mod service;

pub use order::Order;
pub use order_item::OrderItem;
pub use reconciliation::ItemReconciliation;
pub use repository::OrderRepository;
pub use service::OrderService;
