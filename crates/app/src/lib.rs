//! Wiring for the checkout runner.
//!
//! Builds the event dispatcher with every shipped handler, picks a row store
//! from configuration and runs one checkout end to end: register and relocate
//! a customer, publish a small catalog, place an order, then edit it.

pub mod config;
pub mod error;

use std::sync::Arc;

use domain::{
    Address, AuditCustomerCreatedHandler, CustomerAddressChanged, CustomerCreated,
    CustomerService, DomainError, EventDispatcher, LogAddressChangedHandler,
    LogCustomerCreatedHandler, Money, OrderItem, OrderRepository, OrderService, Product,
    ProductCreated, ProductRepository, ProductService, RepositoryInterface,
    SendEmailWhenProductIsCreatedHandler, ValidationError,
};
use row_store::{InMemoryRowStore, PostgresRowStore, RowStore};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub use config::{Config, LogFormat};
pub use error::AppError;

/// Catalog markup applied before the catalog is published, in percent.
const CATALOG_MARKUP: i64 = 10;

/// Outcome of a checkout run, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub customer_id: String,
    pub order_id: String,
    pub item_count: usize,
    pub total: Money,
    pub reward_points: u32,
}

/// Creates a dispatcher with every shipped handler registered.
pub fn build_dispatcher() -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::new(LogCustomerCreatedHandler),
    );
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::new(AuditCustomerCreatedHandler),
    );
    dispatcher.register(
        CustomerAddressChanged::EVENT_TYPE,
        Arc::new(LogAddressChangedHandler),
    );
    dispatcher.register(
        ProductCreated::EVENT_TYPE,
        Arc::new(SendEmailWhenProductIsCreatedHandler),
    );
    dispatcher
}

fn line_item(product: &Product, quantity: i32) -> Result<OrderItem, ValidationError> {
    OrderItem::new(
        Uuid::new_v4().to_string(),
        product.name(),
        product.price(),
        product.id(),
        quantity,
    )
}

/// Runs one checkout against `store`, publishing through `dispatcher`.
///
/// Every id is a fresh UUID, so repeated runs against the same database do
/// not collide.
#[tracing::instrument(skip(store, dispatcher))]
pub async fn run_checkout<S: RowStore>(
    store: S,
    dispatcher: Arc<EventDispatcher>,
) -> Result<CheckoutSummary, DomainError> {
    let customers = CustomerService::new(store.clone(), Arc::clone(&dispatcher));
    let products = ProductRepository::new(store.clone());
    let orders = OrderRepository::new(store);

    let customer_id = Uuid::new_v4().to_string();
    customers.register(&customer_id, "Customer 1").await?;
    let address = Address::new("Street 1", 1, "13330-250", "São Paulo")?;
    let mut customer = customers.relocate(&customer_id, address).await?;
    customer.activate()?;

    let mut catalog = vec![
        Product::new(Uuid::new_v4().to_string(), "Product 1", Money::from_cents(1000))?,
        Product::new(Uuid::new_v4().to_string(), "Product 2", Money::from_cents(2500))?,
    ];
    ProductService::increase_price(&mut catalog, CATALOG_MARKUP);
    for product in &catalog {
        products.create(product).await?;
        dispatcher.notify(&ProductCreated::new(product))?;
    }

    let items = catalog
        .iter()
        .zip([2, 1])
        .map(|(product, quantity)| line_item(product, quantity))
        .collect::<Result<Vec<_>, _>>()?;
    let mut order = OrderService::place_order(&mut customer, items)?;
    orders.create(&order).await?;
    customers.repository().update(&customer).await?;
    tracing::info!(order_id = %order.id(), total = %order.total(), "order placed");

    // Keep the first line and replace the second with a larger quantity
    let mut edited: Vec<OrderItem> = order.items().iter().take(1).cloned().collect();
    if let Some(product) = catalog.last() {
        edited.push(line_item(product, 3)?);
    }
    order.change_items(edited)?;
    orders.update(&order).await?;

    let stored = orders.find(order.id()).await?;
    let customer = customers.repository().find(&customer_id).await?;
    Ok(CheckoutSummary {
        customer_id,
        order_id: stored.id().to_string(),
        item_count: stored.items().len(),
        total: stored.total(),
        reward_points: customer.reward_points(),
    })
}

/// Selects the store named by `config` and runs the checkout against it.
pub async fn run(config: &Config) -> Result<CheckoutSummary, AppError> {
    let dispatcher = Arc::new(build_dispatcher());

    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            let store = PostgresRowStore::new(pool);
            store.run_migrations().await?;
            tracing::info!("using postgres row store");
            Ok(run_checkout(store, dispatcher).await?)
        }
        None => {
            tracing::info!("using in-memory row store");
            Ok(run_checkout(InMemoryRowStore::new(), dispatcher).await?)
        }
    }
}
