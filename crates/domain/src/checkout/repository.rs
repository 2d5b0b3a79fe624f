use async_trait::async_trait;
use row_store::{OrderItemRow, OrderRecord, OrderRow, OrderStore, StoreError};

use crate::error::RepositoryError;
use crate::money::Money;
use crate::repository::RepositoryInterface;

use super::{ItemReconciliation, Order, OrderItem};

const ENTITY: &str = "Order";

/// Persists orders as an `orders` row plus one `order_items` row per item.
///
/// `update` brings the stored item rows in line with the order using only
/// insert-row and delete-row primitives (see [`ItemReconciliation`]). The
/// steps are not wrapped in a transaction; each is idempotent, so re-running
/// `update` after a partial failure converges.
#[derive(Debug, Clone)]
pub struct OrderRepository<S> {
    store: S,
}

impl<S: OrderStore> OrderRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn item_to_row(order_id: &str, item: &OrderItem) -> OrderItemRow {
        OrderItemRow {
            id: item.id().to_string(),
            order_id: order_id.to_string(),
            product_id: item.product_id().to_string(),
            name: item.name().to_string(),
            price: item.price().cents(),
            quantity: item.quantity(),
        }
    }

    fn item_rows(order: &Order) -> Vec<OrderItemRow> {
        order
            .items()
            .iter()
            .map(|item| Self::item_to_row(order.id(), item))
            .collect()
    }

    fn from_record(record: OrderRecord) -> Result<Order, RepositoryError> {
        let items = record
            .items
            .into_iter()
            .map(|row| {
                OrderItem::new(
                    row.id,
                    row.name,
                    Money::from_cents(row.price),
                    row.product_id,
                    row.quantity,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order::new(record.order.id, record.order.customer_id, items)?)
    }
}

#[async_trait]
impl<S: OrderStore> RepositoryInterface<Order> for OrderRepository<S> {
    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id()))]
    async fn create(&self, entity: &Order) -> Result<(), RepositoryError> {
        let order = OrderRow {
            id: entity.id().to_string(),
            customer_id: entity.customer_id().to_string(),
            total: entity.total().cents(),
        };

        self.store.insert_order(order, Self::item_rows(entity)).await?;
        metrics::counter!("order_items_inserted").increment(entity.items().len() as u64);
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id()))]
    async fn update(&self, entity: &Order) -> Result<(), RepositoryError> {
        let persisted = self.store.find_items_for_order(entity.id()).await?;
        let plan = ItemReconciliation::plan(Self::item_rows(entity), &persisted);

        if plan.is_noop() {
            tracing::debug!(unchanged = plan.unchanged.len(), "order items already in sync");
        } else {
            tracing::debug!(
                inserts = plan.to_insert.len(),
                deletes = plan.to_delete.len(),
                unchanged = plan.unchanged.len(),
                "reconciling order items"
            );
        }

        let inserted = plan.to_insert.len() as u64;
        for row in plan.to_insert {
            self.store.insert_item(row).await?;
        }
        metrics::counter!("order_items_inserted").increment(inserted);

        let mut deleted = 0;
        for item_id in &plan.to_delete {
            deleted += self.store.delete_item(item_id).await?;
        }
        metrics::counter!("order_items_deleted").increment(deleted);

        // The total follows the desired items whatever the diff did
        self.store
            .update_order_total(entity.id(), entity.total().cents())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Order, RepositoryError> {
        let record = self.store.find_order_strict(id).await.map_err(|e| match e {
            StoreError::EmptyResult { .. } => RepositoryError::not_found(ENTITY, id),
            other => other.into(),
        })?;
        Self::from_record(record)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let records = self.store.find_all_orders().await?;
        records.into_iter().map(Self::from_record).collect()
    }
}
