use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::row::{CUSTOMERS, ORDER_ITEMS, ORDERS, PRODUCTS};
use crate::{
    CustomerRow, CustomerStore, OrderItemRow, OrderRecord, OrderRow, OrderStore, ProductRow,
    ProductStore, Result, StoreError,
};

/// In-memory row store implementation for testing.
///
/// Tables are kept as vectors so rows come back in insertion order, which is
/// the "storage default" ordering callers observe. Primary-key uniqueness and
/// the `order_items.order_id` foreign key are enforced like the PostgreSQL
/// schema does.
///
/// Locks are always taken `orders` before `order_items`.
#[derive(Clone, Default)]
pub struct InMemoryRowStore {
    customers: Arc<RwLock<Vec<CustomerRow>>>,
    products: Arc<RwLock<Vec<ProductRow>>>,
    orders: Arc<RwLock<Vec<OrderRow>>>,
    order_items: Arc<RwLock<Vec<OrderItemRow>>>,
}

impl InMemoryRowStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of item rows stored, across all orders.
    pub async fn item_count(&self) -> usize {
        self.order_items.read().await.len()
    }

    /// Clears every table.
    pub async fn clear(&self) {
        self.customers.write().await.clear();
        self.products.write().await.clear();
        self.orders.write().await.clear();
        self.order_items.write().await.clear();
    }
}

fn unique_violation(table: &'static str, id: &str) -> StoreError {
    StoreError::UniqueViolation {
        table,
        id: id.to_string(),
    }
}

fn items_of(items: &[OrderItemRow], order_id: &str) -> Vec<OrderItemRow> {
    items
        .iter()
        .filter(|item| item.order_id == order_id)
        .cloned()
        .collect()
}

#[async_trait]
impl CustomerStore for InMemoryRowStore {
    async fn insert_customer(&self, row: CustomerRow) -> Result<()> {
        let mut customers = self.customers.write().await;
        if customers.iter().any(|c| c.id == row.id) {
            return Err(unique_violation(CUSTOMERS, &row.id));
        }
        customers.push(row);
        Ok(())
    }

    async fn update_customer(&self, row: CustomerRow) -> Result<u64> {
        let mut customers = self.customers.write().await;
        match customers.iter_mut().find(|c| c.id == row.id) {
            Some(existing) => {
                *existing = row;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRow>> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all_customers(&self) -> Result<Vec<CustomerRow>> {
        Ok(self.customers.read().await.clone())
    }
}

#[async_trait]
impl ProductStore for InMemoryRowStore {
    async fn insert_product(&self, row: ProductRow) -> Result<()> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == row.id) {
            return Err(unique_violation(PRODUCTS, &row.id));
        }
        products.push(row);
        Ok(())
    }

    async fn update_product(&self, row: ProductRow) -> Result<u64> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == row.id) {
            Some(existing) => {
                existing.name = row.name;
                existing.price = row.price;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all_products(&self) -> Result<Vec<ProductRow>> {
        Ok(self.products.read().await.clone())
    }
}

#[async_trait]
impl OrderStore for InMemoryRowStore {
    async fn insert_order(&self, order: OrderRow, items: Vec<OrderItemRow>) -> Result<()> {
        let mut orders = self.orders.write().await;
        let mut stored_items = self.order_items.write().await;

        // Check every constraint before writing anything
        if orders.iter().any(|o| o.id == order.id) {
            return Err(unique_violation(ORDERS, &order.id));
        }
        for (index, item) in items.iter().enumerate() {
            let duplicate_in_batch = items[..index].iter().any(|other| other.id == item.id);
            if duplicate_in_batch || stored_items.iter().any(|stored| stored.id == item.id) {
                return Err(unique_violation(ORDER_ITEMS, &item.id));
            }
        }

        // Nested write: child rows are tagged with the parent id
        let order_id = order.id.clone();
        orders.push(order);
        stored_items.extend(items.into_iter().map(|item| OrderItemRow {
            order_id: order_id.clone(),
            ..item
        }));

        Ok(())
    }

    async fn update_order_total(&self, order_id: &str, total: i64) -> Result<u64> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.total = total;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_order(&self, id: &str) -> Result<Option<OrderRecord>> {
        let orders = self.orders.read().await;
        let items = self.order_items.read().await;

        Ok(orders.iter().find(|o| o.id == id).map(|order| OrderRecord {
            order: order.clone(),
            items: items_of(&items, id),
        }))
    }

    async fn find_all_orders(&self) -> Result<Vec<OrderRecord>> {
        let orders = self.orders.read().await;
        let items = self.order_items.read().await;

        Ok(orders
            .iter()
            .map(|order| OrderRecord {
                order: order.clone(),
                items: items_of(&items, &order.id),
            })
            .collect())
    }

    async fn find_items_for_order(&self, order_id: &str) -> Result<Vec<OrderItemRow>> {
        let items = self.order_items.read().await;
        Ok(items_of(&items, order_id))
    }

    async fn insert_item(&self, item: OrderItemRow) -> Result<()> {
        let orders = self.orders.read().await;
        let mut items = self.order_items.write().await;

        if !orders.iter().any(|o| o.id == item.order_id) {
            return Err(StoreError::ForeignKeyViolation {
                table: ORDER_ITEMS,
                references: ORDERS,
                id: item.order_id,
            });
        }
        if items.iter().any(|stored| stored.id == item.id) {
            return Err(unique_violation(ORDER_ITEMS, &item.id));
        }

        items.push(item);
        Ok(())
    }

    async fn delete_item(&self, item_id: &str) -> Result<u64> {
        let mut items = self.order_items.write().await;
        let before = items.len();
        items.retain(|item| item.id != item_id);
        Ok((before - items.len()) as u64)
    }
}
