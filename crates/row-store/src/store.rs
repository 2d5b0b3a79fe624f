use async_trait::async_trait;

use crate::row::{CUSTOMERS, ORDERS, PRODUCTS};
use crate::{CustomerRow, OrderItemRow, OrderRecord, OrderRow, ProductRow, Result, StoreError};

/// CRUD primitives over the `customers` table.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts a customer row. Fails with `UniqueViolation` if the id exists.
    async fn insert_customer(&self, row: CustomerRow) -> Result<()>;

    /// Overwrites every column of the row with the same id.
    ///
    /// Returns the number of rows affected (0 when the id is unknown).
    async fn update_customer(&self, row: CustomerRow) -> Result<u64>;

    /// Looks up a customer by id.
    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRow>>;

    /// Returns every customer row in storage order.
    async fn find_all_customers(&self) -> Result<Vec<CustomerRow>>;

    /// Reject-on-empty variant of [`find_customer`](Self::find_customer).
    async fn find_customer_strict(&self, id: &str) -> Result<CustomerRow> {
        self.find_customer(id)
            .await?
            .ok_or_else(|| StoreError::empty(CUSTOMERS, id))
    }
}

/// CRUD primitives over the `products` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a product row. Fails with `UniqueViolation` if the id exists.
    async fn insert_product(&self, row: ProductRow) -> Result<()>;

    /// Overwrites name and price of the row with the same id.
    async fn update_product(&self, row: ProductRow) -> Result<u64>;

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>>;

    async fn find_all_products(&self) -> Result<Vec<ProductRow>>;

    /// Reject-on-empty variant of [`find_product`](Self::find_product).
    async fn find_product_strict(&self, id: &str) -> Result<ProductRow> {
        self.find_product(id)
            .await?
            .ok_or_else(|| StoreError::empty(PRODUCTS, id))
    }
}

/// CRUD primitives over the `orders` and `order_items` tables.
///
/// There is no merge primitive: callers that need to bring item rows in line
/// with an aggregate do so with `insert_item` and `delete_item`.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the order row and all of its item rows in one nested write.
    ///
    /// Either every row is written or none is. Fails with `UniqueViolation`
    /// if the order id or any item id already exists.
    async fn insert_order(&self, order: OrderRow, items: Vec<OrderItemRow>) -> Result<()>;

    /// Sets the stored total of an order. Returns the number of rows affected.
    async fn update_order_total(&self, order_id: &str, total: i64) -> Result<u64>;

    /// Looks up an order and its items.
    async fn find_order(&self, id: &str) -> Result<Option<OrderRecord>>;

    /// Returns every order with its items, in storage order.
    async fn find_all_orders(&self) -> Result<Vec<OrderRecord>>;

    /// Returns the item rows belonging to an order.
    async fn find_items_for_order(&self, order_id: &str) -> Result<Vec<OrderItemRow>>;

    /// Inserts a single item row.
    ///
    /// Fails with `ForeignKeyViolation` if `item.order_id` does not exist.
    async fn insert_item(&self, item: OrderItemRow) -> Result<()>;

    /// Deletes an item row by id. Returns the number of rows affected.
    async fn delete_item(&self, item_id: &str) -> Result<u64>;

    /// Reject-on-empty variant of [`find_order`](Self::find_order).
    async fn find_order_strict(&self, id: &str) -> Result<OrderRecord> {
        self.find_order(id)
            .await?
            .ok_or_else(|| StoreError::empty(ORDERS, id))
    }
}

/// A store backing every table.
pub trait RowStore: CustomerStore + ProductStore + OrderStore + Clone + 'static {}

impl<T> RowStore for T where T: CustomerStore + ProductStore + OrderStore + Clone + 'static {}
