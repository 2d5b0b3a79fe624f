use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::row::{CUSTOMERS, ORDER_ITEMS, ORDERS, PRODUCTS};
use crate::{
    CustomerRow, CustomerStore, OrderItemRow, OrderRecord, OrderRow, OrderStore, ProductRow,
    ProductStore, Result, StoreError,
};

/// PostgreSQL-backed row store implementation.
///
/// Rows come back in insertion order (the internal `seq` column).
#[derive(Clone)]
pub struct PostgresRowStore {
    pool: PgPool,
}

impl PostgresRowStore {
    /// Creates a new PostgreSQL row store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    fn row_to_customer(row: PgRow) -> Result<CustomerRow> {
        Ok(CustomerRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            zipcode: row.try_get("zipcode")?,
            city: row.try_get("city")?,
            active: row.try_get("active")?,
            reward_points: row.try_get("reward_points")?,
        })
    }

    fn row_to_product(row: PgRow) -> Result<ProductRow> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }

    fn row_to_order(row: &PgRow) -> Result<OrderRow> {
        Ok(OrderRow {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            total: row.try_get("total")?,
        })
    }

    fn row_to_item(row: PgRow) -> Result<OrderItemRow> {
        Ok(OrderItemRow {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            product_id: row.try_get("product_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
        })
    }
}

/// Translates constraint violations into store errors, leaving anything else
/// as a plain database error.
fn map_write_error(
    e: sqlx::Error,
    table: &'static str,
    id: &str,
    references: Option<(&'static str, &str)>,
) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation {
                table,
                id: id.to_string(),
            };
        }
        if db_err.is_foreign_key_violation()
            && let Some((references, parent_id)) = references
        {
            return StoreError::ForeignKeyViolation {
                table,
                references,
                id: parent_id.to_string(),
            };
        }
    }
    StoreError::Database(e)
}

const SELECT_ALL_ITEMS: &str =
    "SELECT id, order_id, product_id, name, price, quantity FROM order_items ORDER BY seq ASC";

const SELECT_ITEMS_FOR_ORDER: &str = r#"
    SELECT id, order_id, product_id, name, price, quantity
    FROM order_items
    WHERE order_id = $1
    ORDER BY seq ASC
"#;

#[async_trait]
impl CustomerStore for PostgresRowStore {
    async fn insert_customer(&self, row: CustomerRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, CUSTOMERS, &row.id, None))?;

        Ok(())
    }

    async fn update_customer(&self, row: CustomerRow) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRow>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_customer).transpose()
    }

    async fn find_all_customers(&self) -> Result<Vec<CustomerRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }
}

#[async_trait]
impl ProductStore for PostgresRowStore {
    async fn insert_product(&self, row: ProductRow) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, PRODUCTS, &row.id, None))?;

        Ok(())
    }

    async fn update_product(&self, row: ProductRow) -> Result<u64> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>> {
        let row: Option<PgRow> = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn find_all_products(&self) -> Result<Vec<ProductRow>> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}

#[async_trait]
impl OrderStore for PostgresRowStore {
    async fn insert_order(&self, order: OrderRow, items: Vec<OrderItemRow>) -> Result<()> {
        // The order and its items are written in one transaction
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(&order.id)
            .bind(&order.customer_id)
            .bind(order.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, ORDERS, &order.id, None))?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, name, price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&item.id)
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, ORDER_ITEMS, &item.id, Some((ORDERS, &order.id))))?;
        }

        tx.commit().await?;
        tracing::debug!(order_id = %order.id, items = items.len(), "order inserted");
        Ok(())
    }

    async fn update_order_total(&self, order_id: &str, total: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE orders SET total = $2 WHERE id = $1")
            .bind(order_id)
            .bind(total)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_order(&self, id: &str) -> Result<Option<OrderRecord>> {
        let row: Option<PgRow> =
            sqlx::query("SELECT id, customer_id, total FROM orders WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let order = Self::row_to_order(&row)?;
        let items = self.find_items_for_order(&order.id).await?;
        Ok(Some(OrderRecord { order, items }))
    }

    async fn find_all_orders(&self) -> Result<Vec<OrderRecord>> {
        let order_rows = sqlx::query("SELECT id, customer_id, total FROM orders ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;
        let item_rows = sqlx::query(SELECT_ALL_ITEMS)
            .fetch_all(&self.pool)
            .await?;

        let mut items_by_order: HashMap<String, Vec<OrderItemRow>> = HashMap::new();
        for row in item_rows {
            let item = Self::row_to_item(row)?;
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        order_rows
            .iter()
            .map(|row| {
                let order = Self::row_to_order(row)?;
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                Ok(OrderRecord { order, items })
            })
            .collect()
    }

    async fn find_items_for_order(&self, order_id: &str) -> Result<Vec<OrderItemRow>> {
        let rows = sqlx::query(SELECT_ITEMS_FOR_ORDER)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn insert_item(&self, item: OrderItemRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, name, price, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.order_id)
        .bind(&item.product_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, ORDER_ITEMS, &item.id, Some((ORDERS, &item.order_id))))?;

        Ok(())
    }

    async fn delete_item(&self, item_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
