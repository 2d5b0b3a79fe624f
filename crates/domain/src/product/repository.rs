use async_trait::async_trait;
use row_store::{ProductRow, ProductStore, StoreError};

use crate::error::RepositoryError;
use crate::money::Money;
use crate::repository::RepositoryInterface;

use super::Product;

const ENTITY: &str = "Product";

/// Persists products as rows of the `products` table.
#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: ProductStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn to_row(product: &Product) -> ProductRow {
        ProductRow {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price().cents(),
        }
    }

    fn from_row(row: ProductRow) -> Result<Product, RepositoryError> {
        Ok(Product::new(row.id, row.name, Money::from_cents(row.price))?)
    }
}

#[async_trait]
impl<S: ProductStore> RepositoryInterface<Product> for ProductRepository<S> {
    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn create(&self, entity: &Product) -> Result<(), RepositoryError> {
        self.store.insert_product(Self::to_row(entity)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn update(&self, entity: &Product) -> Result<(), RepositoryError> {
        self.store.update_product(Self::to_row(entity)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Product, RepositoryError> {
        let row = self.store.find_product_strict(id).await.map_err(|e| match e {
            StoreError::EmptyResult { .. } => RepositoryError::not_found(ENTITY, id),
            other => other.into(),
        })?;
        Self::from_row(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.store.find_all_products().await?;
        rows.into_iter().map(Self::from_row).collect()
    }
}
