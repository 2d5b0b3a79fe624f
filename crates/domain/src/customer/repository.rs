use async_trait::async_trait;
use row_store::{CustomerRow, CustomerStore, StoreError};

use crate::error::RepositoryError;
use crate::repository::RepositoryInterface;

use super::{Address, Customer};

const ENTITY: &str = "Customer";

/// Persists customers as rows of the `customers` table.
#[derive(Debug, Clone)]
pub struct CustomerRepository<S> {
    store: S,
}

impl<S: CustomerStore> CustomerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn to_row(customer: &Customer) -> CustomerRow {
        let address = customer.address();
        CustomerRow {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(Address::number),
            zipcode: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: customer.is_active(),
            reward_points: i64::from(customer.reward_points()),
        }
    }

    fn from_row(row: CustomerRow) -> Result<Customer, RepositoryError> {
        let mut customer = Customer::new(row.id, row.name)?;

        if let (Some(street), Some(number), Some(zip), Some(city)) =
            (row.street, row.number, row.zipcode, row.city)
        {
            customer.change_address(Address::new(street, number, zip, city)?);
        }
        if row.active {
            customer.activate()?;
        }

        let points = u32::try_from(row.reward_points).map_err(|_| RepositoryError::InvalidRow {
            entity: ENTITY,
            id: customer.id().to_string(),
            reason: format!("reward_points {} out of range", row.reward_points),
        })?;
        customer.add_reward_points(points);

        Ok(customer)
    }
}

#[async_trait]
impl<S: CustomerStore> RepositoryInterface<Customer> for CustomerRepository<S> {
    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn create(&self, entity: &Customer) -> Result<(), RepositoryError> {
        self.store.insert_customer(Self::to_row(entity)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn update(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let affected = self.store.update_customer(Self::to_row(entity)).await?;
        if affected == 0 {
            tracing::debug!("update matched no customer row");
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Customer, RepositoryError> {
        let row = self.store.find_customer_strict(id).await.map_err(|e| match e {
            StoreError::EmptyResult { .. } => RepositoryError::not_found(ENTITY, id),
            other => other.into(),
        })?;
        Self::from_row(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = self.store.find_all_customers().await?;
        rows.into_iter().map(Self::from_row).collect()
    }
}
