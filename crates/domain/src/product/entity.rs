use serde::Serialize;

use crate::error::{ValidationError, require};
use crate::money::Money;

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        require(&id, ValidationError::IdRequired)?;
        require(&name, ValidationError::NameRequired)?;

        Ok(Self { id, name, price })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require(&name, ValidationError::NameRequired)?;
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: Money) {
        self.price = price;
    }
}
