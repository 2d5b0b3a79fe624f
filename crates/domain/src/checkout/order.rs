use std::collections::HashSet;

use serde::Serialize;

use crate::error::{ValidationError, require};
use crate::money::Money;

use super::OrderItem;

/// Order aggregate root owning its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: String,
    customer_id: String,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates an order. Checks id, then customer id, then items (non-empty,
    /// unique ids, total within range).
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let customer_id = customer_id.into();
        require(&id, ValidationError::IdRequired)?;
        require(&customer_id, ValidationError::CustomerIdRequired)?;
        check_items(&items)?;

        Ok(Self {
            id,
            customer_id,
            items,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of price * quantity over all items.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Replaces the whole item list under the same rules as [`Order::new`].
    pub fn change_items(&mut self, items: Vec<OrderItem>) -> Result<(), ValidationError> {
        check_items(&items)?;
        self.items = items;
        Ok(())
    }
}

// Items are non-empty, have unique ids, and their summed total fits in i64 cents.
fn check_items(items: &[OrderItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::ItemsRequired);
    }

    let mut seen = HashSet::new();
    if !items.iter().all(|item| seen.insert(item.id())) {
        return Err(ValidationError::DuplicateItemId);
    }

    items
        .iter()
        .try_fold(Money::zero(), |acc, item| acc.checked_add(item.total()))
        .ok_or(ValidationError::OrderTotalOutOfRange)?;
    Ok(())
}
