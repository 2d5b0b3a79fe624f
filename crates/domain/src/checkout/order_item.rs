use serde::Serialize;

use crate::error::{ValidationError, require};
use crate::money::Money;

/// A line of an order. Owned by exactly one [`Order`](super::Order).
///
/// `product_id` is a weak reference to a product; the item keeps its own copy
/// of the name and price at ordering time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    id: String,
    name: String,
    price: Money,
    product_id: String,
    quantity: i32,
}

impl OrderItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<String>,
        quantity: i32,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        require(&id, ValidationError::IdRequired)?;
        if quantity <= 0 {
            return Err(ValidationError::QuantityMustBePositive);
        }
        if price.checked_multiply(quantity).is_none() {
            return Err(ValidationError::ItemTotalOutOfRange);
        }

        Ok(Self {
            id,
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        })
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

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Returns price * quantity. Exact, since `new` rejects overflowing totals.
    pub fn total(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_must_be_positive() {
        for quantity in [0, -1, i32::MIN] {
            let err = OrderItem::new("1", "Item 1", Money::from_cents(100), "p1", quantity)
                .unwrap_err();
            assert_eq!(err.to_string(), "Quantity must be greater than zero");
        }
        assert!(OrderItem::new("1", "Item 1", Money::from_cents(100), "p1", 1).is_ok());
    }

    #[test]
    fn test_id_is_required() {
        assert_eq!(
            OrderItem::new("", "Item 1", Money::from_cents(100), "p1", 1).unwrap_err(),
            ValidationError::IdRequired
        );
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let price = Money::from_cents(i64::MAX / 2);
        assert_eq!(
            OrderItem::new("1", "Item 1", price, "p1", 3).unwrap_err(),
            ValidationError::ItemTotalOutOfRange
        );

        let item = OrderItem::new("1", "Item 1", price, "p1", 2).unwrap();
        assert_eq!(item.total().cents(), i64::MAX - 1);
    }

    #[test]
    fn test_item_total() {
        let item = OrderItem::new("1", "Item 1", Money::from_cents(100), "p1", 3).unwrap();
        assert_eq!(item.total().cents(), 300);
    }
}
