use uuid::Uuid;

use crate::customer::Customer;
use crate::error::ValidationError;
use crate::money::Money;

use super::{Order, OrderItem};

/// Stateless checkout operations.
pub struct OrderService;

impl OrderService {
    /// Places an order for `customer` and credits half of the order total
    /// (in cents, rounded down) as reward points.
    #[tracing::instrument(skip(customer, items), fields(customer_id = %customer.id()))]
    pub fn place_order(
        customer: &mut Customer,
        items: Vec<OrderItem>,
    ) -> Result<Order, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::OrderMustHaveItems);
        }

        let order = Order::new(Uuid::new_v4().to_string(), customer.id(), items)?;
        let points = order.total().cents().max(0) / 2;
        customer.add_reward_points(u32::try_from(points).unwrap_or(u32::MAX));

        tracing::debug!(order_id = %order.id(), points, "order placed");
        Ok(order)
    }

    /// Sum of the totals of `orders`, saturating at the `i64` bounds.
    pub fn total(orders: &[Order]) -> Money {
        orders.iter().map(Order::total).sum()
    }
}
