//! Money value object.

use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = $10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Multiplies by an item quantity, or `None` on overflow.
    pub fn checked_multiply(&self, quantity: i32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Money::from_cents)
    }

    /// Multiplies by an item quantity, clamping at the `i64` bounds.
    pub fn saturating_multiply(&self, quantity: i32) -> Money {
        Money::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }

    /// Adds two amounts, or `None` on overflow.
    pub fn checked_add(&self, rhs: Money) -> Option<Money> {
        self.cents.checked_add(rhs.cents).map(Money::from_cents)
    }

    /// Returns `percentage` percent of this amount, truncated to whole cents
    /// and clamped at the `i64` bounds.
    pub fn percent(&self, percentage: i64) -> Money {
        let cents = i128::from(self.cents) * i128::from(percentage) / 100;
        Money::from_cents(cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

/// Saturating addition. Use [`Money::checked_add`] where overflow must be
/// reported.
impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn test_money_parts() {
        let money = Money::from_cents(5007);
        assert_eq!(money.dollars(), 50);
        assert_eq!(money.cents_part(), 7);
    }

    #[test]
    fn test_money_multiply_and_sum() {
        let total: Money = [
            Money::from_cents(100).saturating_multiply(2),
            Money::from_cents(200).saturating_multiply(2),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_money_overflow_is_detected() {
        let half = Money::from_cents(i64::MAX / 2);
        assert_eq!(half.checked_multiply(3), None);
        assert_eq!(half.checked_multiply(2), Some(Money::from_cents(i64::MAX - 1)));
        assert_eq!(half.checked_add(half).map(|m| m.cents()), Some(i64::MAX - 1));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_money_arithmetic_saturates_instead_of_panicking() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!(max.saturating_multiply(3).cents(), i64::MAX);
        assert_eq!(max.saturating_multiply(-3).cents(), i64::MIN);
        assert_eq!(max.percent(1000).cents(), i64::MAX);
        assert_eq!(max.percent(50).cents(), i64::MAX / 2);
    }

    #[test]
    fn test_money_percent_truncates() {
        assert_eq!(Money::from_cents(1000).percent(100).cents(), 1000);
        assert_eq!(Money::from_cents(999).percent(50).cents(), 499);
    }

    #[test]
    fn test_money_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(250)).unwrap();
        assert_eq!(json, "250");
    }
}
