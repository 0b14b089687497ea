//! # Money
//!
//! Ticket prices in US dollars, held as whole cents.
//! Amounts from the request body are untrusted, so every conversion and
//! every sum is checked instead of wrapping.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Price in cents (USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    pub cents: i64,
}

impl Price {
    /// Convert a decimal dollar amount, rounding to the nearest cent
    pub fn from_dollars(amount: f64) -> PaymentResult<Self> {
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(PaymentError::InvalidPrice {
                message: format!("{} is not a representable amount", amount),
            });
        }
        Ok(Self::from_cents(cents as i64))
    }

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Multiply by a quantity; `None` on overflow
    pub fn times(&self, quantity: u32) -> Option<Self> {
        self.cents.checked_mul(i64::from(quantity)).map(Self::from_cents)
    }

    /// Add two prices; `None` on overflow
    pub fn checked_add(&self, other: &Price) -> Option<Self> {
        self.cents.checked_add(other.cents).map(Self::from_cents)
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dollars() {
        assert_eq!(Price::from_dollars(10.99).unwrap().cents, 1099);
        assert_eq!(Price::from_dollars(45.0).unwrap().cents, 4500);
        assert_eq!(Price::from_dollars(0.005).unwrap().cents, 1);
        assert_eq!(Price::from_dollars(-2.5).unwrap().cents, -250);
    }

    #[test]
    fn test_from_dollars_rejects_unrepresentable() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e17, -1e17, f64::MAX] {
            let err = Price::from_dollars(amount).unwrap_err();
            assert_eq!(err.status_code(), 400, "amount {}", amount);
        }
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_dollars(29.99).unwrap().display(), "$29.99");
        assert_eq!(Price::from_cents(5).display(), "$0.05");
        assert_eq!(Price::from_cents(-150).to_string(), "-$1.50");
        assert_eq!(Price::from_cents(i64::MIN).display(), "-$92233720368547758.08");
    }

    #[test]
    fn test_price_arithmetic() {
        let unit = Price::from_dollars(12.50).unwrap();
        assert_eq!(unit.times(3), Some(Price::from_cents(3750)));

        let fee = Price::from_cents(500);
        assert_eq!(unit.checked_add(&fee), Some(Price::from_cents(1750)));
    }

    #[test]
    fn test_price_arithmetic_overflow() {
        let huge = Price::from_cents(i64::MAX / 2 + 1);
        assert_eq!(huge.times(2), None);
        assert_eq!(huge.checked_add(&huge), None);
        assert_eq!(Price::from_cents(i64::MAX).checked_add(&Price::from_cents(1)), None);
    }

    #[test]
    fn test_price_serializes_as_cents() {
        let json = serde_json::to_string(&Price::from_cents(9500)).unwrap();
        assert_eq!(json, "9500");
    }
}
