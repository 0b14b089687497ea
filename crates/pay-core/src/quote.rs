//! # Checkout Quote
//!
//! Prices a ticket purchase in USD: `unit_price × qty + service_fee`.
//! Settings can be loaded from `config/checkout.toml`.

use crate::error::{PaymentError, PaymentResult};
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// Checkout pricing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckoutSettings {
    /// Flat fee added once per order, in cents
    #[serde(default = "default_service_fee_cents")]
    pub service_fee_cents: i64,

    /// Upper bound for tickets in one order
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_service_fee_cents() -> i64 {
    500
}

fn default_max_quantity() -> u32 {
    8
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            service_fee_cents: default_service_fee_cents(),
            max_quantity: default_max_quantity(),
        }
    }
}

impl CheckoutSettings {
    /// Load settings from a TOML string
    pub fn from_toml(toml_str: &str) -> PaymentResult<Self> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.check()?;
        Ok(settings)
    }

    pub fn service_fee(&self) -> Price {
        Price::from_cents(self.service_fee_cents)
    }

    /// Parse a raw quantity and clamp it to `[1, max_quantity]`
    pub fn quantity(&self, raw: &str) -> u32 {
        parse_quantity(raw, 1, 1, self.max_quantity)
    }

    fn check(&self) -> PaymentResult<()> {
        if self.service_fee_cents < 0 {
            return Err(PaymentError::Configuration(
                "service_fee_cents must not be negative".to_string(),
            ));
        }
        if self.max_quantity == 0 {
            return Err(PaymentError::Configuration(
                "max_quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lenient integer parsing for untrusted quantity input.
///
/// Unparsable input yields `default`; anything else is clamped to `[min, max]`.
pub fn parse_quantity(raw: &str, default: u32, min: u32, max: u32) -> u32 {
    let max = max.max(min);
    match raw.trim().parse::<i64>() {
        Ok(n) => n.clamp(i64::from(min), i64::from(max)) as u32,
        Err(_) => default,
    }
}

/// Priced ticket order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutQuote {
    pub unit_price: Price,
    pub quantity: u32,
    pub subtotal: Price,
    pub service_fee: Price,
    pub total: Price,
}

impl CheckoutQuote {
    /// Price `quantity` tickets at `unit_price` under `settings`
    pub fn new(unit_price: Price, quantity: u32, settings: &CheckoutSettings) -> PaymentResult<Self> {
        if unit_price.cents < 0 {
            return Err(PaymentError::InvalidPrice {
                message: "unit price must not be negative".to_string(),
            });
        }

        let quantity = quantity.clamp(1, settings.max_quantity.max(1));
        let service_fee = settings.service_fee();
        let (subtotal, total) = unit_price
            .times(quantity)
            .and_then(|subtotal| Some((subtotal, subtotal.checked_add(&service_fee)?)))
            .ok_or_else(|| PaymentError::InvalidPrice {
                message: format!("total for {} x {} is too large", quantity, unit_price),
            })?;

        Ok(Self {
            unit_price,
            quantity,
            subtotal,
            service_fee,
            total,
        })
    }
}
