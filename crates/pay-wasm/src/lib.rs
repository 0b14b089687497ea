//! # pay-wasm
//!
//! WebAssembly bindings for tixpay.
//!
//! Lets the checkout page run the same field validators in the browser
//! before the form is submitted. The server still validates every
//! submission; this only gives earlier feedback.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { validate_payment_form, validate_card_number } from 'tixpay-wasm';
//!
//! await init();
//!
//! const card = validate_card_number('4539 5787 6362 1486');
//! if (!card.is_valid) showError('card_number', card.error);
//!
//! const { clean, errors } = validate_payment_form({
//!   card_number, exp_date, cvv, name_on_card, billing_email,
//! });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use pay_core::{FieldValidation, PaymentForm};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Single-field result for the JS side
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasmFieldResult {
    clean: String,
    error: String,
}

#[wasm_bindgen]
impl WasmFieldResult {
    /// Cleaned value; empty when invalid (and always empty for the CVV)
    #[wasm_bindgen(getter)]
    pub fn clean(&self) -> String {
        self.clean.clone()
    }

    /// Error message; empty when valid
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> String {
        self.error.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn is_valid(&self) -> bool {
        self.error.is_empty()
    }
}

impl From<FieldValidation> for WasmFieldResult {
    fn from(result: FieldValidation) -> Self {
        let (clean, error) = result.into_pair();
        Self { clean, error }
    }
}

#[wasm_bindgen]
pub fn validate_card_number(raw: &str) -> WasmFieldResult {
    pay_core::validate_card_number(raw).into()
}

/// Checked against the browser's clock, read as UTC
#[wasm_bindgen]
pub fn validate_exp_date(raw: &str) -> WasmFieldResult {
    pay_core::validate_exp_date(raw).into()
}

#[wasm_bindgen]
pub fn validate_cvv(raw: &str) -> WasmFieldResult {
    pay_core::validate_cvv(raw).into()
}

#[wasm_bindgen]
pub fn validate_name_on_card(raw: &str) -> WasmFieldResult {
    pay_core::validate_name_on_card(raw).into()
}

#[wasm_bindgen]
pub fn validate_billing_email(raw: &str) -> WasmFieldResult {
    pay_core::validate_billing_email(raw).into()
}

/// Validate a whole form object, returning `{ clean, errors }`.
/// Missing, `null` and `undefined` fields count as empty.
#[wasm_bindgen]
pub fn validate_payment_form(form: JsValue) -> Result<JsValue, JsValue> {
    let form: PaymentForm = serde_wasm_bindgen::from_value(form)
        .map_err(|e| JsValue::from_str(&format!("Invalid payment form: {}", e)))?;

    let result = pay_core::validate_payment_form(
        &form.card_number,
        &form.exp_date,
        &form.cvv,
        &form.name_on_card,
        &form.billing_email,
    );

    // Plain objects rather than JS `Map`s for the two field maps
    result
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn luhn_is_valid(digits: &str) -> bool {
    pay_core::luhn_is_valid(digits)
}

/// Format a price in cents as dollars
#[wasm_bindgen]
pub fn format_price(cents: i64) -> String {
    pay_core::Price::from_cents(cents).display()
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
