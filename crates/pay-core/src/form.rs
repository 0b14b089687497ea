//! # Payment Form
//!
//! Runs every field validator over a checkout submission and collects the
//! results into two maps: `clean` (field → cleaned value) and `errors`
//! (field → message, failing fields only).
//!
//! Every field is validated even when an earlier one fails, and nothing
//! here returns an error or panics: a bad submission is a populated
//! `errors` map.

use crate::clock::{Clock, SystemClock};
use crate::error::{ErrorKind, PaymentError};
use crate::fields::{
    validate_billing_email, validate_card_number, validate_cvv, validate_exp_date_at,
    validate_name_on_card, FieldValidation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Keys used in the `clean` and `errors` maps
pub mod field {
    /// `clean` key for the card number
    pub const CARD: &str = "card";
    /// `errors` key for the card number
    pub const CARD_NUMBER: &str = "card_number";
    pub const EXP_DATE: &str = "exp_date";
    pub const CVV: &str = "cvv";
    pub const NAME_ON_CARD: &str = "name_on_card";
    pub const BILLING_EMAIL: &str = "billing_email";
}

/// Raw checkout payment fields as submitted by the customer.
///
/// A missing or `null` field deserializes as the empty string.
#[derive(Clone, Default, Deserialize)]
pub struct PaymentForm {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub card_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exp_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cvv: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_on_card: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub billing_email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentForm")
            .field("card_number", &"[redacted]")
            .field("exp_date", &self.exp_date)
            .field("cvv", &"[redacted]")
            .field("name_on_card", &self.name_on_card)
            .field("billing_email", &self.billing_email)
            .finish()
    }
}

impl PaymentForm {
    pub fn new(
        card_number: impl Into<String>,
        exp_date: impl Into<String>,
        cvv: impl Into<String>,
        name_on_card: impl Into<String>,
        billing_email: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            exp_date: exp_date.into(),
            cvv: cvv.into(),
            name_on_card: name_on_card.into(),
            billing_email: billing_email.into(),
        }
    }

    /// Validate against the given clock
    pub fn validate_with(&self, clock: &dyn Clock) -> PaymentFormResult {
        self.validate_at(clock.now())
    }

    /// Validate with `now` as the expiry reference
    pub fn validate_at(&self, now: DateTime<Utc>) -> PaymentFormResult {
        validate_payment_form_at(
            &self.card_number,
            &self.exp_date,
            &self.cvv,
            &self.name_on_card,
            &self.billing_email,
            now,
        )
    }
}

/// Aggregate outcome of validating a [`PaymentForm`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFormResult {
    /// Cleaned values for `card`, `exp_date`, `name_on_card`, `billing_email`.
    /// The CVV never appears here.
    pub clean: BTreeMap<String, String>,
    /// Messages for failing fields only
    pub errors: BTreeMap<String, String>,
    /// Taxonomy class of each entry in `errors`
    #[serde(skip)]
    pub kinds: BTreeMap<String, ErrorKind>,
}

impl PaymentFormResult {
    /// True when no field failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error message for a field, if it failed
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Clean value for a field. Empty when the field failed.
    pub fn clean_value(&self, field: &str) -> Option<&str> {
        self.clean.get(field).map(String::as_str)
    }

    /// Taxonomy class for a failed field
    pub fn kind_for(&self, field: &str) -> Option<ErrorKind> {
        self.kinds.get(field).copied()
    }

    /// Split into `(clean, errors)`
    pub fn into_parts(self) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
        (self.clean, self.errors)
    }

    /// `Ok(clean)` when valid, otherwise a `ValidationFailed` error
    /// carrying the per-field messages
    pub fn into_result(self) -> Result<BTreeMap<String, String>, PaymentError> {
        if self.errors.is_empty() {
            Ok(self.clean)
        } else {
            Err(PaymentError::ValidationFailed {
                errors: self.errors,
            })
        }
    }

    fn record(&mut self, clean_key: Option<&str>, error_key: &str, result: FieldValidation) {
        if let Some(error) = result.error {
            self.errors.insert(error_key.to_string(), error.message());
            self.kinds.insert(error_key.to_string(), error.kind());
        }
        if let Some(key) = clean_key {
            self.clean.insert(key.to_string(), result.clean);
        }
    }
}

/// Validate all five payment fields against the wall clock
pub fn validate_payment_form(
    card_number: &str,
    exp_date: &str,
    cvv: &str,
    name_on_card: &str,
    billing_email: &str,
) -> PaymentFormResult {
    validate_payment_form_at(
        card_number,
        exp_date,
        cvv,
        name_on_card,
        billing_email,
        SystemClock.now(),
    )
}

/// Validate all five payment fields with `now` as the expiry reference
pub fn validate_payment_form_at(
    card_number: &str,
    exp_date: &str,
    cvv: &str,
    name_on_card: &str,
    billing_email: &str,
    now: DateTime<Utc>,
) -> PaymentFormResult {
    let mut result = PaymentFormResult::default();

    result.record(Some(field::CARD), field::CARD_NUMBER, validate_card_number(card_number));
    result.record(Some(field::EXP_DATE), field::EXP_DATE, validate_exp_date_at(exp_date, now));
    result.record(None, field::CVV, validate_cvv(cvv));
    result.record(
        Some(field::NAME_ON_CARD),
        field::NAME_ON_CARD,
        validate_name_on_card(name_on_card),
    );
    result.record(
        Some(field::BILLING_EMAIL),
        field::BILLING_EMAIL,
        validate_billing_email(billing_email),
    );

    if !result.errors.is_empty() {
        let failed: Vec<&str> = result.errors.keys().map(String::as_str).collect();
        debug!(?failed, "Payment form rejected");
    }

    result
}
