//! # Payment Error Types
//!
//! Typed error handling for the tixpay checkout core.
//!
//! Two layers live here:
//! - [`FieldError`]: a single form field failed validation. These are
//!   always recovered and reported per field, never propagated as faults.
//! - [`PaymentError`]: service-level failures (bad configuration, an
//!   unusable price, a rejected submission).

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Classification of a field error, reported to the checkout page next
/// to each message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Field empty or missing
    Required,
    /// Does not match the field's grammar
    Format,
    /// Length or numeric value out of bounds
    Range,
    /// Well-formed but fails a domain rule (checksum, expiry)
    Semantic,
}

/// Why a single payment form field was rejected.
///
/// The `Display` output is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("The card number must contain digits only")]
    CardDigitsOnly,

    #[error("The card number must be between 13 and 19 digits long")]
    CardLength,

    #[error("The card number is not valid according to the Luhn algorithm")]
    CardChecksum,

    #[error("Expiration date is required")]
    ExpDateRequired,

    #[error("Expiration date must be in MM/YY format")]
    ExpDateFormat,

    /// Only reachable if the MM/YY grammar stops constraining the month
    #[error("Expiration month must be between 01 and 12")]
    ExpMonthRange,

    #[error("Card is expired")]
    CardExpired,

    #[error("CVV is required")]
    CvvRequired,

    #[error("CVV must contain digits only")]
    CvvDigitsOnly,

    #[error("CVV must be 3 or 4 digits")]
    CvvLength,

    #[error("Name on card must be between 2 and 60 characters long")]
    NameLength,

    #[error("Name on card contains invalid characters")]
    NameCharacters,

    #[error("Email must be at most 254 characters long")]
    EmailLength,

    #[error("Email format is invalid")]
    EmailFormat,
}

impl FieldError {
    /// Returns the taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::ExpDateRequired | FieldError::CvvRequired => ErrorKind::Required,
            FieldError::CardDigitsOnly
            | FieldError::ExpDateFormat
            | FieldError::CvvDigitsOnly
            | FieldError::NameCharacters
            | FieldError::EmailFormat => ErrorKind::Format,
            FieldError::CardLength
            | FieldError::ExpMonthRange
            | FieldError::CvvLength
            | FieldError::NameLength
            | FieldError::EmailLength => ErrorKind::Range,
            FieldError::CardChecksum | FieldError::CardExpired => ErrorKind::Semantic,
        }
    }

    /// The user-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Core error type for service-level checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing file, malformed settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more payment fields failed validation
    #[error("Payment form rejected: {} field(s) invalid", .errors.len())]
    ValidationFailed { errors: BTreeMap<String, String> },

    /// Price or quantity could not be used
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::ValidationFailed { .. } => 400,
            PaymentError::InvalidPrice { .. } => 400,
        }
    }
}

impl From<toml::de::Error> for PaymentError {
    fn from(err: toml::de::Error) -> Self {
        PaymentError::Configuration(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type PaymentResult<T> = Result<T, PaymentError>;
