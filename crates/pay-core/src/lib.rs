//! # pay-core
//!
//! Payment form validation and ticket checkout pricing for tixpay.
//!
//! This crate provides:
//! - `normalize` for NFKC folding and trimming of raw form input, and
//!   `ascii_digits` for reading decimal digits from any script
//! - Field validators for card number, expiration, CVV, name and email
//! - `luhn_is_valid` checksum
//! - `validate_payment_form` to run every validator and collect the results
//! - `CheckoutQuote` and `CheckoutSettings` for order pricing
//! - `Clock` for injecting the current date
//!
//! Nothing here authorizes a payment or stores card data.
//!
//! ## Example
//!
//! ```rust
//! use pay_core::validate_payment_form;
//!
//! let result = validate_payment_form(
//!     "4539 5787 6362 1486",
//!     "12/99",
//!     "123",
//!     "John   Doe",
//!     "John@Example.com",
//! );
//!
//! assert!(result.is_valid());
//! assert_eq!(result.clean["card"], "4539578763621486");
//! assert_eq!(result.clean["billing_email"], "john@example.com");
//! ```

pub mod clock;
pub mod error;
pub mod fields;
pub mod form;
pub mod luhn;
pub mod normalize;
pub mod price;
pub mod quote;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use error::{ErrorKind, FieldError, PaymentError, PaymentResult};
pub use fields::{
    validate_billing_email, validate_card_number, validate_cvv, validate_exp_date,
    validate_exp_date_at, validate_name_on_card, FieldValidation,
};
pub use form::{field, validate_payment_form, validate_payment_form_at, PaymentForm, PaymentFormResult};
pub use luhn::luhn_is_valid;
pub use normalize::{ascii_digits, normalize};
pub use price::Price;
pub use quote::{parse_quantity, CheckoutQuote, CheckoutSettings};
