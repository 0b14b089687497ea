//! # Request Handlers
//!
//! Axum request handlers for the checkout API.
//! Payment fields are validated here and the per-field messages handed
//! back to the page; nothing is authorized or persisted.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use pay_core::{CheckoutQuote, ErrorKind, PaymentError, PaymentForm, PaymentFormResult, Price};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Ticket quantity as sent by the form: a number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    Text(String),
}

impl QuantityInput {
    fn as_raw(&self) -> String {
        match self {
            QuantityInput::Number(n) => n.to_string(),
            QuantityInput::Text(s) => s.clone(),
        }
    }
}

/// Checkout submission
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Ticket price in major units (e.g. 45.00)
    pub unit_price: f64,
    /// Number of tickets, clamped to the configured range
    #[serde(default)]
    pub qty: Option<QuantityInput>,
    /// Raw payment fields
    #[serde(flatten)]
    pub payment: PaymentForm,
}

/// Accepted payment fields
#[derive(Debug, Serialize)]
pub struct ValidatePaymentResponse {
    pub clean: BTreeMap<String, String>,
}

/// Validated checkout summary
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Generated order reference
    pub order_id: String,
    pub status: &'static str,
    pub quote: CheckoutQuote,
    /// Clean payment data. Never contains the CVV.
    pub payment: BTreeMap<String, String>,
    pub created_at: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Rejected payment form: per-field messages plus what was cleanly parsed,
/// so the page can re-fill the fields that passed
#[derive(Debug, Serialize)]
pub struct FormErrorResponse {
    pub error: String,
    pub code: u16,
    pub clean: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    /// `required`, `format`, `range` or `semantic` per failed field
    pub error_kinds: BTreeMap<String, ErrorKind>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(serde_json::to_value(response).unwrap_or_default()),
    )
}

fn form_rejected(result: PaymentFormResult) -> ApiError {
    let PaymentFormResult {
        clean,
        errors,
        kinds,
    } = result;
    let response = FormErrorResponse {
        error: PaymentError::ValidationFailed {
            errors: errors.clone(),
        }
        .to_string(),
        code: 400,
        clean,
        errors,
        error_kinds: kinds,
    };
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::to_value(response).unwrap_or_default()),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tixpay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate payment fields only
#[instrument(skip_all)]
pub async fn validate_payment(
    State(state): State<AppState>,
    Json(form): Json<PaymentForm>,
) -> Result<Json<ValidatePaymentResponse>, ApiError> {
    let result = form.validate_with(state.clock.as_ref());

    if !result.is_valid() {
        info!("Payment validation failed for {} field(s)", result.errors.len());
        return Err(form_rejected(result));
    }

    Ok(Json(ValidatePaymentResponse {
        clean: result.clean,
    }))
}

/// Price and validate a ticket checkout
#[instrument(skip_all, fields(unit_price = request.unit_price))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let quantity = request
        .qty
        .as_ref()
        .map(|q| state.settings.quantity(&q.as_raw()))
        .unwrap_or(1);

    let quote = Price::from_dollars(request.unit_price)
        .and_then(|unit_price| CheckoutQuote::new(unit_price, quantity, &state.settings))
        .map_err(|e| {
            warn!("Rejected checkout price: {}", e);
            payment_error_to_response(e)
        })?;

    let result = request.payment.validate_with(state.clock.as_ref());

    if !result.is_valid() {
        info!(
            "Checkout rejected: {} field(s) invalid, total={}",
            result.errors.len(),
            quote.total
        );
        return Err(form_rejected(result));
    }
    let clean = result.clean;

    let order_id = Uuid::new_v4().to_string();
    info!(
        "Checkout validated: order={}, qty={}, total={}",
        order_id,
        quote.quantity,
        quote.total
    );

    Ok(Json(CheckoutResponse {
        order_id,
        status: "validated",
        quote,
        payment: clean,
        created_at: Utc::now().to_rfc3339(),
    }))
}
