//! # pay-api
//!
//! HTTP API layer for tixpay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Payment form validation endpoint
//! - Ticket checkout endpoint (pricing + validation)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/payment/validate` | Validate payment fields |
//! | POST | `/api/v1/checkout` | Price and validate a ticket checkout |
//!
//! A rejected submission answers `400` with an `errors` map (field → message),
//! an `error_kinds` map (field → `required`/`format`/`range`/`semantic`) and
//! a `clean` map holding the values that passed.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
