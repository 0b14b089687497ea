//! # Application State
//!
//! Shared state for the Axum application.
//! Contains configuration, checkout pricing settings, and the clock used
//! for card expiry checks.

use anyhow::Context;
use pay_core::{CheckoutSettings, SharedClock, SystemClock};
use std::sync::Arc;

/// Locations searched for the checkout settings file when
/// `CHECKOUT_CONFIG` is not set
const SETTINGS_PATHS: [&str; 3] = [
    "config/checkout.toml",
    "../config/checkout.toml",
    "../../config/checkout.toml",
];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit path to the checkout settings TOML
    pub checkout_config: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            checkout_config: std::env::var("CHECKOUT_CONFIG").ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Checkout pricing
    pub settings: CheckoutSettings,
    /// Reference clock for expiry checks
    pub clock: SharedClock,
}

impl AppState {
    /// Create state from the environment, using the wall clock
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let settings = load_checkout_settings(config.checkout_config.as_deref())?;

        Ok(Self::with_clock(config, settings, Arc::new(SystemClock)))
    }

    /// Create state with explicit parts (tests, embedding)
    pub fn with_clock(config: AppConfig, settings: CheckoutSettings, clock: SharedClock) -> Self {
        Self {
            config,
            settings,
            clock,
        }
    }
}

/// Load checkout settings.
///
/// An explicit path must exist and parse. Without one, the usual
/// locations are tried and defaults are used if none is present.
pub fn load_checkout_settings(path: Option<&str>) -> anyhow::Result<CheckoutSettings> {
    if let Some(path) = path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read checkout config {}", path))?;
        return parse_settings(&content, path);
    }

    for path in SETTINGS_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            return parse_settings(&content, path);
        }
    }

    tracing::warn!("No checkout config found, using defaults");
    Ok(CheckoutSettings::default())
}

fn parse_settings(content: &str, path: &str) -> anyhow::Result<CheckoutSettings> {
    let settings = CheckoutSettings::from_toml(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
    tracing::info!(
        "Loaded checkout settings from {}: fee={}, max_quantity={}",
        path,
        settings.service_fee().display(),
        settings.max_quantity
    );
    Ok(settings)
}
