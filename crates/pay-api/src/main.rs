//! # Tixpay
//!
//! Checkout validation service.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: pricing settings (service fee, max tickets per order)
//! export CHECKOUT_CONFIG=config/checkout.toml
//!
//! # Run the server
//! tixpay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Service fee: {}, max tickets per order: {}",
        state.settings.service_fee().display(),
        state.settings.max_quantity
    );

    let app = routes::create_router(state);

    info!("Tixpay v{} starting on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Validate: POST http://{}/api/v1/payment/validate", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
