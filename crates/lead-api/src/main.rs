//! # Growth-Gate RS
//!
//! Lead capture, checkout, and notification relay for the RuneFlow site.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export STRIPE_PRICE_ID=price_...
//! export SMTP_HOST=smtp.example.com
//! export SMTP_PORT=465
//! export SMTP_USER=... SMTP_PASS=...
//! export SMTP_FROM=noreply@runeflow.xyz
//! export ADMIN_EMAIL=webhalla@proton.me
//!
//! # Run the server
//! growth-gate
//! ```

use lead_api::{routes, state::AppState};
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

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Checkout: {}",
        if state.checkout.is_some() {
            "configured"
        } else {
            "unconfigured (contact-form fallback)"
        }
    );
    info!(
        "SMTP notifier: {}",
        if state.notifier.is_some() {
            "configured"
        } else {
            "unconfigured"
        }
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Growth-Gate starting on http://{}", addr);

    if !is_prod {
        info!("Inquiry:  POST http://{}/api/v1/inquiry", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
        info!("Notify:   POST http://{}/api/v1/notify", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
