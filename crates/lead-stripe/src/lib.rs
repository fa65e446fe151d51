//! # lead-stripe
//!
//! Stripe Checkout Session gateway for growth-gate-rs.
//!
//! One fixed-price offering, one hosted checkout page. The gateway creates
//! sessions over the Checkout Sessions REST API using a dashboard-managed
//! price ID and hands back the redirect URL; Stripe owns everything after
//! the redirect.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lead_stripe::CheckoutGateway;
//!
//! let gateway = CheckoutGateway::from_env("https://runeflow.xyz")?;
//!
//! if gateway.is_configured() {
//!     let redirect = gateway.begin_checkout(None).await?;
//!     // Redirect user to redirect.checkout_url
//! } else {
//!     // Fail closed: open the lead-capture contact form instead
//! }
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{CheckoutGateway, CheckoutRedirect};
pub use config::{RedirectUrls, StripeConfig};
