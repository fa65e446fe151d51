//! # Application State
//!
//! Shared state for the Axum application: the checkout gateway, the form
//! relay client, and the SMTP notifier. The gateway and notifier are
//! optional — missing payment or SMTP configuration degrades the matching
//! flow to its fallback instead of preventing startup.

use lead_relay::{InquiryNotifier, RelayClient};
use lead_stripe::CheckoutGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public site origin, used for checkout redirect URLs
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
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
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
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
    /// Stripe checkout gateway; `None` means checkout falls back to the
    /// contact form
    pub checkout: Option<Arc<CheckoutGateway>>,
    /// Third-party form relay client
    pub relay: Arc<RelayClient>,
    /// SMTP notifier; `None` means the notify endpoint reports failure
    pub notifier: Option<Arc<InquiryNotifier>>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state from the environment. Checkout and SMTP are optional;
    /// their absence is logged and the matching flow degrades.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let checkout = match CheckoutGateway::from_env(&config.base_url) {
            Ok(gateway) => Some(Arc::new(gateway)),
            Err(e) => {
                tracing::warn!("Stripe checkout unavailable, will fall back: {}", e);
                None
            }
        };

        let notifier = match InquiryNotifier::from_env() {
            Ok(notifier) => Some(Arc::new(notifier)),
            Err(e) => {
                tracing::warn!("SMTP notifier unavailable: {}", e);
                None
            }
        };

        let relay = Arc::new(RelayClient::from_env());

        Ok(Self {
            checkout,
            relay,
            notifier,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("BASE_URL");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
