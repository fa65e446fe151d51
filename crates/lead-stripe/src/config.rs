//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! All secrets are loaded from environment variables. The price identifier
//! is deliberately optional: without it the checkout flow fails closed into
//! the lead-capture fallback instead of calling the API.

use lead_core::FlowError;
use std::env;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...)
    pub publishable_key: String,

    /// Price ID for the fixed-price offering (price_...). Optional:
    /// absence means checkout is not yet wired up and must fall back.
    pub price_id: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    ///
    /// Optional:
    /// - `STRIPE_PRICE_ID`
    pub fn from_env() -> Result<Self, FlowError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| FlowError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        let publishable_key = env::var("STRIPE_PUBLISHABLE_KEY")
            .map_err(|_| FlowError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string()))?;

        let price_id = env::var("STRIPE_PRICE_ID")
            .ok()
            .filter(|p| !p.trim().is_empty());

        // Validate key formats
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(FlowError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !publishable_key.starts_with("pk_test_") && !publishable_key.starts_with("pk_live_") {
            return Err(FlowError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        if let Some(ref price) = price_id {
            if !price.starts_with("price_") {
                return Err(FlowError::Configuration(
                    "STRIPE_PRICE_ID must start with price_".to_string(),
                ));
            }
        }

        Ok(Self {
            secret_key,
            publishable_key,
            price_id,
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
        price_id: Option<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            price_id,
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Fixed redirect URL templates for the hosted checkout page.
///
/// The success URL carries the onboarding query flag and the session-id
/// placeholder Stripe substitutes; cancel returns to the pricing anchor.
#[derive(Debug, Clone)]
pub struct RedirectUrls {
    /// Site origin (e.g. "https://runeflow.xyz")
    pub origin: String,
}

impl RedirectUrls {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn success_url(&self) -> String {
        format!(
            "{}/?onboarding=1&session_id={{CHECKOUT_SESSION_ID}}",
            self.origin
        )
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/#pricing", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = StripeConfig::new(
            "sk_test_abc123",
            "pk_test_xyz789",
            Some("price_mvp300".to_string()),
        );
        assert!(config.is_test_mode());
        assert_eq!(config.price_id.as_deref(), Some("price_mvp300"));
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789", None);
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_redirect_urls() {
        let urls = RedirectUrls::new("https://runeflow.xyz");

        assert_eq!(
            urls.success_url(),
            "https://runeflow.xyz/?onboarding=1&session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(urls.cancel_url(), "https://runeflow.xyz/#pricing");
    }

    #[test]
    fn test_from_env_missing_key() {
        std::env::remove_var("STRIPE_SECRET_KEY");

        let result = StripeConfig::from_env();
        assert!(result.is_err());
    }
}
