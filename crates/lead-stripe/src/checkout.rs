//! # Stripe Checkout Sessions
//!
//! Creates hosted Checkout Sessions against a dashboard-managed price.
//! The flow never completes locally: on success the caller redirects the
//! browser to `checkout_url` and the hosted payment page takes over.

use crate::config::{RedirectUrls, StripeConfig};
use lead_core::{FlowError, FlowResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// A hosted checkout session created by Stripe
///
/// The session is owned by Stripe; nothing is tracked locally.
#[derive(Debug, Clone)]
pub struct CheckoutRedirect {
    /// Stripe's session ID (cs_...)
    pub session_id: String,

    /// URL to redirect the customer to
    pub checkout_url: String,
}

/// Gateway for creating Stripe Checkout Sessions
pub struct CheckoutGateway {
    config: StripeConfig,
    urls: RedirectUrls,
    client: Client,
}

impl CheckoutGateway {
    /// Create a new checkout gateway
    pub fn new(config: StripeConfig, urls: RedirectUrls) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            urls,
            client,
        }
    }

    /// Create from environment variables
    pub fn from_env(origin: impl Into<String>) -> FlowResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config, RedirectUrls::new(origin)))
    }

    /// Whether a price is configured; without one, checkout must fall back
    /// to the contact form instead of calling the API
    pub fn is_configured(&self) -> bool {
        self.config.price_id.is_some()
    }

    /// Begin a checkout for a single unit of the given price (or the
    /// configured default price).
    ///
    /// Fails closed: a missing price identifier returns a `Configuration`
    /// error before any network call is made.
    #[instrument(skip(self))]
    pub async fn begin_checkout(&self, price_id: Option<&str>) -> FlowResult<CheckoutRedirect> {
        let price = price_id
            .map(str::to_string)
            .or_else(|| self.config.price_id.clone())
            .ok_or_else(|| {
                FlowError::Configuration("No Stripe price identifier configured".to_string())
            })?;

        let success_url = self.urls.success_url();
        let cancel_url = self.urls.cancel_url();

        debug!("Creating Stripe checkout session for price {}", price);

        let form_params = vec![
            ("mode".to_string(), "payment".to_string()),
            ("line_items[0][price]".to_string(), price),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), success_url),
            ("cancel_url".to_string(), cancel_url),
        ];

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| FlowError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlowError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(FlowError::ProviderError {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(FlowError::ProviderError {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| FlowError::Serialization(format!("Failed to parse Stripe response: {}", e)))?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id, session.url
        );

        Ok(CheckoutRedirect {
            session_id: session.id,
            checkout_url: session.url,
        })
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer, price_id: Option<&str>) -> CheckoutGateway {
        let config = StripeConfig::new(
            "sk_test_abc123",
            "pk_test_xyz789",
            price_id.map(str::to_string),
        )
        .with_api_base_url(server.uri());

        CheckoutGateway::new(config, RedirectUrls::new("https://runeflow.xyz"))
    }

    #[tokio::test]
    async fn test_begin_checkout_creates_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_mvp300"))
            .and(body_string_contains("mode=payment"))
            .and(body_string_contains("onboarding%3D1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_123",
                "url": "https://checkout.stripe.com/c/pay/cs_test_123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Some("price_mvp300"));
        let redirect = gateway.begin_checkout(None).await.unwrap();

        assert_eq!(redirect.session_id, "cs_test_123");
        assert!(redirect.checkout_url.contains("checkout.stripe.com"));
    }

    #[tokio::test]
    async fn test_missing_price_never_calls_api() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, None);
        assert!(!gateway.is_configured());

        let err = gateway.begin_checkout(None).await.unwrap_err();
        assert!(matches!(err, FlowError::Configuration(_)));
        assert!(err.triggers_fallback());
    }

    #[tokio::test]
    async fn test_stripe_error_surfaces_provider_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "No such price: 'price_gone'" }
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Some("price_gone"));
        let err = gateway.begin_checkout(None).await.unwrap_err();

        match err {
            FlowError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert!(message.contains("No such price"));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explicit_price_overrides_config() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(body_string_contains("price_override"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_456",
                "url": "https://checkout.stripe.com/c/pay/cs_test_456"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Some("price_mvp300"));
        let redirect = gateway.begin_checkout(Some("price_override")).await.unwrap();

        assert_eq!(redirect.session_id, "cs_test_456");
    }
}
