//! # Form Relay Client
//!
//! Forwards a lead inquiry to the third-party form relay. The relay is the
//! primary channel; any transport failure or non-2xx response resolves to a
//! `mailto:` fallback carrying the full inquiry. No retry is attempted.

use crate::config::RelayConfig;
use lead_core::{FlowError, LeadInquiry, MailtoFallback};
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Client for the third-party form relay
pub struct RelayClient {
    config: RelayConfig,
    client: Client,
}

impl RelayClient {
    /// Create a new relay client
    pub fn new(config: RelayConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(RelayConfig::from_env())
    }

    /// Submit an inquiry to the relay.
    ///
    /// Any 2xx response counts as delivered. Everything else — network
    /// failure included — is the final fallback: the caller gets a
    /// pre-filled `mailto:` URI and no retry happens.
    #[instrument(skip(self, inquiry), fields(company = %inquiry.company))]
    pub async fn submit(&self, inquiry: &LeadInquiry) -> Result<(), MailtoFallback> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(inquiry)
            .send()
            .await;

        let reason = match response {
            Ok(resp) if resp.status().is_success() => {
                info!("Inquiry relayed: status={}", resp.status());
                return Ok(());
            }
            Ok(resp) => {
                let status = resp.status().as_u16();
                warn!("Relay rejected inquiry: status={}", status);
                FlowError::RelayRejected { status }
            }
            Err(e) => {
                warn!("Relay unreachable: {}", e);
                FlowError::NetworkError(e.to_string())
            }
        };

        Err(MailtoFallback::for_inquiry(
            &self.config.contact_email,
            inquiry,
            reason,
        ))
    }
}
