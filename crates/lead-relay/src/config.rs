//! # Relay & SMTP Configuration
//!
//! Environment-backed configuration for the two outbound channels:
//! the third-party form relay and the SMTP notification transport.

use lead_core::FlowError;
use std::env;

/// Default third-party form relay endpoint
const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/xblzbwzp";

/// Default contact address for the mailto fallback
const DEFAULT_CONTACT_EMAIL: &str = "webhalla@proton.me";

/// Form relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint that receives lead-inquiry JSON (any 2xx = delivered)
    pub endpoint: String,

    /// Address the mailto fallback targets when the relay fails
    pub contact_email: String,
}

impl RelayConfig {
    /// Load from environment variables, falling back to the production
    /// relay endpoint and contact address.
    ///
    /// Optional env vars: `RELAY_ENDPOINT`, `CONTACT_EMAIL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            endpoint: env::var("RELAY_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_RELAY_ENDPOINT.to_string()),
            contact_email: env::var("CONTACT_EMAIL")
                .unwrap_or_else(|_| DEFAULT_CONTACT_EMAIL.to_string()),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(endpoint: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            contact_email: contact_email.into(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// SMTP transport configuration for the notification relay
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,

    /// SMTP port (implicit TLS; 465 by convention)
    pub port: u16,

    /// Auth username
    pub user: String,

    /// Auth password
    pub pass: String,

    /// Sender address for both notification emails
    pub from: String,

    /// Recipient of the admin notice
    pub admin_email: String,
}

impl SmtpConfig {
    /// Load from environment variables.
    ///
    /// Required env vars: `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
    /// `SMTP_PASS`, `SMTP_FROM`, `ADMIN_EMAIL`.
    pub fn from_env() -> Result<Self, FlowError> {
        dotenvy::dotenv().ok();

        let require = |key: &str| {
            env::var(key).map_err(|_| FlowError::Configuration(format!("{} not set", key)))
        };

        let port = require("SMTP_PORT")?
            .parse::<u16>()
            .map_err(|_| FlowError::Configuration("SMTP_PORT is not a valid port".to_string()))?;

        Ok(Self {
            host: require("SMTP_HOST")?,
            port,
            user: require("SMTP_USER")?,
            pass: require("SMTP_PASS")?,
            from: require("SMTP_FROM")?,
            admin_email: require("ADMIN_EMAIL")?,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        pass: impl Into<String>,
        from: impl Into<String>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            pass: pass.into(),
            from: from.into(),
            admin_email: admin_email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_defaults() {
        std::env::remove_var("RELAY_ENDPOINT");
        std::env::remove_var("CONTACT_EMAIL");

        let config = RelayConfig::from_env();
        assert_eq!(config.endpoint, DEFAULT_RELAY_ENDPOINT);
        assert_eq!(config.contact_email, DEFAULT_CONTACT_EMAIL);
    }

    #[test]
    fn test_smtp_config_missing_host() {
        std::env::remove_var("SMTP_HOST");

        let result = SmtpConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_smtp_config_explicit() {
        let config = SmtpConfig::new(
            "smtp.example.com",
            465,
            "mailer",
            "hunter2",
            "noreply@runeflow.xyz",
            "webhalla@proton.me",
        );

        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 465);
        assert_eq!(config.admin_email, "webhalla@proton.me");
    }
}
