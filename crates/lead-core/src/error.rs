//! # Flow Error Types
//!
//! Typed error handling for the growth-gate lead engine.
//! All flow operations return `Result<T, FlowError>`.

use thiserror::Error;

/// Core error type for all lead, checkout, and notification operations
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Inquiry is missing one or more required fields
    #[error("Missing required fields: {fields}")]
    MissingFields { fields: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with an external service
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Form relay rejected the submission with a non-2xx status
    #[error("Relay rejected submission: HTTP {status}")]
    RelayRejected { status: u16 },

    /// Checkout session creation failed
    #[error("Checkout creation failed: {0}")]
    CheckoutCreationFailed(String),

    /// SMTP delivery failed
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlowError {
    /// Returns true if this error should resolve to a fallback action
    /// (mail client or contact form) rather than a hard failure
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            FlowError::NetworkError(_)
                | FlowError::RelayRejected { .. }
                | FlowError::Configuration(_)
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            FlowError::Configuration(_) => 500,
            FlowError::InvalidRequest(_) => 400,
            FlowError::MissingFields { .. } => 400,
            FlowError::ProviderError { .. } => 502,
            FlowError::NetworkError(_) => 503,
            FlowError::RelayRejected { .. } => 502,
            FlowError::CheckoutCreationFailed(_) => 500,
            FlowError::MailDelivery(_) => 500,
            FlowError::Serialization(_) => 500,
            FlowError::Internal(_) => 500,
        }
    }
}

/// Result type alias for flow operations
pub type FlowResult<T> = Result<T, FlowError>;
