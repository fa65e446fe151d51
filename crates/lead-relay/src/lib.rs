//! # lead-relay
//!
//! Outbound lead delivery for growth-gate-rs.
//!
//! Two independent channels move an inquiry toward a human:
//!
//! 1. **RelayClient** — forwards the inquiry JSON to a third-party form
//!    relay; any failure resolves to a pre-filled `mailto:` fallback.
//! 2. **InquiryNotifier** — renders an admin notice and a user confirmation
//!    and sends both sequentially over SMTP (the custom form-target path).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lead_relay::{InquiryNotifier, RelayClient};
//!
//! let relay = RelayClient::from_env();
//! match relay.submit(&inquiry).await {
//!     Ok(()) => { /* 2xx from the relay */ }
//!     Err(fallback) => { /* hand fallback.uri (mailto:) to the caller */ }
//! }
//!
//! let notifier = InquiryNotifier::from_env()?;
//! notifier.notify(&inquiry).await?; // admin notice, then user confirmation
//! ```

pub mod client;
pub mod config;
pub mod mailer;
pub mod template;

// Re-exports
pub use client::RelayClient;
pub use config::{RelayConfig, SmtpConfig};
pub use mailer::{BoxedMailer, InquiryNotifier, Mailer, SmtpMailer};
pub use template::{NotificationPair, RenderedEmail};
