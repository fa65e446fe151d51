//! # lead-core
//!
//! Core types and errors for the growth-gate lead engine.
//!
//! This crate provides:
//! - `LeadInquiry` and `InquiryDraft` for validated lead capture
//! - `FocusArea` for the service-focus taxonomy
//! - `FallbackAction` / `MailtoFallback` for the degraded-path chain
//! - `FlowError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use lead_core::{InquiryDraft, MailtoFallback, FlowError};
//!
//! // Validate a wire-format draft
//! let inquiry = draft.into_inquiry()?;
//!
//! // On relay failure, hand the caller a mailto link instead
//! let fallback = MailtoFallback::for_inquiry(
//!     "webhalla@proton.me",
//!     &inquiry,
//!     FlowError::RelayRejected { status: 502 },
//! );
//! ```

pub mod error;
pub mod fallback;
pub mod inquiry;

// Re-exports for convenience
pub use error::{FlowError, FlowResult};
pub use fallback::{FallbackAction, MailtoFallback};
pub use inquiry::{FocusArea, InquiryDraft, LeadInquiry};
