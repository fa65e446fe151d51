//! # Lead Inquiry Types
//!
//! A `LeadInquiry` is a prospective customer's submitted contact/interest
//! record. Inquiries are create-once, use-once: they exist for the duration
//! of one relay call or one notification send, and are never persisted.

use crate::error::{FlowError, FlowResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service focus selected on the inquiry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    /// Lead Generation & Response
    #[serde(rename = "LSRS", alias = "Lead Generation (LSRS)")]
    Lsrs,
    /// Content Marketing System
    #[serde(rename = "CMS", alias = "Content Marketing (CMS)")]
    Cms,
    /// Full Stack Growth System
    #[serde(rename = "FSGS", alias = "Full Stack (FSGS)")]
    Fsgs,
    /// Custom / multiple solutions
    #[serde(rename = "Custom", alias = "Custom Solution")]
    Custom,
}

impl FocusArea {
    /// The label shown on the inquiry form, used in rendered emails
    /// and mailto bodies
    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Lsrs => "Lead Generation (LSRS)",
            FocusArea::Cms => "Content Marketing (CMS)",
            FocusArea::Fsgs => "Full Stack (FSGS)",
            FocusArea::Custom => "Custom Solution",
        }
    }
}

impl std::fmt::Display for FocusArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A validated lead inquiry
///
/// Invariant: `email`, `company`, and `challenge` are non-empty and `focus`
/// is a known value. Construct via [`InquiryDraft::into_inquiry`] to enforce
/// this at the request boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadInquiry {
    /// Submitter's email address
    pub email: String,

    /// Company / business name
    pub company: String,

    /// Selected service focus
    pub focus: FocusArea,

    /// Free-text description of the submitter's biggest challenge
    pub challenge: String,

    /// Submission time (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
}

impl LeadInquiry {
    /// Create an inquiry stamped with the current time
    pub fn new(
        email: impl Into<String>,
        company: impl Into<String>,
        focus: FocusArea,
        challenge: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            company: company.into(),
            focus,
            challenge: challenge.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Unvalidated inquiry body as it arrives on the wire
///
/// All fields are optional so that validation runs before business logic
/// and a single `Missing required fields` error covers every gap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryDraft {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    /// Kept as a raw string so an unknown focus value reports as a
    /// missing field rather than a deserialization failure
    #[serde(default)]
    pub focus: Option<String>,

    #[serde(default)]
    pub challenge: Option<String>,

    /// Optional client-supplied timestamp; the server stamps `Utc::now()`
    /// when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl InquiryDraft {
    /// Names of required fields that are absent, empty, or (for focus)
    /// unrecognized
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if is_blank(&self.email) {
            missing.push("email");
        }
        if is_blank(&self.company) {
            missing.push("company");
        }
        if self.parse_focus().is_none() {
            missing.push("focus");
        }
        if is_blank(&self.challenge) {
            missing.push("challenge");
        }

        missing
    }

    fn parse_focus(&self) -> Option<FocusArea> {
        let raw = self.focus.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
    }

    /// Validate and convert into a `LeadInquiry`
    pub fn into_inquiry(self) -> FlowResult<LeadInquiry> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(FlowError::MissingFields {
                fields: missing.join(", "),
            });
        }

        let focus = self
            .parse_focus()
            .ok_or_else(|| FlowError::Internal("focus validated but unparseable".to_string()))?;

        Ok(LeadInquiry {
            email: self.email.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            focus,
            challenge: self.challenge.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map(str::trim).unwrap_or("").is_empty()
}
