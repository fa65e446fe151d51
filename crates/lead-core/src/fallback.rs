//! # Fallback Actions
//!
//! Every failed flow resolves to a user-visible fallback rather than a hard
//! error: a failed relay submission becomes a `mailto:` link carrying the
//! inquiry, and an unconfigured checkout opens the contact form.

use crate::error::FlowError;
use crate::inquiry::LeadInquiry;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

/// What the caller should do after a flow could not complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "mailto")]
pub enum FallbackAction {
    /// Open the user's mail client with the inquiry pre-filled
    MailClient(String),
    /// Open the lead-capture contact form
    ContactForm,
}

/// A `mailto:` URI carrying a full inquiry, used when the form relay is
/// unreachable or rejects the submission
#[derive(Debug, Clone)]
pub struct MailtoFallback {
    /// The constructed `mailto:` URI
    pub uri: String,
    /// Why the flow fell back
    pub reason: FlowError,
}

impl MailtoFallback {
    /// Build the fallback link for an inquiry.
    ///
    /// Subject and body mirror the admin notification: subject names the
    /// company, body lists all four submitted fields line by line.
    pub fn for_inquiry(contact_email: &str, inquiry: &LeadInquiry, reason: FlowError) -> Self {
        let subject = format!("Growth System Inquiry - {}", inquiry.company);
        let body = format!(
            "Email: {}\nCompany: {}\nPrimary Focus: {}\nChallenge: {}",
            inquiry.email, inquiry.company, inquiry.focus, inquiry.challenge
        );

        let uri = format!(
            "mailto:{}?subject={}&body={}",
            contact_email,
            utf8_percent_encode(&subject, NON_ALPHANUMERIC),
            utf8_percent_encode(&body, NON_ALPHANUMERIC)
        );

        Self { uri, reason }
    }

    /// Convert into the action the caller should take
    pub fn into_action(self) -> FallbackAction {
        FallbackAction::MailClient(self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiry::FocusArea;

    fn inquiry() -> LeadInquiry {
        LeadInquiry::new("a@b.com", "Acme", FocusArea::Lsrs, "slow leads\nno follow-up")
    }

    #[test]
    fn test_mailto_contains_all_four_fields() {
        let fallback = MailtoFallback::for_inquiry(
            "webhalla@proton.me",
            &inquiry(),
            FlowError::RelayRejected { status: 500 },
        );

        assert!(fallback.uri.starts_with("mailto:webhalla@proton.me?subject="));
        // %40 = '@', %20 = space, %0A = newline
        assert!(fallback.uri.contains("a%40b%2Ecom"));
        assert!(fallback.uri.contains("Acme"));
        assert!(fallback.uri.contains("LSRS"));
        assert!(fallback.uri.contains("slow%20leads%0Ano%20follow%2Dup"));
    }

    #[test]
    fn test_subject_names_company() {
        let fallback = MailtoFallback::for_inquiry(
            "webhalla@proton.me",
            &inquiry(),
            FlowError::NetworkError("connection refused".into()),
        );

        assert!(fallback
            .uri
            .contains("subject=Growth%20System%20Inquiry%20%2D%20Acme"));
    }

    #[test]
    fn test_into_action() {
        let fallback = MailtoFallback::for_inquiry(
            "webhalla@proton.me",
            &inquiry(),
            FlowError::RelayRejected { status: 502 },
        );

        match fallback.into_action() {
            FallbackAction::MailClient(uri) => assert!(uri.starts_with("mailto:")),
            other => panic!("expected mail client fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_is_cloneable() {
        let fallback = MailtoFallback::for_inquiry(
            "webhalla@proton.me",
            &inquiry(),
            FlowError::RelayRejected { status: 500 },
        );

        let copy = fallback.clone();
        assert_eq!(copy.uri, fallback.uri);
        assert_eq!(copy.reason.status_code(), 502);
    }

    #[test]
    fn test_contact_form_serializes_tagged() {
        let json = serde_json::to_value(FallbackAction::ContactForm).unwrap();
        assert_eq!(json["action"], "contact_form");
    }
}
