//! # Notification Templates
//!
//! Renders the two HTML emails derived from a lead inquiry: the admin
//! notice (full inquiry, reply-to set to the submitter) and the user
//! confirmation. Both are discarded after send.
//!
//! Inquiry fields are interpolated into the markup as-is. Both messages
//! go to known mailboxes and are read, not re-served, so submitted text
//! is kept verbatim rather than HTML-escaped.

use crate::config::SmtpConfig;
use lead_core::LeadInquiry;

/// A rendered, ready-to-send HTML email
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Set on the admin notice only, so replying reaches the submitter
    pub reply_to: Option<String>,
}

/// The admin notice + user confirmation derived from one inquiry
#[derive(Debug, Clone)]
pub struct NotificationPair {
    pub admin: RenderedEmail,
    pub user: RenderedEmail,
}

impl NotificationPair {
    /// Render both emails for an inquiry
    pub fn from_inquiry(inquiry: &LeadInquiry, config: &SmtpConfig) -> Self {
        Self {
            admin: render_admin_notice(inquiry, &config.admin_email),
            user: render_user_confirmation(inquiry),
        }
    }
}

fn render_admin_notice(inquiry: &LeadInquiry, admin_email: &str) -> RenderedEmail {
    let challenge_html = inquiry.challenge.replace('\n', "<br>");

    let html = format!(
        r#"
    <h2>New Growth System Inquiry</h2>
    <p><strong>Timestamp:</strong> {timestamp}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Company:</strong> {company}</p>
    <p><strong>Primary Focus:</strong> {focus}</p>
    <p><strong>Challenge:</strong></p>
    <p>{challenge}</p>
    <hr>
    <p>Reply to: {email}</p>
    "#,
        timestamp = inquiry.timestamp.to_rfc3339(),
        email = inquiry.email,
        company = inquiry.company,
        focus = inquiry.focus,
        challenge = challenge_html,
    );

    RenderedEmail {
        to: admin_email.to_string(),
        subject: format!("Growth System Inquiry - {}", inquiry.company),
        html,
        reply_to: Some(inquiry.email.clone()),
    }
}

fn render_user_confirmation(inquiry: &LeadInquiry) -> RenderedEmail {
    let html = format!(
        r#"
    <h2>We Got Your Inquiry!</h2>
    <p>Hey,</p>
    <p>Thanks for reaching out! We received your details and will review them shortly.</p>
    <p><strong>What we got:</strong></p>
    <ul>
      <li><strong>Company:</strong> {company}</li>
      <li><strong>Focus:</strong> {focus}</li>
      <li><strong>Your Challenge:</strong> "{challenge}"</li>
    </ul>
    <p>We'll get back to you within 24 hours with a tailored solution and next steps.</p>
    <p>Talk soon,<br>The RuneFlow Team</p>
    "#,
        company = inquiry.company,
        focus = inquiry.focus,
        challenge = inquiry.challenge,
    );

    RenderedEmail {
        to: inquiry.email.clone(),
        subject: "We received your inquiry - RuneFlow".to_string(),
        html,
        reply_to: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_core::FocusArea;

    fn pair() -> NotificationPair {
        let inquiry = LeadInquiry::new(
            "a@b.com",
            "Acme",
            FocusArea::Cms,
            "slow leads\nno follow-up",
        );
        let config = SmtpConfig::new(
            "smtp.example.com",
            465,
            "mailer",
            "hunter2",
            "noreply@runeflow.xyz",
            "webhalla@proton.me",
        );
        NotificationPair::from_inquiry(&inquiry, &config)
    }

    #[test]
    fn test_admin_notice_carries_full_inquiry() {
        let pair = pair();

        assert_eq!(pair.admin.to, "webhalla@proton.me");
        assert_eq!(pair.admin.subject, "Growth System Inquiry - Acme");
        assert!(pair.admin.html.contains("a@b.com"));
        assert!(pair.admin.html.contains("Acme"));
        assert!(pair.admin.html.contains("Content Marketing (CMS)"));
    }

    #[test]
    fn test_reply_to_on_admin_only() {
        let pair = pair();

        assert_eq!(pair.admin.reply_to.as_deref(), Some("a@b.com"));
        assert!(pair.user.reply_to.is_none());
    }

    #[test]
    fn test_challenge_newlines_become_breaks() {
        let pair = pair();

        assert!(pair.admin.html.contains("slow leads<br>no follow-up"));
    }

    #[test]
    fn test_user_confirmation_echoes_details() {
        let pair = pair();

        assert_eq!(pair.user.to, "a@b.com");
        assert_eq!(pair.user.subject, "We received your inquiry - RuneFlow");
        assert!(pair.user.html.contains("Acme"));
        assert!(pair.user.html.contains("slow leads\nno follow-up"));
    }
}
