//! # SMTP Mailer
//!
//! Delivery of rendered notification emails over SMTP. The `Mailer` trait
//! is the seam: handlers and tests work against it, `SmtpMailer` is the
//! lettre-backed production implementation.

use crate::config::SmtpConfig;
use crate::template::{NotificationPair, RenderedEmail};
use async_trait::async_trait;
use lead_core::{FlowError, FlowResult, LeadInquiry};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Transport-agnostic mail delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one rendered email; resolves once the transport acknowledges
    async fn send(&self, email: &RenderedEmail) -> FlowResult<()>;
}

/// Type alias for a shared mailer (dynamic dispatch)
pub type BoxedMailer = Arc<dyn Mailer>;

/// Lettre-backed SMTP mailer (implicit TLS)
pub struct SmtpMailer {
    from: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a mailer from SMTP configuration
    pub fn new(config: &SmtpConfig) -> FlowResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| FlowError::Configuration(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        Ok(Self {
            from: config.from.clone(),
            transport,
        })
    }

    fn build_message(&self, email: &RenderedEmail) -> FlowResult<Message> {
        let parse_addr = |addr: &str| {
            addr.parse()
                .map_err(|e| FlowError::InvalidRequest(format!("Invalid address {}: {}", addr, e)))
        };

        let mut builder = Message::builder()
            .from(parse_addr(&self.from)?)
            .to(parse_addr(&email.to)?)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML);

        if let Some(ref reply_to) = email.reply_to {
            builder = builder.reply_to(parse_addr(reply_to)?);
        }

        builder
            .body(email.html.clone())
            .map_err(|e| FlowError::Internal(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &RenderedEmail) -> FlowResult<()> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| FlowError::MailDelivery(e.to_string()))?;

        Ok(())
    }
}

/// Sends the admin notice and user confirmation for an inquiry.
///
/// The two sends are sequential and awaited in order; there is no retry,
/// queueing, or delivery confirmation beyond the SMTP acknowledgment.
pub struct InquiryNotifier {
    mailer: BoxedMailer,
    config: SmtpConfig,
}

impl InquiryNotifier {
    /// Create a notifier over an arbitrary mailer
    pub fn new(mailer: BoxedMailer, config: SmtpConfig) -> Self {
        Self { mailer, config }
    }

    /// Build the production SMTP-backed notifier from environment config
    pub fn from_env() -> FlowResult<Self> {
        let config = SmtpConfig::from_env()?;
        let mailer = Arc::new(SmtpMailer::new(&config)?);
        Ok(Self::new(mailer, config))
    }

    /// Render and send both notification emails.
    ///
    /// Partial delivery (admin sent, user confirmation failed) is logged
    /// distinctly but still reported as a failure to the caller.
    #[instrument(skip(self, inquiry), fields(company = %inquiry.company))]
    pub async fn notify(&self, inquiry: &LeadInquiry) -> FlowResult<()> {
        let pair = NotificationPair::from_inquiry(inquiry, &self.config);

        self.mailer.send(&pair.admin).await?;

        if let Err(e) = self.mailer.send(&pair.user).await {
            warn!(
                "Partial delivery: admin notice sent, user confirmation to {} failed: {}",
                pair.user.to, e
            );
            return Err(e);
        }

        info!("Inquiry notifications delivered to admin and submitter");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_core::FocusArea;
    use std::sync::Mutex;

    /// Records sends; fails any recipient listed in `fail_for`
    struct RecordingMailer {
        sent: Mutex<Vec<RenderedEmail>>,
        fail_for: Option<String>,
    }

    impl RecordingMailer {
        fn new(fail_for: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail_for: fail_for.map(str::to_string),
            })
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &RenderedEmail) -> FlowResult<()> {
            if self.fail_for.as_deref() == Some(email.to.as_str()) {
                return Err(FlowError::MailDelivery("connection reset".to_string()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn config() -> SmtpConfig {
        SmtpConfig::new(
            "smtp.example.com",
            465,
            "mailer",
            "hunter2",
            "noreply@runeflow.xyz",
            "webhalla@proton.me",
        )
    }

    fn inquiry() -> LeadInquiry {
        LeadInquiry::new("a@b.com", "Acme", FocusArea::Lsrs, "slow leads")
    }

    #[tokio::test]
    async fn test_notify_sends_admin_then_user() {
        let mailer = RecordingMailer::new(None);
        let notifier = InquiryNotifier::new(mailer.clone(), config());

        notifier.notify(&inquiry()).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "webhalla@proton.me");
        assert_eq!(sent[0].reply_to.as_deref(), Some("a@b.com"));
        assert_eq!(sent[1].to, "a@b.com");
        assert!(sent[1].reply_to.is_none());
    }

    #[tokio::test]
    async fn test_admin_failure_sends_nothing_further() {
        let mailer = RecordingMailer::new(Some("webhalla@proton.me"));
        let notifier = InquiryNotifier::new(mailer.clone(), config());

        let err = notifier.notify(&inquiry()).await.unwrap_err();

        assert!(matches!(err, FlowError::MailDelivery(_)));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_delivery_still_reports_failure() {
        let mailer = RecordingMailer::new(Some("a@b.com"));
        let notifier = InquiryNotifier::new(mailer.clone(), config());

        let err = notifier.notify(&inquiry()).await.unwrap_err();

        assert!(matches!(err, FlowError::MailDelivery(_)));
        // Admin notice went out before the user send failed
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "webhalla@proton.me");
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_address() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let email = RenderedEmail {
            to: "not-an-address".to_string(),
            subject: "x".to_string(),
            html: "<p>x</p>".to_string(),
            reply_to: None,
        };

        assert!(mailer.build_message(&email).is_err());
    }
}
