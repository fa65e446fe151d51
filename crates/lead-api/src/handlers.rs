//! # Request Handlers
//!
//! Axum request handlers for the three lead flows: inquiry capture (with
//! the mailto fallback), checkout (fail-closed into the contact form), and
//! the notification relay. Also serves the onboarding gate page.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use lead_core::{FallbackAction, FlowError, InquiryDraft};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Begin-checkout request; the price defaults to the configured one
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: Option<String>,
}

/// Begin-checkout response: either a redirect target or a fallback action
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackAction>,
}

/// Successful submission response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackAction>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackAction) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

fn flow_error_to_response(err: FlowError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(err.to_string())),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "growth-gate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Capture a lead inquiry and forward it to the form relay.
///
/// Relay failure is final: the response carries a pre-filled `mailto:`
/// fallback instead of a retry.
#[instrument(skip(state, draft))]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(draft): Json<InquiryDraft>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ErrorResponse>)> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        warn!("Inquiry rejected, missing: {}", missing.join(", "));
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        ));
    }

    let inquiry = draft.into_inquiry().map_err(flow_error_to_response)?;
    let inquiry_ref = Uuid::new_v4();

    info!(%inquiry_ref, "Forwarding inquiry to relay: company={}", inquiry.company);

    match state.relay.submit(&inquiry).await {
        Ok(()) => Ok(Json(SubmitResponse {
            success: true,
            message: "Thanks! We'll be in touch within 24 hours.".to_string(),
        })),
        Err(fallback) => {
            warn!(%inquiry_ref, "Relay failed ({}), returning mail-client fallback", fallback.reason);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(
                    ErrorResponse::new("Relay unavailable")
                        .with_fallback(fallback.into_action()),
                ),
            ))
        }
    }
}

/// Begin a hosted checkout.
///
/// Fails closed: without a configured gateway or price the response is a
/// contact-form fallback and the payment API is never called. Provider
/// errors surface as 502 so the client can show its transient toast.
#[instrument(skip(state, body))]
pub async fn begin_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Body is optional: no body means "use the configured price"
    let request: CheckoutRequest = if body.is_empty() {
        CheckoutRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Invalid request body: {}", e))),
            )
        })?
    };

    let Some(gateway) = state.checkout.as_ref() else {
        info!("Checkout not configured, falling back to contact form");
        return Ok(Json(contact_form_fallback()));
    };

    match gateway.begin_checkout(request.price_id.as_deref()).await {
        Ok(redirect) => {
            info!("Checkout session created: {}", redirect.session_id);
            Ok(Json(CheckoutResponse {
                session_id: Some(redirect.session_id),
                checkout_url: Some(redirect.checkout_url),
                fallback: None,
            }))
        }
        Err(FlowError::Configuration(reason)) => {
            info!("Checkout unconfigured ({}), falling back to contact form", reason);
            Ok(Json(contact_form_fallback()))
        }
        Err(e) => {
            error!("Checkout failed: {}", e);
            Err(flow_error_to_response(e))
        }
    }
}

fn contact_form_fallback() -> CheckoutResponse {
    CheckoutResponse {
        session_id: None,
        checkout_url: None,
        fallback: Some(FallbackAction::ContactForm),
    }
}

/// Notification relay: render and send the admin notice + user
/// confirmation for an inquiry.
///
/// Mirrors the single-shot function contract: POST only, 400 on missing
/// fields before any email is sent, generic 500 on any parse or send
/// failure.
#[instrument(skip(state, body))]
pub async fn notify(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(serde_json::json!({ "error": "Method not allowed" })),
        );
    }

    let draft: InquiryDraft = match serde_json::from_slice(&body) {
        Ok(draft) => draft,
        Err(e) => {
            error!("Inquiry body unparseable: {}", e);
            return notify_failure();
        }
    };

    if !draft.missing_fields().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing required fields" })),
        );
    }

    let inquiry = match draft.into_inquiry() {
        Ok(inquiry) => inquiry,
        Err(e) => {
            error!("Inquiry validation failed unexpectedly: {}", e);
            return notify_failure();
        }
    };

    let Some(notifier) = state.notifier.as_ref() else {
        error!("SMTP notifier not configured");
        return notify_failure();
    };

    match notifier.notify(&inquiry).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Inquiry sent successfully"
            })),
        ),
        Err(e) => {
            error!("Email sending error: {}", e);
            notify_failure()
        }
    }
}

fn notify_failure() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Failed to send inquiry" })),
    )
}

/// Landing page and post-checkout onboarding gate.
///
/// `?onboarding=1` marks the onboarding-seen cookie and serves a page that
/// reveals the onboarding panel after a brief delay. Idempotent across
/// reloads; the payment session is not verified server-side.
pub async fn landing(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("onboarding").map(String::as_str) == Some("1") {
        let session_id = params
            .get("session_id")
            .map(String::as_str)
            .unwrap_or("unknown");

        let page = onboarding_page(session_id);
        return (
            [(
                header::SET_COOKIE,
                "rf_onboarding_seen=true; Path=/; Max-Age=31536000; SameSite=Lax",
            )],
            Html(page),
        )
            .into_response();
    }

    Html(LANDING_PAGE.to_string()).into_response()
}

fn onboarding_page(session_id: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Welcome Aboard</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div id="onboarding-panel" style="display: none; background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">🚀</div>
        <h1>Payment Received — Let's Get Started</h1>
        <p>Session: <code>{}</code></p>
        <p style="color: #666;">We'll reach out within 24 hours to kick off your build.</p>
    </div>
    <script>
      setTimeout(function () {{
        document.getElementById('onboarding-panel').style.display = 'block';
      }}, 500);
    </script>
</body>
</html>
"#,
        session_id
    )
}

// Double-hash delimiters: the body contains a `"#pricing"` anchor
const LANDING_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>RuneFlow — Growth Systems</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <h1>RuneFlow</h1>
        <p style="color: #666;">Growth systems for service businesses.</p>
        <p><a href="#pricing">Pricing</a></p>
    </div>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error");
        assert_eq!(err.error, "Test error");
        assert!(err.fallback.is_none());
    }

    #[test]
    fn test_flow_error_conversion() {
        let err = FlowError::MissingFields {
            fields: "email".to_string(),
        };
        let (status, _json) = flow_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_checkout_fallback_shape() {
        let response = contact_form_fallback();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["fallback"]["action"], "contact_form");
        assert!(json.get("checkout_url").is_none());
    }
}
