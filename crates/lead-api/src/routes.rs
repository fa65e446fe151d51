//! # Routes
//!
//! Axum router configuration for the growth-gate API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /                    - Landing page / onboarding gate (`?onboarding=1`)
/// - GET  /health              - Health check
/// - POST /api/v1/inquiry      - Capture a lead inquiry (relay + mailto fallback)
/// - POST /api/v1/checkout     - Begin hosted checkout (fails closed to contact form)
/// - ANY  /api/v1/notify       - Notification relay (POST only; other methods 405)
pub fn create_router(state: AppState) -> Router {
    // The landing page and API are same-origin in production; permissive
    // CORS keeps local front-end development working against a dev server
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/inquiry", post(handlers::submit_inquiry))
        .route("/checkout", post(handlers::begin_checkout))
        // The notify route owns its 405 contract so non-POST methods get
        // the JSON error body rather than a bare status
        .route("/notify", any(handlers::notify));

    Router::new()
        .route("/", get(handlers::landing))
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
