//! # lead-api
//!
//! HTTP API layer for growth-gate-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the lead-capture, checkout, and notification flows
//! - The post-checkout onboarding gate page
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Landing page / onboarding gate |
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/inquiry` | Capture lead inquiry |
//! | POST | `/api/v1/checkout` | Begin hosted checkout |
//! | ANY | `/api/v1/notify` | Notification relay (POST only) |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
