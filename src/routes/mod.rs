//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard front end is served elsewhere and talks to this process
//! over JSON. This module binds the chat, report and settings endpoints
//! under a single Axum router with permissive CORS and request tracing.

pub mod chat;
pub mod reports;
pub mod settings;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full HTTP router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/chat/sessions", post(chat::create_session))
        .route("/api/chat/sessions/{id}", get(chat::get_session))
        .route("/api/chat/sessions/{id}/messages", post(chat::send_message))
        .route("/api/chat/sessions/{id}/email", post(chat::confirm_email))
        .route("/api/reports", get(reports::list_reports).post(reports::generate))
        .route("/api/settings", get(settings::get_settings))
        .route("/api/settings/save", post(settings::save))
        .route(
            "/api/settings/integrations/{service}",
            put(settings::replace_integration).patch(settings::toggle_integration),
        )
        .route("/api/settings/integrations/{service}/test", post(settings::test_integration))
        .route("/api/settings/webhooks", post(settings::add_webhook))
        .route("/api/settings/webhooks/events", get(settings::webhook_events))
        .route(
            "/api/settings/webhooks/{id}",
            patch(settings::update_webhook).delete(settings::delete_webhook),
        )
        .route("/api/settings/webhooks/{id}/test", post(settings::test_webhook))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
