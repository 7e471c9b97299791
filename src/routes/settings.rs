//! Integration and webhook settings routes.
//!
//! Settings live in memory only. Unknown service names in the path are
//! answered with 404, like any other missing resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::settings::ConnectionTestResult;
use crate::settings::types::{
    IntegrationConfig, Service, SettingsError, SettingsState, WEBHOOK_EVENTS, WebhookConfig, WebhookPatch,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ToggleBody {
    pub enabled: bool,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `GET /api/settings`: every integration and webhook.
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsState> {
    Json(state.settings.snapshot().await)
}

/// `POST /api/settings/save`: acknowledge; nothing is persisted.
pub async fn save(State(state): State<AppState>) -> Json<SaveResponse> {
    let message = state.settings.save().await;
    Json(SaveResponse { success: true, message })
}

/// `PUT /api/settings/integrations/:service`: replace one integration.
pub async fn replace_integration(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Json(body): Json<IntegrationConfig>,
) -> Result<Json<IntegrationConfig>, ApiError> {
    let service = parse_service(&service)?;
    state
        .settings
        .replace_integration(service, body)
        .await
        .map(Json)
        .map_err(|e| settings_error_to_api(&e))
}

/// `PATCH /api/settings/integrations/:service`: flip the enabled flag.
pub async fn toggle_integration(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Json(body): Json<ToggleBody>,
) -> Result<Json<IntegrationConfig>, ApiError> {
    let service = parse_service(&service)?;
    Ok(Json(state.settings.set_enabled(service, body.enabled).await))
}

/// `POST /api/settings/integrations/:service/test`: simulated connection test.
pub async fn test_integration(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<ConnectionTestResult>, ApiError> {
    let service = parse_service(&service)?;
    Ok(Json(state.settings.test_connection(service).await))
}

/// `GET /api/settings/webhooks/events`
pub async fn webhook_events() -> Json<&'static [&'static str]> {
    Json(WEBHOOK_EVENTS)
}

/// `POST /api/settings/webhooks`: append a blank webhook.
pub async fn add_webhook(State(state): State<AppState>) -> (StatusCode, Json<WebhookConfig>) {
    (StatusCode::CREATED, Json(state.settings.add_webhook().await))
}

/// `PATCH /api/settings/webhooks/:id`
pub async fn update_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<WebhookPatch>,
) -> Result<Json<WebhookConfig>, ApiError> {
    state
        .settings
        .update_webhook(id, body)
        .await
        .map(Json)
        .map_err(|e| settings_error_to_api(&e))
}

/// `DELETE /api/settings/webhooks/:id`
pub async fn delete_webhook(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state
        .settings
        .delete_webhook(id)
        .await
        .map_err(|e| settings_error_to_api(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/settings/webhooks/:id/test`
pub async fn test_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConnectionTestResult>, ApiError> {
    state
        .settings
        .test_webhook(id)
        .await
        .map(Json)
        .map_err(|e| settings_error_to_api(&e))
}

fn parse_service(raw: &str) -> Result<Service, ApiError> {
    raw.parse().map_err(|e| settings_error_to_api(&e))
}

pub(crate) fn settings_error_to_api(err: &SettingsError) -> ApiError {
    let status = match err {
        SettingsError::UnknownService(_) | SettingsError::WebhookNotFound(_) => StatusCode::NOT_FOUND,
        SettingsError::ServiceMismatch { .. } | SettingsError::UnknownWebhookEvent(_) => StatusCode::BAD_REQUEST,
    };
    ApiError::from_err(status, err)
}
