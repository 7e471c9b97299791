//! Chat session routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::assistant::types::EmailRequest;
use crate::error::ApiError;
use crate::services::chat::{self, ChatError, EmailConfirmation, SendResult};
use crate::services::session::ChatSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SendMessageBody {
    pub content: String,
}

/// `POST /api/chat/sessions`: open a session seeded with the greeting.
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<ChatSession>) {
    (StatusCode::CREATED, Json(state.sessions.create()))
}

/// `GET /api/chat/sessions/:id`: full conversation history.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>, ApiError> {
    state
        .sessions
        .get(id)
        .map(Json)
        .ok_or_else(|| chat_error_to_api(&ChatError::SessionNotFound(id)))
}

/// `POST /api/chat/sessions/:id/messages`: reply or email draft.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<SendResult>, ApiError> {
    chat::send_message(&state, id, &body.content)
        .await
        .map(Json)
        .map_err(|e| chat_error_to_api(&e))
}

/// `POST /api/chat/sessions/:id/email`: confirm and deliver a draft.
pub async fn confirm_email(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<EmailConfirmation>, ApiError> {
    chat::confirm_email(&state, id, body)
        .await
        .map(Json)
        .map_err(|e| chat_error_to_api(&e))
}

pub(crate) fn chat_error_to_api(err: &ChatError) -> ApiError {
    let status = match err {
        ChatError::EmptyMessage | ChatError::InvalidRecipient(_) => StatusCode::BAD_REQUEST,
        ChatError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ChatError::Busy(_) => StatusCode::CONFLICT,
    };
    ApiError::from_err(status, err)
}
