//! Chat service: one user message in, one assistant outcome out.
//!
//! DESIGN
//! ======
//! A message that names an email address becomes an email draft for the
//! user to confirm; nothing is appended for the assistant in that case.
//! Every other message gets a canned reply after the simulated delay.
//! Confirming a draft runs mail delivery and records the result in the
//! conversation, success or failure alike.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::assistant::intent::{is_email_address, parse_email_request};
use crate::assistant::replies::process_query;
use crate::assistant::types::{ChatMessage, EmailRequest};
use crate::mail::SendOutcome;
use crate::state::AppState;

const SIMULATION_NOTICE: &str = "⚠️ Note: Email service not configured. Set the EmailJS variables or EMAIL_API_ENDPOINT to send real email.";
const CONFIGURE_HINT: &str = "To enable real email sending, please configure EmailJS or a backend API.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("a request is already in progress for session {0}")]
    Busy(Uuid),
    #[error("invalid recipient: {0:?}")]
    InvalidRecipient(String),
}

impl crate::error::ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::SessionNotFound(_) => "E_SESSION_NOT_FOUND",
            Self::Busy(_) => "E_SESSION_BUSY",
            Self::InvalidRecipient(_) => "E_INVALID_RECIPIENT",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

/// What the assistant did with a user message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SendResult {
    /// A canned reply, already appended to the session.
    Reply { message: ChatMessage },
    /// An email request awaiting confirmation.
    EmailDraft { draft: EmailRequest },
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailConfirmation {
    pub outcome: SendOutcome,
    pub message: ChatMessage,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Handle one user message on a session.
///
/// # Errors
///
/// Blank text, unknown session, or a turn already in progress.
pub async fn send_message(state: &AppState, session_id: Uuid, text: &str) -> Result<SendResult, ChatError> {
    if text.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let (turn, history) = state.sessions.begin(session_id, Some(ChatMessage::user(text)))?;
    info!(%session_id, len = text.len(), "chat: message received");

    if let Some(draft) = parse_email_request(text) {
        info!(%session_id, to = %draft.to, "chat: email intent recognised");
        drop(turn);
        return Ok(SendResult::EmailDraft { draft });
    }

    let reply = ChatMessage::assistant(process_query(&history, state.timing.reply_delay).await);
    turn.finish(reply.clone());
    Ok(SendResult::Reply { message: reply })
}

/// Deliver a confirmed email draft and record the result in the session.
///
/// # Errors
///
/// Invalid recipient, unknown session, or a turn already in progress.
/// Delivery failures are not errors; they are reported in the outcome.
pub async fn confirm_email(
    state: &AppState,
    session_id: Uuid,
    request: EmailRequest,
) -> Result<EmailConfirmation, ChatError> {
    let to = request.to.trim();
    if !is_email_address(to) {
        return Err(ChatError::InvalidRecipient(request.to));
    }
    let request = EmailRequest { to: to.to_owned(), ..request };

    let (turn, _) = state.sessions.begin(session_id, None)?;
    let outcome = state.mailer.send_with_reports(&request).await;

    let message = outcome_message(&request, &outcome);
    turn.finish(message.clone());
    Ok(EmailConfirmation { outcome, message })
}

/// The assistant's chat summary of a send attempt.
#[must_use]
pub fn outcome_message(request: &EmailRequest, outcome: &SendOutcome) -> ChatMessage {
    if !outcome.success {
        return ChatMessage::assistant(format!("❌ {}\n\n{CONFIGURE_HINT}", outcome.message));
    }

    let list = request
        .attachments
        .iter()
        .map(|att| format!("- {}", att.label()))
        .collect::<Vec<_>>()
        .join("\n");
    let mut content =
        format!("✅ {}\n\nThe email has been sent with the following reports:\n{list}", outcome.message);
    if outcome.simulated {
        content.push_str("\n\n");
        content.push_str(SIMULATION_NOTICE);
    }
    let filenames = request.attachments.iter().map(|att| att.filename()).collect();
    ChatMessage::assistant(content).with_attachments(filenames)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
