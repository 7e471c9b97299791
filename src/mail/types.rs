//! Mail types: transport trait, delivery results and errors.

use serde::Serialize;

use crate::assistant::report::GeneratedReport;
use crate::assistant::types::EmailRequest;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while delivering an email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The email request carried no report attachments.
    #[error("No reports to attach")]
    NoAttachments,

    /// The EmailJS API rejected the request or could not be reached.
    #[error("EmailJS error: {0}")]
    EmailJs(String),

    /// The generic email endpoint rejected the request or could not be reached.
    #[error("API error: {0}")]
    Endpoint(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl crate::error::ErrorCode for MailError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoAttachments => "E_NO_ATTACHMENTS",
            Self::EmailJs(_) => "E_EMAILJS",
            Self::Endpoint(_) => "E_EMAIL_ENDPOINT",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::EmailJs(_) | Self::Endpoint(_))
    }
}

// =============================================================================
// DELIVERY
// =============================================================================

/// How a successful delivery was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to a real email service.
    Sent,
    /// Logged only; no email left the process.
    Simulated,
}

/// User-facing result of a send attempt. Failures are folded in here rather
/// than returned as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub simulated: bool,
}

impl SendOutcome {
    #[must_use]
    pub fn failed(err: &MailError) -> Self {
        Self { success: false, message: err.to_string(), simulated: false }
    }
}

/// A way of getting an email with rendered reports to its recipient.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Short transport name for logs (`"emailjs"`, `"endpoint"`, `"log"`).
    fn name(&self) -> &'static str;

    async fn deliver(&self, email: &EmailRequest, reports: &[GeneratedReport]) -> Result<Delivery, MailError>;
}
