//! EmailJS REST client.
//!
//! Thin HTTP wrapper for the EmailJS `email/send` endpoint. Reports travel
//! inline in the template's `message` parameter. Payload building is pure
//! for testability.

use std::time::Duration;

use serde::Serialize;

use super::config::{EmailJsConfig, MailTimeouts};
use super::types::{Delivery, MailError, MailTransport};
use crate::assistant::report::GeneratedReport;
use crate::assistant::types::EmailRequest;

const FROM_NAME: &str = "E-Commerce Dashboard";
const REPLY_TO: &str = "dashboard@company.com";

// =============================================================================
// CLIENT
// =============================================================================

pub struct EmailJsTransport {
    http: reqwest::Client,
    config: EmailJsConfig,
}

impl EmailJsTransport {
    /// # Errors
    ///
    /// Returns [`MailError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: EmailJsConfig, timeouts: MailTimeouts) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| MailError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl MailTransport for EmailJsTransport {
    fn name(&self) -> &'static str {
        "emailjs"
    }

    async fn deliver(&self, email: &EmailRequest, reports: &[GeneratedReport]) -> Result<Delivery, MailError> {
        let body = build_payload(&self.config, email, reports);

        let response = self
            .http
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::EmailJs(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(Delivery::Sent);
        }

        let text = response.text().await.unwrap_or_default();
        Err(MailError::EmailJs(format!("status {}: {}", status.as_u16(), text.trim())))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SendPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TemplateParams<'a> {
    to_email: &'a str,
    subject: &'a str,
    message: String,
    from_name: &'static str,
    reply_to: &'static str,
}

/// Inline text for all reports: a titled section per report, separated by
/// `---` rules.
#[must_use]
pub fn report_text(reports: &[GeneratedReport]) -> String {
    reports
        .iter()
        .map(|r| format!("\n\n{} Report ({}):\n{}", r.kind.title(), r.format.upper(), r.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n")
}

pub(crate) fn build_payload<'a>(
    config: &'a EmailJsConfig,
    email: &'a EmailRequest,
    reports: &[GeneratedReport],
) -> SendPayload<'a> {
    SendPayload {
        service_id: &config.service_id,
        template_id: &config.template_id,
        user_id: &config.public_key,
        template_params: TemplateParams {
            to_email: &email.to,
            subject: &email.subject,
            message: format!("{}{}", email.body, report_text(reports)),
            from_name: FROM_NAME,
            reply_to: REPLY_TO,
        },
    }
}

#[cfg(test)]
#[path = "emailjs_test.rs"]
mod tests;
