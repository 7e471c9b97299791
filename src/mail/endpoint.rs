//! Generic HTTP email endpoint.
//!
//! Posts a multipart form (`to`, `subject`, `body`, and one `attachments`
//! file part per report) to a backend that does the actual sending. Only
//! 200 and 201 count as accepted.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::config::MailTimeouts;
use super::types::{Delivery, MailError, MailTransport};
use crate::assistant::report::GeneratedReport;
use crate::assistant::types::EmailRequest;

const ATTACHMENT_MIME: &str = "text/plain";

pub struct EndpointTransport {
    http: reqwest::Client,
    url: String,
}

impl EndpointTransport {
    /// Client for the endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(url: String, timeouts: MailTimeouts) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| MailError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }
}

/// Whether the endpoint accepted the email.
#[must_use]
pub fn is_accepted(status: u16) -> bool {
    matches!(status, 200 | 201)
}

fn build_form(email: &EmailRequest, reports: &[GeneratedReport]) -> Result<Form, MailError> {
    let mut form = Form::new()
        .text("to", email.to.clone())
        .text("subject", email.subject.clone())
        .text("body", email.body.clone());

    for report in reports {
        let part = Part::text(report.content.clone())
            .file_name(report.filename.clone())
            .mime_str(ATTACHMENT_MIME)
            .map_err(|e| MailError::Endpoint(e.to_string()))?;
        form = form.part("attachments", part);
    }
    Ok(form)
}

#[async_trait::async_trait]
impl MailTransport for EndpointTransport {
    fn name(&self) -> &'static str {
        "endpoint"
    }

    async fn deliver(&self, email: &EmailRequest, reports: &[GeneratedReport]) -> Result<Delivery, MailError> {
        let form = build_form(email, reports)?;

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MailError::Endpoint(e.to_string()))?;

        let status = response.status().as_u16();
        if !is_accepted(status) {
            return Err(MailError::Endpoint(format!("API returned status {status}")));
        }
        Ok(Delivery::Sent)
    }
}

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod tests;
