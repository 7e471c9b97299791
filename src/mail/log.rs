//! Log-only transport used when no email service is configured.

use tracing::info;

use super::types::{Delivery, MailError, MailTransport};
use crate::assistant::report::GeneratedReport;
use crate::assistant::types::EmailRequest;

const PREVIEW_CHARS: usize = 100;

/// First 100 characters of a report followed by `...`.
#[must_use]
pub fn preview(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

pub struct LogTransport;

#[async_trait::async_trait]
impl MailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, email: &EmailRequest, reports: &[GeneratedReport]) -> Result<Delivery, MailError> {
        for report in reports {
            info!(
                to = %email.to,
                filename = %report.filename,
                preview = %preview(&report.content),
                "mail: simulated attachment"
            );
        }
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            attachments = reports.len(),
            "mail: email not sent (no transport configured)"
        );
        Ok(Delivery::Simulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::types::{ReportFormat, ReportRequest, ReportType};

    #[test]
    fn preview_truncates_long_content() {
        let long = "x".repeat(250);
        let p = preview(&long);
        assert_eq!(p.len(), 103);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn preview_keeps_short_content() {
        assert_eq!(preview("total,850"), "total,850...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "é".repeat(150);
        assert_eq!(preview(&text).chars().count(), 103);
    }

    #[tokio::test]
    async fn log_transport_simulates() {
        let email = EmailRequest {
            to: "a@b.com".into(),
            subject: "Sales Report".into(),
            body: "body".into(),
            attachments: vec![ReportRequest::new(ReportType::Sales, ReportFormat::Json)],
        };
        let reports: Vec<GeneratedReport> = email.attachments.iter().map(GeneratedReport::render).collect();
        let delivery = LogTransport.deliver(&email, &reports).await.unwrap();
        assert_eq!(delivery, Delivery::Simulated);
    }
}
