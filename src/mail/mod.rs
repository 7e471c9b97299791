//! Mail: deliver generated reports by email.
//!
//! DESIGN
//! ======
//! `Mailer` renders every attached report, then hands the email to one
//! `MailTransport` chosen at start-up from environment variables: EmailJS,
//! a generic multipart endpoint, or a log-only fallback that simulates
//! success. Delivery failures never escape as errors; they come back as a
//! `SendOutcome` with `success = false` so the chat can show them. There is
//! no retry; the user resends by hand.

pub mod config;
pub mod emailjs;
pub mod endpoint;
pub mod log;
pub mod types;

#[cfg(test)]
pub(crate) mod test_server;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::assistant::report::generate_report;
use crate::assistant::types::EmailRequest;
use config::{MailConfig, TransportConfig};
pub use types::{Delivery, MailError, MailTransport, SendOutcome};

const SIMULATION_NOTE: &str = "Note: This is a simulation. Configure EmailJS or backend API for real emails.";

#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    report_delay: Duration,
}

impl Mailer {
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>, report_delay: Duration) -> Self {
        Self { transport, report_delay }
    }

    /// Build the transport described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for a remote transport fails to build.
    pub fn from_config(config: MailConfig, report_delay: Duration) -> Result<Self, MailError> {
        let transport: Arc<dyn MailTransport> = match config.transport {
            TransportConfig::EmailJs(cfg) => Arc::new(emailjs::EmailJsTransport::new(cfg, config.timeouts)?),
            TransportConfig::Endpoint { url } => Arc::new(endpoint::EndpointTransport::new(url, config.timeouts)?),
            TransportConfig::Log => Arc::new(log::LogTransport),
        };
        Ok(Self::new(transport, report_delay))
    }

    #[must_use]
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Render the attached reports and deliver them. Never fails; problems
    /// are reported in the returned outcome.
    pub async fn send_with_reports(&self, email: &EmailRequest) -> SendOutcome {
        if email.attachments.is_empty() {
            return SendOutcome::failed(&MailError::NoAttachments);
        }

        let reports = join_all(
            email
                .attachments
                .iter()
                .map(|att| generate_report(att, self.report_delay)),
        )
        .await;

        let transport = self.transport.name();
        match self.transport.deliver(email, &reports).await {
            Ok(delivery) => {
                info!(to = %email.to, transport, attachments = reports.len(), ?delivery, "mail: delivered");
                success_outcome(email, delivery)
            }
            Err(e) => {
                warn!(to = %email.to, transport, error = %e, "mail: delivery failed");
                SendOutcome::failed(&e)
            }
        }
    }
}

fn success_outcome(email: &EmailRequest, delivery: Delivery) -> SendOutcome {
    let sent = format!(
        "Email sent successfully to {} with {} report(s) attached",
        email.to,
        email.attachments.len()
    );
    match delivery {
        Delivery::Sent => SendOutcome { success: true, message: sent, simulated: false },
        Delivery::Simulated => SendOutcome { success: true, message: format!("{sent}. {SIMULATION_NOTE}"), simulated: true },
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
