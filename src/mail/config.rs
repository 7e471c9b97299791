//! Mail configuration parsed from environment variables.

use crate::config::{env_parse, env_string};

pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_EMAIL_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMAIL_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_url: String,
}

/// Which transport carries outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    EmailJs(EmailJsConfig),
    Endpoint { url: String },
    /// Nothing configured: log the email and report a simulated success.
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub transport: TransportConfig,
    pub timeouts: MailTimeouts,
}

impl MailConfig {
    /// Build typed mail config from environment variables.
    ///
    /// EmailJS wins when all of `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID`
    /// and `EMAILJS_PUBLIC_KEY` are set; otherwise `EMAIL_API_ENDPOINT` is
    /// used if set; otherwise emails are only logged.
    ///
    /// Optional:
    /// - `EMAILJS_API_URL`: default EmailJS send endpoint
    /// - `EMAIL_REQUEST_TIMEOUT_SECS`: default 30
    /// - `EMAIL_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let emailjs = match (
            env_string("EMAILJS_SERVICE_ID"),
            env_string("EMAILJS_TEMPLATE_ID"),
            env_string("EMAILJS_PUBLIC_KEY"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(EmailJsConfig {
                service_id,
                template_id,
                public_key,
                api_url: env_string("EMAILJS_API_URL").unwrap_or_else(|| DEFAULT_EMAILJS_API_URL.to_owned()),
            }),
            _ => None,
        };

        let transport = match (emailjs, env_string("EMAIL_API_ENDPOINT")) {
            (Some(cfg), _) => TransportConfig::EmailJs(cfg),
            (None, Some(url)) => TransportConfig::Endpoint { url },
            (None, None) => TransportConfig::Log,
        };

        let timeouts = MailTimeouts {
            request_secs: env_parse("EMAIL_REQUEST_TIMEOUT_SECS", DEFAULT_EMAIL_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("EMAIL_CONNECT_TIMEOUT_SECS", DEFAULT_EMAIL_CONNECT_TIMEOUT_SECS),
        };

        Self { transport, timeouts }
    }

    /// Log-only config with default timeouts.
    #[cfg(test)]
    #[must_use]
    pub fn log_only() -> Self {
        Self {
            transport: TransportConfig::Log,
            timeouts: MailTimeouts {
                request_secs: DEFAULT_EMAIL_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_EMAIL_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
