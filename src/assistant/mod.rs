//! Assistant: rule-based chat logic for the dashboard.
//!
//! DESIGN
//! ======
//! Everything here is a pure function of its input plus an optional
//! simulated delay. `intent` recognises "email me a report" requests,
//! `report` renders the static example reports, and `replies` picks a canned
//! help text for everything else. No model call is made anywhere.

pub mod intent;
pub mod replies;
pub mod report;
pub mod types;

use std::time::Duration;

const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
const DEFAULT_REPORT_DELAY_MS: u64 = 500;

/// Simulated latencies for canned replies and report generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantTiming {
    pub reply_delay: Duration,
    pub report_delay: Duration,
}

impl AssistantTiming {
    /// Read `ASSISTANT_REPLY_DELAY_MS` and `ASSISTANT_REPORT_DELAY_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            reply_delay: Duration::from_millis(crate::config::env_parse(
                "ASSISTANT_REPLY_DELAY_MS",
                DEFAULT_REPLY_DELAY_MS,
            )),
            report_delay: Duration::from_millis(crate::config::env_parse(
                "ASSISTANT_REPORT_DELAY_MS",
                DEFAULT_REPORT_DELAY_MS,
            )),
        }
    }

    /// No delays at all.
    #[cfg(test)]
    #[must_use]
    pub fn instant() -> Self {
        Self { reply_delay: Duration::ZERO, report_delay: Duration::ZERO }
    }
}

impl Default for AssistantTiming {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            report_delay: Duration::from_millis(DEFAULT_REPORT_DELAY_MS),
        }
    }
}
