//! Canned response selector.
//!
//! The last user message is lower-cased and checked against an ordered list
//! of keyword rules. The first rule that matches picks the reply; nothing
//! matching falls through to a generic answer.

use std::time::Duration;

use super::types::{ChatMessage, Role};

pub const GREETING: &str = "Hello! I'm your dashboard assistant. I can help you:\n\n📊 Generate reports\n📧 Send emails with reports\n💬 Answer questions\n\nHow can I help?";

pub const SALES_HELP: &str = "I can help you with sales data. I can generate sales reports, show revenue trends, or send sales reports via email. What would you like to do?";

pub const CUSTOMER_HELP: &str = "I can help with customer analytics. I can generate customer reports, analyze CLV/CAC metrics, or send customer reports via email. What specific information do you need?";

pub const REPORT_EMAIL_HELP: &str = "I can generate and email reports. Please specify:\n1. Report type (sales, customers, performance, etc.)\n2. Email address\n3. Format (JSON, CSV, PDF)\n\nExample: 'Send a sales report to john@example.com in PDF format'";

pub const SEND_EMAIL_HELP: &str = "I can send emails with reports. Please provide:\n- Email address\n- Report type\n- Format (JSON/CSV/PDF)\n\nExample: 'Send sales report to manager@company.com as PDF'";

pub const REPORT_MENU: &str = "I can generate various reports:\n- Sales Report\n- Customer Report\n- Performance Report\n- Revenue Report\n- Orders Report\n\nWhat type of report would you like to generate?";

pub const CAPABILITIES: &str = "I'm your e-commerce dashboard assistant! I can:\n\n📊 Generate Reports:\n- Sales, Customers, Performance, Revenue, Orders\n\n📧 Send Emails:\n- Email reports to any address\n- Attach reports in JSON, CSV, or PDF format\n\n💬 Answer Questions:\n- Dashboard metrics and insights\n- Data analysis and trends\n\nJust ask me anything about the dashboard or request a report!";

pub const FALLBACK: &str = "I'm here to help with your e-commerce dashboard! I can generate reports, send emails with attachments, and answer questions about your data. What would you like to know?";

/// How a rule tests the lower-cased message.
enum Match {
    Any(&'static [&'static str]),
    All(&'static [&'static str]),
}

impl Match {
    fn test(&self, lower: &str) -> bool {
        match self {
            Self::Any(words) => words.iter().any(|w| lower.contains(w)),
            Self::All(words) => words.iter().all(|w| lower.contains(w)),
        }
    }
}

const RULES: &[(Match, &str)] = &[
    (Match::Any(&["sales", "revenue"]), SALES_HELP),
    (Match::Any(&["customer", "clv", "cac"]), CUSTOMER_HELP),
    (Match::All(&["report", "email"]), REPORT_EMAIL_HELP),
    (Match::All(&["send", "email"]), SEND_EMAIL_HELP),
    (Match::Any(&["generate", "create"]), REPORT_MENU),
    (Match::Any(&["help", "what can you do"]), CAPABILITIES),
];

/// Pick the reply for a single message.
#[must_use]
pub fn select_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(rule, _)| rule.test(&lower))
        .map_or(FALLBACK, |(_, reply)| *reply)
}

/// Pick the reply for a conversation, looking at its most recent user message.
#[must_use]
pub fn reply_for_history(history: &[ChatMessage]) -> &'static str {
    history
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map_or(FALLBACK, |m| select_reply(&m.content))
}

/// Answer a conversation after the simulated thinking delay.
pub async fn process_query(history: &[ChatMessage], delay: Duration) -> &'static str {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    reply_for_history(history)
}

#[cfg(test)]
#[path = "replies_test.rs"]
mod tests;
