//! Email intent parser.
//!
//! DESIGN
//! ======
//! A chat message is an email request only if it contains something shaped
//! like an email address. Report type and format come from ordered keyword
//! tables; the first matching row wins and anything unmatched falls back to
//! sales / PDF. No match is a normal outcome, not an error.

use std::sync::OnceLock;

use regex::Regex;

use super::types::{EmailRequest, ReportFormat, ReportRequest, ReportType};

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

/// Keyword → report type, highest priority first.
const TYPE_KEYWORDS: &[(&[&str], ReportType)] = &[
    (&["customer"], ReportType::Customers),
    (&["performance", "vital"], ReportType::Performance),
    (&["revenue"], ReportType::Revenue),
    (&["order"], ReportType::Orders),
];

/// Keyword → format, highest priority first.
const FORMAT_KEYWORDS: &[(&str, ReportFormat)] =
    &[("json", ReportFormat::Json), ("csv", ReportFormat::Csv), ("pdf", ReportFormat::Pdf)];

fn email_search() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII word boundaries, so an address flush against CJK or accented
    // letters is still found.
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?-u:\b){EMAIL_PATTERN}(?-u:\b)")).expect("email search pattern compiles")
    })
}

fn email_exact() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^{EMAIL_PATTERN}$")).expect("email exact pattern compiles"))
}

/// First email-shaped substring in `message`, verbatim.
#[must_use]
pub fn find_email(message: &str) -> Option<&str> {
    email_search().find(message).map(|m| m.as_str())
}

/// True when the whole of `candidate` is email-shaped.
#[must_use]
pub fn is_email_address(candidate: &str) -> bool {
    email_exact().is_match(candidate)
}

/// Pick the report type from a lower-cased message.
#[must_use]
pub fn detect_report_type(lower: &str) -> ReportType {
    TYPE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(ReportType::Sales, |(_, kind)| *kind)
}

/// Pick the output format from a lower-cased message.
#[must_use]
pub fn detect_format(lower: &str) -> ReportFormat {
    FORMAT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(ReportFormat::Pdf, |(_, format)| *format)
}

/// Extract an email request from a chat message.
///
/// Returns `None` when the message holds no email address; the caller then
/// treats it as an ordinary chat query.
#[must_use]
pub fn parse_email_request(message: &str) -> Option<EmailRequest> {
    let to = find_email(message)?.to_owned();
    let lower = message.to_lowercase();

    let kind = detect_report_type(&lower);
    let format = detect_format(&lower);

    Some(EmailRequest {
        to,
        subject: format!("{} Report", kind.title()),
        body: format!("Please find attached the {} report.", kind.as_str()),
        attachments: vec![ReportRequest::new(kind, format)],
    })
}

#[cfg(test)]
#[path = "intent_test.rs"]
mod tests;
