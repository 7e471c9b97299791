//! Assistant types: chat messages and report/email requests.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize};

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// CHAT MESSAGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One entry in a chat session. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Milliseconds since Unix epoch. Set automatically at construction.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), timestamp: now_ms(), attachments: None }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = Some(attachments);
        self
    }
}

// =============================================================================
// REPORT REQUESTS
// =============================================================================

/// Report kinds the generator knows about. Unrecognised names fall back to
/// [`ReportType::Sales`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Sales,
    Customers,
    Performance,
    Revenue,
    Orders,
    Custom,
}

impl ReportType {
    pub const ALL: [Self; 6] =
        [Self::Sales, Self::Customers, Self::Performance, Self::Revenue, Self::Orders, Self::Custom];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Customers => "customers",
            Self::Performance => "performance",
            Self::Revenue => "revenue",
            Self::Orders => "orders",
            Self::Custom => "custom",
        }
    }

    /// Capitalised name used in subjects and chat summaries (`"Customers"`).
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Customers => "Customers",
            Self::Performance => "Performance",
            Self::Revenue => "Revenue",
            Self::Orders => "Orders",
            Self::Custom => "Custom",
        }
    }

    #[must_use]
    pub fn from_name(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(Self::Sales)
    }
}

impl<'de> Deserialize<'de> for ReportType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

/// Output encodings. Unrecognised names fall back to [`ReportFormat::Pdf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
    Pdf,
}

impl ReportFormat {
    pub const ALL: [Self; 3] = [Self::Json, Self::Csv, Self::Pdf];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub fn upper(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
            Self::Pdf => "PDF",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            // Placeholder text, not a real PDF document.
            Self::Pdf => "text/plain",
        }
    }

    #[must_use]
    pub fn from_name(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(Self::Pdf)
    }
}

impl<'de> Deserialize<'de> for ReportFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub format: ReportFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl ReportRequest {
    #[must_use]
    pub fn new(kind: ReportType, format: ReportFormat) -> Self {
        Self { kind, format, date_range: None }
    }

    /// Attachment filename, e.g. `sales_report.csv`.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}_report.{}", self.kind.as_str(), self.format.as_str())
    }

    /// Human label, e.g. `Sales Report (CSV)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} Report ({})", self.kind.title(), self.format.upper())
    }
}

// =============================================================================
// EMAIL REQUESTS
// =============================================================================

/// An email carrying generated reports. Built from one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub attachments: Vec<ReportRequest>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
