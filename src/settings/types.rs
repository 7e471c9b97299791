//! Settings types: integration configs and webhooks.
//!
//! Each integration keeps its own field shape. `IntegrationConfig` is the
//! tagged union used on the wire (`"service": "new_relic"`), so a config can
//! never be written into the wrong service's slot.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("config for {body} sent to {path}")]
    ServiceMismatch { path: Service, body: Service },
    #[error("webhook not found: {0}")]
    WebhookNotFound(Uuid),
    #[error("unknown webhook event: {0}")]
    UnknownWebhookEvent(String),
}

impl crate::error::ErrorCode for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownService(_) => "E_UNKNOWN_SERVICE",
            Self::ServiceMismatch { .. } => "E_SERVICE_MISMATCH",
            Self::WebhookNotFound(_) => "E_WEBHOOK_NOT_FOUND",
            Self::UnknownWebhookEvent(_) => "E_UNKNOWN_WEBHOOK_EVENT",
        }
    }
}

// =============================================================================
// SERVICES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Tableau,
    NewRelic,
    Jira,
    BlueShift,
    BlueTriangle,
}

impl Service {
    pub const ALL: [Self; 5] = [Self::Tableau, Self::NewRelic, Self::Jira, Self::BlueShift, Self::BlueTriangle];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tableau => "tableau",
            Self::NewRelic => "new_relic",
            Self::Jira => "jira",
            Self::BlueShift => "blue_shift",
            Self::BlueTriangle => "blue_triangle",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .ok_or_else(|| SettingsError::UnknownService(raw.to_owned()))
    }
}

// =============================================================================
// INTEGRATIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableauConfig {
    pub enabled: bool,
    pub server_url: String,
    pub site_id: String,
    pub username: String,
    pub password: String,
    pub api_version: String,
}

impl Default for TableauConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server_url: String::new(),
            site_id: String::new(),
            username: String::new(),
            password: String::new(),
            api_version: "3.9".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRelicConfig {
    pub enabled: bool,
    pub api_key: String,
    pub account_id: String,
    pub region: String,
}

impl Default for NewRelicConfig {
    fn default() -> Self {
        Self { enabled: false, api_key: String::new(), account_id: String::new(), region: "US".into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub enabled: bool,
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub project_key: String,
}

/// Shape shared by the BlueShift and Blue Triangle integrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyConfig {
    pub enabled: bool,
    pub api_key: String,
    pub account_id: String,
    pub endpoint: String,
}

impl ApiKeyConfig {
    #[must_use]
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self { enabled: false, api_key: String::new(), account_id: String::new(), endpoint: endpoint.into() }
    }
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self::with_endpoint("")
    }
}

pub const BLUESHIFT_DEFAULT_ENDPOINT: &str = "https://api.blueshift.com";
pub const BLUETRIANGLE_DEFAULT_ENDPOINT: &str = "https://api.bluetriangle.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum IntegrationConfig {
    Tableau(TableauConfig),
    NewRelic(NewRelicConfig),
    Jira(JiraConfig),
    BlueShift(ApiKeyConfig),
    BlueTriangle(ApiKeyConfig),
}

fn blank(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

impl IntegrationConfig {
    #[must_use]
    pub fn service(&self) -> Service {
        match self {
            Self::Tableau(_) => Service::Tableau,
            Self::NewRelic(_) => Service::NewRelic,
            Self::Jira(_) => Service::Jira,
            Self::BlueShift(_) => Service::BlueShift,
            Self::BlueTriangle(_) => Service::BlueTriangle,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        match self {
            Self::Tableau(c) => c.enabled,
            Self::NewRelic(c) => c.enabled,
            Self::Jira(c) => c.enabled,
            Self::BlueShift(c) | Self::BlueTriangle(c) => c.enabled,
        }
    }

    /// Required fields that are still blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match self {
            Self::Tableau(c) => blank(&[
                ("server_url", c.server_url.as_str()),
                ("site_id", c.site_id.as_str()),
                ("username", c.username.as_str()),
                ("password", c.password.as_str()),
            ]),
            Self::NewRelic(c) => blank(&[("api_key", c.api_key.as_str()), ("account_id", c.account_id.as_str())]),
            Self::Jira(c) => blank(&[
                ("base_url", c.base_url.as_str()),
                ("email", c.email.as_str()),
                ("api_token", c.api_token.as_str()),
            ]),
            Self::BlueShift(c) | Self::BlueTriangle(c) => {
                blank(&[("api_key", c.api_key.as_str()), ("account_id", c.account_id.as_str())])
            }
        }
    }
}

// =============================================================================
// WEBHOOKS
// =============================================================================

pub const WEBHOOK_EVENTS: &[&str] = &[
    "order.created",
    "order.updated",
    "customer.created",
    "customer.updated",
    "payment.processed",
    "inventory.low",
    "performance.alert",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub events: Vec<String>,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl WebhookConfig {
    /// A fresh, enabled webhook with nothing filled in.
    #[must_use]
    pub fn blank() -> Self {
        Self { id: Uuid::new_v4(), name: String::new(), url: String::new(), events: Vec::new(), enabled: true, secret: None }
    }

    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank(&[("name", self.name.as_str()), ("url", self.url.as_str())])
    }
}

/// Partial update for a webhook. Absent fields are left unchanged; an empty
/// `secret` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub events: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub secret: Option<String>,
}

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsState {
    pub tableau: TableauConfig,
    pub new_relic: NewRelicConfig,
    pub jira: JiraConfig,
    pub blue_shift: ApiKeyConfig,
    pub blue_triangle: ApiKeyConfig,
    pub webhooks: Vec<WebhookConfig>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            tableau: TableauConfig::default(),
            new_relic: NewRelicConfig::default(),
            jira: JiraConfig::default(),
            blue_shift: ApiKeyConfig::with_endpoint(BLUESHIFT_DEFAULT_ENDPOINT),
            blue_triangle: ApiKeyConfig::with_endpoint(BLUETRIANGLE_DEFAULT_ENDPOINT),
            webhooks: Vec::new(),
        }
    }
}

impl SettingsState {
    #[must_use]
    pub fn integration(&self, service: Service) -> IntegrationConfig {
        match service {
            Service::Tableau => IntegrationConfig::Tableau(self.tableau.clone()),
            Service::NewRelic => IntegrationConfig::NewRelic(self.new_relic.clone()),
            Service::Jira => IntegrationConfig::Jira(self.jira.clone()),
            Service::BlueShift => IntegrationConfig::BlueShift(self.blue_shift.clone()),
            Service::BlueTriangle => IntegrationConfig::BlueTriangle(self.blue_triangle.clone()),
        }
    }

    pub fn replace_integration(&mut self, config: IntegrationConfig) {
        match config {
            IntegrationConfig::Tableau(c) => self.tableau = c,
            IntegrationConfig::NewRelic(c) => self.new_relic = c,
            IntegrationConfig::Jira(c) => self.jira = c,
            IntegrationConfig::BlueShift(c) => self.blue_shift = c,
            IntegrationConfig::BlueTriangle(c) => self.blue_triangle = c,
        }
    }

    pub fn set_enabled(&mut self, service: Service, enabled: bool) {
        match service {
            Service::Tableau => self.tableau.enabled = enabled,
            Service::NewRelic => self.new_relic.enabled = enabled,
            Service::Jira => self.jira.enabled = enabled,
            Service::BlueShift => self.blue_shift.enabled = enabled,
            Service::BlueTriangle => self.blue_triangle.enabled = enabled,
        }
    }

    #[must_use]
    pub fn enabled_services(&self) -> Vec<Service> {
        Service::ALL
            .into_iter()
            .filter(|s| self.integration(*s).enabled())
            .collect()
    }

    #[must_use]
    pub fn webhook(&self, id: Uuid) -> Option<&WebhookConfig> {
        self.webhooks.iter().find(|w| w.id == id)
    }

    pub fn add_webhook(&mut self) -> WebhookConfig {
        let webhook = WebhookConfig::blank();
        self.webhooks.push(webhook.clone());
        webhook
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Fails if the webhook does not exist or an event name is not one of
    /// [`WEBHOOK_EVENTS`]. Nothing is changed on failure.
    pub fn update_webhook(&mut self, id: Uuid, patch: WebhookPatch) -> Result<WebhookConfig, SettingsError> {
        if let Some(events) = &patch.events {
            if let Some(bad) = events.iter().find(|e| !WEBHOOK_EVENTS.contains(&e.as_str())) {
                return Err(SettingsError::UnknownWebhookEvent(bad.clone()));
            }
        }

        let webhook = self
            .webhooks
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(SettingsError::WebhookNotFound(id))?;

        if let Some(name) = patch.name {
            webhook.name = name;
        }
        if let Some(url) = patch.url {
            webhook.url = url;
        }
        if let Some(events) = patch.events {
            let mut unique: Vec<String> = Vec::with_capacity(events.len());
            for event in events {
                if !unique.contains(&event) {
                    unique.push(event);
                }
            }
            webhook.events = unique;
        }
        if let Some(enabled) = patch.enabled {
            webhook.enabled = enabled;
        }
        if let Some(secret) = patch.secret {
            webhook.secret = Some(secret).filter(|s| !s.is_empty());
        }
        Ok(webhook.clone())
    }

    /// Remove a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::WebhookNotFound`] if no webhook has `id`.
    pub fn delete_webhook(&mut self, id: Uuid) -> Result<(), SettingsError> {
        let before = self.webhooks.len();
        self.webhooks.retain(|w| w.id != id);
        if self.webhooks.len() == before {
            return Err(SettingsError::WebhookNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
