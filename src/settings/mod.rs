//! Settings: in-memory integration and webhook configuration.
//!
//! DESIGN
//! ======
//! Settings live only for the life of the process. "Save" logs a summary and
//! confirms; nothing is written anywhere. "Test connection" never contacts
//! the service: after a short simulated delay it succeeds only when every
//! required field for that service is filled in.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use types::{IntegrationConfig, Service, SettingsError, SettingsState, WebhookConfig, WebhookPatch};

const DEFAULT_SETTINGS_TEST_DELAY_MS: u64 = 1500;

pub const SAVED_MESSAGE: &str = "Settings saved successfully!";
pub const CONNECTION_OK: &str = "Connection successful!";
pub const CONNECTION_MISSING_FIELDS: &str = "Please fill in all required fields";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<&'static str>,
}

impl ConnectionTestResult {
    #[must_use]
    pub fn from_missing(missing: Vec<&'static str>) -> Self {
        if missing.is_empty() {
            Self { success: true, message: CONNECTION_OK.into(), missing }
        } else {
            Self { success: false, message: CONNECTION_MISSING_FIELDS.into(), missing }
        }
    }
}

/// Shared settings handle. Clone is cheap; all clones see the same state.
#[derive(Clone)]
pub struct SettingsStore {
    state: Arc<RwLock<SettingsState>>,
    test_delay: Duration,
}

impl SettingsStore {
    #[must_use]
    pub fn new(test_delay: Duration) -> Self {
        Self { state: Arc::new(RwLock::new(SettingsState::default())), test_delay }
    }

    /// Read `SETTINGS_TEST_DELAY_MS` (default 1500).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Duration::from_millis(crate::config::env_parse(
            "SETTINGS_TEST_DELAY_MS",
            DEFAULT_SETTINGS_TEST_DELAY_MS,
        )))
    }

    pub async fn snapshot(&self) -> SettingsState {
        self.state.read().await.clone()
    }

    pub async fn integration(&self, service: Service) -> IntegrationConfig {
        self.state.read().await.integration(service)
    }

    /// Replace the config of `service` with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ServiceMismatch`] if `config` belongs to a
    /// different service.
    pub async fn replace_integration(
        &self,
        service: Service,
        config: IntegrationConfig,
    ) -> Result<IntegrationConfig, SettingsError> {
        if config.service() != service {
            return Err(SettingsError::ServiceMismatch { path: service, body: config.service() });
        }
        self.state.write().await.replace_integration(config.clone());
        Ok(config)
    }

    pub async fn set_enabled(&self, service: Service, enabled: bool) -> IntegrationConfig {
        let mut state = self.state.write().await;
        state.set_enabled(service, enabled);
        state.integration(service)
    }

    /// Log what would be saved. Secrets are never logged.
    pub async fn save(&self) -> &'static str {
        let state = self.state.read().await;
        let enabled: Vec<&str> = state.enabled_services().into_iter().map(Service::as_str).collect();
        info!(?enabled, webhooks = state.webhooks.len(), "settings: saved (in memory only)");
        SAVED_MESSAGE
    }

    pub async fn test_connection(&self, service: Service) -> ConnectionTestResult {
        let config = self.integration(service).await;
        self.simulate_delay().await;
        let result = ConnectionTestResult::from_missing(config.missing_fields());
        info!(%service, success = result.success, "settings: connection test");
        result
    }

    // -------------------------------------------------------------------------
    // Webhooks
    // -------------------------------------------------------------------------

    pub async fn add_webhook(&self) -> WebhookConfig {
        self.state.write().await.add_webhook()
    }

    /// # Errors
    ///
    /// See [`SettingsState::update_webhook`].
    pub async fn update_webhook(&self, id: Uuid, patch: WebhookPatch) -> Result<WebhookConfig, SettingsError> {
        self.state.write().await.update_webhook(id, patch)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::WebhookNotFound`] if no webhook has `id`.
    pub async fn delete_webhook(&self, id: Uuid) -> Result<(), SettingsError> {
        self.state.write().await.delete_webhook(id)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::WebhookNotFound`] if no webhook has `id`.
    pub async fn test_webhook(&self, id: Uuid) -> Result<ConnectionTestResult, SettingsError> {
        let webhook = self
            .state
            .read()
            .await
            .webhook(id)
            .cloned()
            .ok_or(SettingsError::WebhookNotFound(id))?;
        self.simulate_delay().await;
        let result = ConnectionTestResult::from_missing(webhook.missing_fields());
        info!(%id, success = result.success, "settings: webhook test");
        Ok(result)
    }

    async fn simulate_delay(&self) {
        if !self.test_delay.is_zero() {
            tokio::time::sleep(self.test_delay).await;
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
