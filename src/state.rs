//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the chat sessions, the in-memory settings, the configured mailer
//! and the simulated latencies. Everything is in memory; nothing survives a
//! restart.

use crate::assistant::AssistantTiming;
use crate::mail::Mailer;
use crate::services::session::SessionStore;
use crate::settings::SettingsStore;

/// Clone is required by Axum; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub settings: SettingsStore,
    pub mailer: Mailer,
    pub timing: AssistantTiming,
}

impl AppState {
    #[must_use]
    pub fn new(sessions: SessionStore, settings: SettingsStore, mailer: Mailer, timing: AssistantTiming) -> Self {
        Self { sessions, settings, mailer, timing }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
