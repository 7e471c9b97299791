//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session bookkeeping and orchestration so route
//! handlers can stay focused on request/response translation.

pub mod chat;
pub mod session;
