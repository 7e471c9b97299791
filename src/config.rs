//! Environment configuration helpers.
//!
//! All configuration comes from environment variables (optionally seeded
//! from a `.env` file in `main`). Typed `from_env()` constructors live next
//! to the code they configure; the shared parsing helpers live here.

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

impl crate::error::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidValue { .. } => "E_CONFIG_INVALID",
        }
    }
}

/// Parse `key` as `T`, falling back to `default` when unset or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Non-empty, trimmed value of `key`.
pub(crate) fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Listener settings for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Read `PORT` (default 3000). A set but unparsable value is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env_string("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        Ok(Self { port })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
