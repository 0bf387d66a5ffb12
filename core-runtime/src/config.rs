//! # Core Configuration Module
//!
//! Configuration management for the Canta core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the hosted-backend settings needed by the core. It
//! enforces fail-fast validation so a misconfigured host surfaces at startup
//! rather than on the first request.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .backend_url("https://abc.supabase.co")
//!     .anon_key("public-anon-key")
//!     .default_user_id("user-1")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! On desktop shells and in integration tests the same settings can come from
//! the environment via [`CoreConfig::from_env`].

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "CANTA_BACKEND_URL";
/// Environment variable holding the backend anon key.
pub const ENV_BACKEND_ANON_KEY: &str = "CANTA_BACKEND_ANON_KEY";
/// Environment variable holding the default user id.
pub const ENV_USER_ID: &str = "CANTA_USER_ID";

/// Core configuration for the Canta core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Base URL of the hosted backend, without a trailing slash.
    pub backend_url: String,

    /// Public anon key sent with backend requests.
    pub anon_key: String,

    /// User the library views are scoped to (playlists are per-user).
    pub default_user_id: String,

    /// Buffer size for the core event bus.
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("backend_url", &self.backend_url)
            .field("anon_key", &"[REDACTED]")
            .field("default_user_id", &self.default_user_id)
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Loads configuration from the process environment.
    ///
    /// Reads `CANTA_BACKEND_URL`, `CANTA_BACKEND_ANON_KEY` and
    /// `CANTA_USER_ID`, then runs the same validation as the builder.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| -> Result<String> {
            std::env::var(name)
                .map_err(|_| Error::Config(format!("Environment variable {} is not set", name)))
        };

        Self::builder()
            .backend_url(read(ENV_BACKEND_URL)?)
            .anon_key(read(ENV_BACKEND_ANON_KEY)?)
            .default_user_id(read(ENV_USER_ID)?)
            .build()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Backend URL is non-empty and uses http(s)
    /// - Anon key and user id are non-empty
    /// - Event buffer size is reasonable (> 0 and <= 65536)
    pub fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(Error::Config("Backend URL cannot be empty".to_string()));
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Backend URL must start with http:// or https://, got '{}'",
                self.backend_url
            )));
        }

        if self.anon_key.is_empty() {
            return Err(Error::Config("Anon key cannot be empty".to_string()));
        }

        if self.default_user_id.is_empty() {
            return Err(Error::Config("Default user id cannot be empty".to_string()));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer_size > 65_536 {
            return Err(Error::Config(
                "Event buffer size exceeds maximum of 65536".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
#[derive(Default)]
pub struct CoreConfigBuilder {
    backend_url: Option<String>,
    anon_key: Option<String>,
    default_user_id: Option<String>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Sets the backend base URL.
    ///
    /// A trailing slash is stripped so storage URL assembly stays uniform.
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.backend_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Sets the backend anon key.
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Sets the user id library views are scoped to.
    pub fn default_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.default_user_id = Some(user_id.into());
        self
    }

    /// Sets the event bus buffer size.
    ///
    /// Default: [`DEFAULT_EVENT_BUFFER_SIZE`].
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// Returns an error with an actionable message when a required field is
    /// missing or a value is invalid.
    pub fn build(self) -> Result<CoreConfig> {
        let backend_url = self.backend_url.ok_or_else(|| {
            Error::Config("Backend URL is required. Use .backend_url() to set it.".to_string())
        })?;

        let anon_key = self.anon_key.ok_or_else(|| {
            Error::Config("Anon key is required. Use .anon_key() to set it.".to_string())
        })?;

        let default_user_id = self.default_user_id.ok_or_else(|| {
            Error::Config(
                "Default user id is required. Use .default_user_id() to set it.".to_string(),
            )
        })?;

        let config = CoreConfig {
            backend_url,
            anon_key,
            default_user_id,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_builder() -> CoreConfigBuilder {
        CoreConfig::builder()
            .backend_url("https://abc.supabase.co")
            .anon_key("anon-key")
            .default_user_id("user-1")
    }

    #[test]
    fn test_builder_with_all_required_fields() {
        let config = valid_builder().build().unwrap();

        assert_eq!(config.backend_url, "https://abc.supabase.co");
        assert_eq!(config.anon_key, "anon-key");
        assert_eq!(config.default_user_id, "user-1");
        assert_eq!(config.event_buffer_size, DEFAULT_EVENT_BUFFER_SIZE);
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let config = CoreConfig::builder()
            .backend_url("https://abc.supabase.co/")
            .anon_key("anon-key")
            .default_user_id("user-1")
            .build()
            .unwrap();

        assert_eq!(config.backend_url, "https://abc.supabase.co");
    }

    #[test]
    fn test_builder_requires_backend_url() {
        let result = CoreConfig::builder()
            .anon_key("anon-key")
            .default_user_id("user-1")
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Backend URL is required"));
    }

    #[test]
    fn test_builder_requires_anon_key() {
        let result = CoreConfig::builder()
            .backend_url("https://abc.supabase.co")
            .default_user_id("user-1")
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Anon key is required"));
    }

    #[test]
    fn test_builder_requires_user_id() {
        let result = CoreConfig::builder()
            .backend_url("https://abc.supabase.co")
            .anon_key("anon-key")
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Default user id is required"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let result = CoreConfig::builder()
            .backend_url("ftp://abc.supabase.co")
            .anon_key("anon-key")
            .default_user_id("user-1")
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with http"));
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let result = valid_builder().event_buffer_size(0).build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be greater than 0"));
    }

    #[test]
    fn test_validate_rejects_excessive_buffer() {
        let result = valid_builder().event_buffer_size(1_000_000).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_custom_buffer_size() {
        let config = valid_builder().event_buffer_size(512).build().unwrap();
        assert_eq!(config.event_buffer_size, 512);
    }

    #[test]
    fn test_debug_redacts_anon_key() {
        let config = valid_builder().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("anon-key"));
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = valid_builder().build().unwrap();
        let cloned = config.clone();
        assert_eq!(cloned, config);
    }
}
