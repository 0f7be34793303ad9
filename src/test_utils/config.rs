//! Configuration utilities for testing.

use crate::config::ConsoleConfig;
use crate::console::digest::NonceCountMode;

/// Builder for test console configurations.
///
/// Retries are off by default so failure tests see exactly one attempt.
#[derive(Debug)]
pub struct TestConsoleConfigBuilder {
    url: String,
    user: String,
    password: String,
    timeout_seconds: u64,
    nonce_count: NonceCountMode,
    retry_attempts: u32,
    retry_backoff_ms: u64,
}

impl TestConsoleConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://irmc.test".to_string(),
            user: "admin".to_string(),
            password: "test_password".to_string(),
            timeout_seconds: 5,
            nonce_count: NonceCountMode::Fixed,
            retry_attempts: 0,
            retry_backoff_ms: 1,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_nonce_count(mut self, mode: NonceCountMode) -> Self {
        self.nonce_count = mode;
        self
    }

    /// Sets the extra attempts and the initial backoff in milliseconds.
    pub fn with_retries(mut self, attempts: u32, backoff_ms: u64) -> Self {
        self.retry_attempts = attempts;
        self.retry_backoff_ms = backoff_ms;
        self
    }

    pub fn build(self) -> ConsoleConfig {
        ConsoleConfig {
            url: self.url,
            user: self.user,
            password: self.password,
            timeout_seconds: self.timeout_seconds,
            nonce_count: self.nonce_count,
            retry_attempts: self.retry_attempts,
            retry_backoff_ms: self.retry_backoff_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_console_config_builder() {
        let config = TestConsoleConfigBuilder::new()
            .with_url("http://custom.local")
            .with_user("operator")
            .with_password("custom_pass")
            .with_timeout_seconds(2)
            .with_nonce_count(NonceCountMode::PerNonce)
            .with_retries(3, 10)
            .build();

        assert_eq!(config.url, "http://custom.local");
        assert_eq!(config.user, "operator");
        assert_eq!(config.password, "custom_pass");
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.nonce_count, NonceCountMode::PerNonce);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff(), Duration::from_millis(10));
    }

    #[test]
    fn test_console_config_builder_defaults() {
        let config = TestConsoleConfigBuilder::new().build();
        assert_eq!(config.retry_attempts, 0);
        assert_eq!(config.nonce_count, NonceCountMode::Fixed);
    }
}
