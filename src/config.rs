use crate::console::digest::{Credentials, NonceCountMode};
use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>()
        .map_err(|err| ConfigError::env_parse(format!("AppConfig: {}", err)))
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    250
}

#[derive(Deserialize, Clone)]
pub struct ConsoleConfig {
    pub url: String,
    pub user: String,
    #[serde(rename = "pass")]
    pub password: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub nonce_count: NonceCountMode,
    // extra attempts after the first one, transient failures only
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("nonce_count", &self.nonce_count)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl ConsoleConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.user.clone(), self.password.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

pub(crate) fn load_console_config() -> Result<ConsoleConfig, ConfigError> {
    let config = envy::prefixed("FUJITSU_")
        .from_env::<ConsoleConfig>()
        .map_err(|err| ConfigError::env_parse(format!("ConsoleConfig: {}", err)))?;
    if config.timeout_seconds == 0 {
        return Err(ConfigError::invalid(
            "FUJITSU_TIMEOUT_SECONDS",
            "must be greater than zero",
        ));
    }
    Ok(config)
}

fn default_listen_address() -> String {
    "0.0.0.0:9900".to_string()
}

#[derive(Deserialize, Debug)]
pub struct ExporterConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

impl ExporterConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_address
            .parse()
            .map_err(|e| ConfigError::invalid("EXPORTER_LISTEN_ADDRESS", format!("{}", e)))
    }
}

pub fn load_exporter_config() -> Result<ExporterConfig, ConfigError> {
    envy::prefixed("EXPORTER_")
        .from_env::<ExporterConfig>()
        .map_err(|err| ConfigError::env_parse(format!("ExporterConfig: {}", err)))
}
