//! Application configuration module
//!
//! Configuration is read from the environment (after `.env` is loaded) and
//! can be overlaid from a TOML file named by `IDEADROP_CONFIG`. Values in
//! the file win over the environment.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_VAR: &str = "IDEADROP_CONFIG";

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
    /// PostgreSQL URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// HMAC secret for verifying bearer tokens
    pub jwt_secret: String,
    /// Buffer size of the realtime broadcast channel
    pub realtime_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            realtime_capacity: 1000,
        }
    }
}

/// Shape of the optional TOML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bind_address: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    realtime_capacity: Option<usize>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment and, if
    /// `IDEADROP_CONFIG` is set, the TOML file it names
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_env()?;
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.is_empty() => config.overlay_file(path),
            _ => {
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Build configuration from environment variables
    ///
    /// Reads `BIND_ADDRESS`, `SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`
    /// and `REALTIME_CAPACITY`; anything unset keeps its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Some(addr) = lookup("BIND_ADDRESS") {
            builder = builder.bind_address(addr);
        }
        if let Some(raw) = lookup("SERVER_PORT") {
            let port = raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "SERVER_PORT", value: raw })?;
            builder = builder.port(port);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(raw) = lookup("REALTIME_CAPACITY") {
            let capacity = raw
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue { key: "REALTIME_CAPACITY", value: raw })?;
            builder = builder.realtime_capacity(capacity);
        }
        builder.build()
    }

    /// Overlay values from a TOML file onto this configuration
    pub fn overlay_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            message: e.to_string(),
        })?;
        self.overlay_toml(&text)
    }

    /// Overlay values from TOML text onto this configuration
    pub fn overlay_toml(mut self, text: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(text)?;
        if let Some(addr) = file.bind_address {
            self.bind_address = addr;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(url) = file.database_url {
            self.database_url = Some(url);
        }
        if let Some(secret) = file.jwt_secret {
            self.jwt_secret = secret;
        }
        if let Some(capacity) = file.realtime_capacity {
            self.realtime_capacity = capacity;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.realtime_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "realtime_capacity",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Whether the token secret is still the built-in development value
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// `host:port` string for binding the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    bind_address: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    realtime_capacity: Option<usize>,
}

impl AppConfigBuilder {
    pub fn bind_address(mut self, addr: impl Into<String>) -> Self {
        self.bind_address = Some(addr.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn realtime_capacity(mut self, capacity: usize) -> Self {
        self.realtime_capacity = Some(capacity);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            bind_address: self.bind_address.unwrap_or(defaults.bind_address),
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            realtime_capacity: self.realtime_capacity.unwrap_or(defaults.realtime_capacity),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
