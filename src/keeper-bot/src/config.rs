//! Bot configuration.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{BotError, BotResult};

/// Bot configuration.
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Verification token Slack sends with every slash command.
    #[serde(default = "empty_secret")]
    pub slash_command_token: SecretString,

    /// Prefix of the slash command routes.
    #[serde(default = "default_commands_prefix")]
    pub commands_prefix: String,

    /// Users service endpoints.
    #[serde(default)]
    pub users: UsersServiceConfig,

    /// Keepers service endpoints.
    #[serde(default)]
    pub keepers: KeepersServiceConfig,

    /// Timeout of every outbound request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("listen_addr", &self.listen_addr)
            .field("slash_command_token", &"[REDACTED]")
            .field("commands_prefix", &self.commands_prefix)
            .field("users", &self.users)
            .field("keepers", &self.keepers)
            .field("request_timeout", &self.request_timeout)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish()
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into())
}

fn default_commands_prefix() -> String {
    "/v1".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_shutdown_timeout() -> u64 {
    30
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            slash_command_token: empty_secret(),
            commands_prefix: default_commands_prefix(),
            users: UsersServiceConfig::default(),
            keepers: KeepersServiceConfig::default(),
            request_timeout: default_request_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> BotResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| BotError::Config(format!("invalid {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load from environment variables on top of the defaults.
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BotResult<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("KEEPER_BOT_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Some(token) = lookup("KEEPER_BOT_SLASH_COMMAND_TOKEN") {
            config.slash_command_token = SecretString::new(token.into());
        }

        if let Some(prefix) = lookup("KEEPER_BOT_COMMANDS_PREFIX") {
            config.commands_prefix = prefix;
        }

        if let Some(url) = lookup("USERS_SERVICE_URL") {
            config.users.base_url = url;
        }

        if let Some(version) = lookup("USERS_API_VERSION") {
            config.users.api_version = version;
        }

        if let Some(url) = lookup("KEEPERS_SERVICE_URL") {
            config.keepers.base_url = url;
        }

        if let Some(version) = lookup("KEEPERS_API_VERSION") {
            config.keepers.api_version = version;
        }

        if let Some(timeout) = lookup("KEEPER_BOT_REQUEST_TIMEOUT") {
            config.request_timeout = timeout.parse().map_err(|_| {
                BotError::Config(format!(
                    "KEEPER_BOT_REQUEST_TIMEOUT must be a number of seconds, got '{}'",
                    timeout
                ))
            })?;
        }

        Ok(config)
    }

    /// Check the configuration before serving.
    pub fn validate(&self) -> BotResult<()> {
        if self.slash_command_token.expose_secret().trim().is_empty() {
            return Err(BotError::Config(
                "slash command token is not configured".to_string(),
            ));
        }

        for (name, url) in [
            ("users", &self.users.base_url),
            ("keepers", &self.keepers.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(BotError::Config(format!(
                    "{} service URL must start with http:// or https://, got '{}'",
                    name, url
                )));
            }
        }

        if self.request_timeout == 0 {
            return Err(BotError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `token` matches the configured slash command token.
    pub fn token_matches(&self, token: &str) -> bool {
        crate::auth::constant_time_compare(
            token.as_bytes(),
            self.slash_command_token.expose_secret().as_bytes(),
        )
    }

    /// Get request timeout as Duration.
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Users service endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersServiceConfig {
    /// Base URL (e.g., "http://users:8080").
    #[serde(default = "default_users_base_url")]
    pub base_url: String,
    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Path of the lookup by slack names.
    #[serde(default = "default_users_by_slack_names")]
    pub users_by_slack_names: String,
}

fn default_users_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_api_version() -> String {
    "/v1".to_string()
}

fn default_users_by_slack_names() -> String {
    "/users/usersBySlackNames".to_string()
}

impl Default for UsersServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_users_base_url(),
            api_version: default_api_version(),
            users_by_slack_names: default_users_by_slack_names(),
        }
    }
}

impl UsersServiceConfig {
    /// Full URL of the lookup by slack names.
    pub fn users_by_slack_names_url(&self) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.users_by_slack_names
        )
    }
}

/// Keepers service endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct KeepersServiceConfig {
    /// Base URL (e.g., "http://keepers:8080").
    #[serde(default = "default_keepers_base_url")]
    pub base_url: String,
    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Path of the keepers collection.
    #[serde(default = "default_keepers_path")]
    pub keepers: String,
}

fn default_keepers_base_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_keepers_path() -> String {
    "/keepers".to_string()
}

impl Default for KeepersServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_keepers_base_url(),
            api_version: default_api_version(),
            keepers: default_keepers_path(),
        }
    }
}

impl KeepersServiceConfig {
    /// Full URL of the keepers collection.
    pub fn keepers_url(&self) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.keepers
        )
    }
}
