//! Application state shared across request handlers.

use std::sync::Arc;
use std::time::Instant;

use keeper_slack::UserDirectory;

use crate::client::{KeeperRepository, KeepersClient, UsersClient, build_http_client};
use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::service::KeeperService;

/// Application state shared across request handlers.
pub struct AppState {
    /// Bot configuration.
    pub config: BotConfig,
    /// HTTP client used for delayed responses.
    pub http_client: reqwest::Client,
    /// Keeper business service.
    pub service: KeeperService,
    /// Start time.
    start_time: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("start_time", &self.start_time)
            .finish()
    }
}

impl AppState {
    /// Create the state with REST clients for the configured services.
    pub fn new(config: BotConfig) -> BotResult<Self> {
        let http_client = build_http_client(config.request_timeout_duration())?;
        let users = Arc::new(UsersClient::new(http_client.clone(), &config.users));
        let keepers = Arc::new(KeepersClient::new(http_client.clone(), &config.keepers));
        Ok(Self::with_backends(config, http_client, users, keepers))
    }

    /// Create the state with explicit backends.
    pub fn with_backends(
        config: BotConfig,
        http_client: reqwest::Client,
        users: Arc<dyn UserDirectory<Error = BotError>>,
        keepers: Arc<dyn KeeperRepository>,
    ) -> Self {
        Self {
            config,
            http_client,
            service: KeeperService::new(users, keepers),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime.
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_new_state() {
        let config = BotConfig {
            slash_command_token: SecretString::new("secret".to_string().into()),
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.config.token_matches("secret"));
        assert!(state.uptime().as_secs() < 60);
        assert!(!format!("{:?}", state).contains("secret\""));
    }
}
