//! Users service client.

use async_trait::async_trait;
use keeper_slack::{UserDirectory, UserIdentity, normalize_handle};
use serde::Serialize;
use tracing::debug;

use super::api_error;
use crate::config::UsersServiceConfig;
use crate::error::{BotError, BotResult};

/// Looks up users by Slack name in the Users service.
#[derive(Clone)]
pub struct UsersClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlackNamesRequest<'a> {
    slack_names: &'a [String],
}

impl UsersClient {
    /// Create a client for the configured Users service.
    pub fn new(client: reqwest::Client, config: &UsersServiceConfig) -> Self {
        Self {
            client,
            url: config.users_by_slack_names_url(),
        }
    }

    async fn fetch(&self, slack_names: &[String]) -> BotResult<Vec<UserIdentity>> {
        let slack_names: Vec<String> = slack_names
            .iter()
            .map(|name| normalize_handle(name))
            .collect();
        let request = SlackNamesRequest {
            slack_names: &slack_names,
        };
        debug!("Started request to Users service: {:?}", request);

        let response = self.client.post(&self.url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(BotError::UserExchange(api_error("Users", response).await));
        }

        let users: Vec<UserIdentity> = response.json().await?;
        debug!("Finished request to Users service: {:?}", users);
        Ok(users)
    }
}

#[async_trait]
impl UserDirectory for UsersClient {
    type Error = BotError;

    async fn find_users_by_slack_names(
        &self,
        slack_names: &[String],
    ) -> BotResult<Vec<UserIdentity>> {
        self.fetch(slack_names).await
    }
}
