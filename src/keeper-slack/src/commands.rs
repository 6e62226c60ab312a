//! Slack slash command handling.
//!
//! Supports the following slash commands:
//! - `/keeper-add @user direction` - Make a user the keeper of a direction
//! - `/keeper-dismiss @user direction` - Dismiss a keeper from a direction
//! - `/keeper @user` - List the active directions of a keeper
//!
//! Slash commands must be acknowledged within 3 seconds; the real answer is
//! sent later as a delayed response via `response_url`.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{SlackError, SlackResult};
use crate::validation::DirectionPolicy;

/// Slack slash command payload (form encoded).
///
/// Slack sends more context fields (team, channel, trigger id); the bot does
/// not read them and they are ignored on decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlashCommandPayload {
    /// Verification token shared between Slack and the bot.
    #[serde(default)]
    pub token: String,
    /// Slack name of the user who invoked the command.
    #[serde(default)]
    pub user_name: String,
    /// Text after the command.
    #[serde(default)]
    pub text: String,
    /// URL for delayed responses. Empty for synchronous callers.
    #[serde(default)]
    pub response_url: String,
    /// The command (e.g., "/keeper-add").
    #[serde(default)]
    pub command: String,
}

impl SlashCommandPayload {
    /// Whether Slack expects the answer on `response_url`.
    pub fn has_response_url(&self) -> bool {
        !self.response_url.trim().is_empty()
    }
}

/// Response type for slash command responses. Keeper replies are private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only visible to the user who invoked the command.
    #[default]
    Ephemeral,
}

/// Immediate response to a slash command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlashCommandResponse {
    /// Response type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    /// Simple text response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SlashCommandResponse {
    /// Create a simple text response.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set response type to ephemeral (only visible to invoker).
    pub fn ephemeral(mut self) -> Self {
        self.response_type = Some(ResponseType::Ephemeral);
        self
    }
}

/// Keeper reply posted to `response_url` once the command has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedResponse {
    /// Reply text.
    pub text: String,
}

impl DelayedResponse {
    /// Create a reply carrying `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Post a keeper reply to the command's `response_url`.
///
/// Slack accepts delayed replies for 30 minutes after the command. Failures
/// are not retried.
pub async fn send_delayed_response(
    client: &reqwest::Client,
    response_url: &str,
    response: &DelayedResponse,
) -> SlackResult<()> {
    debug!("Posting keeper reply '{}' to {}", response.text, response_url);

    let resp = client.post(response_url).json(response).send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        error!("Slack refused keeper reply: {} - {}", status, body);
        return Err(SlackError::Api(format!(
            "response_url answered {} - {}",
            status, body
        )));
    }

    Ok(())
}

/// The keepers slash commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeeperCommand {
    /// `/keeper-add @user direction`.
    Add,
    /// `/keeper-dismiss @user direction`.
    Dismiss,
    /// `/keeper @user`.
    Directions,
}

impl KeeperCommand {
    /// The Slack command name.
    pub fn slash_command(self) -> &'static str {
        match self {
            Self::Add => "/keeper-add",
            Self::Dismiss => "/keeper-dismiss",
            Self::Directions => "/keeper",
        }
    }

    /// Whether the command needs a direction next to the mentioned user.
    pub fn direction_policy(self) -> DirectionPolicy {
        match self {
            Self::Add | Self::Dismiss => DirectionPolicy::Required,
            Self::Directions => DirectionPolicy::Optional,
        }
    }
}
