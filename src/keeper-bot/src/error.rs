//! Error types for the keepers bot.

use std::fmt;

use keeper_slack::CommandError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bot error type.
#[derive(Debug, Error)]
pub enum BotError {
    /// The command text is malformed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The Users service answered with an error.
    #[error("Users service error: {0}")]
    UserExchange(ApiError),

    /// The Keepers service answered with an error.
    #[error("Keepers service error: {0}")]
    KeeperExchange(ApiError),

    /// Network/HTTP error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BotError {
    /// The text relayed to the Slack user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Command(err) => err.to_string(),
            Self::UserExchange(api) | Self::KeeperExchange(api) => api.client_message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BotError::Json(err.to_string())
        } else {
            BotError::Http(err.to_string())
        }
    }
}

/// Result type for the keepers bot.
pub type BotResult<T> = Result<T, BotError>;

/// Error body returned by the Users and Keepers services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status reported by the service.
    #[serde(default)]
    pub http_status: u16,
    /// Service specific error code.
    #[serde(default)]
    pub internal_error_code: ErrorCode,
    /// Message meant for the end user.
    #[serde(default)]
    pub client_message: String,
    /// Message meant for developers.
    #[serde(default)]
    pub developer_message: String,
    /// Message of the underlying exception.
    #[serde(default)]
    pub exception_message: String,
    /// Field-level details.
    #[serde(default)]
    pub detail_errors: Vec<String>,
}

/// Error code, numeric or textual depending on the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::Text(String::new())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(code) => write!(f, "{}", code),
            ErrorCode::Text(code) => write!(f, "{}", code),
        }
    }
}

impl ApiError {
    /// Build the error for a non-success answer of `service`.
    ///
    /// Bodies that are not a service error produce a synthetic one.
    pub fn from_response(service: &str, status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiError>(body) {
            Ok(api) if !api.client_message.is_empty() => api,
            _ => Self {
                http_status: status,
                internal_error_code: ErrorCode::Text("BOT".to_string()),
                client_message: format!("Sorry, the {} service is not available right now :(", service),
                developer_message: format!("{} service returned an unexpected response", service),
                exception_message: body.to_string(),
                detail_errors: Vec::new(),
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({})",
            self.http_status, self.internal_error_code, self.client_message, self.developer_message
        )
    }
}
