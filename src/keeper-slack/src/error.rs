//! Error types for keepers slash commands.
//!
//! `CommandError` covers every way a command text can be malformed. Its
//! `Display` output is the exact text shown to the Slack user, so it always
//! quotes the offending command text.
//!
//! `SlackError` covers talking back to Slack (delayed responses).

use thiserror::Error;

/// A command whose text cannot be turned into a keepers action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No mention at all where the first mentioned user was requested.
    #[error("The text '{text}' doesn't contain any slack names")]
    NoMentionFound {
        /// Raw command text.
        text: String,
    },

    /// Zero mentions in a single-target command.
    #[error(
        "We didn't find any slack name in your command. '{text}' \
         You must write the user's slack name to perform the action with keepers."
    )]
    NoTarget {
        /// Raw command text.
        text: String,
    },

    /// More than one mention in a single-target command.
    #[error(
        "We found {count} slack names in your command: '{text}' \
         You can not perform actions with several slack names."
    )]
    TooManyTargets {
        /// Number of distinct mentioned users.
        count: usize,
        /// Raw command text.
        text: String,
    },

    /// Nothing left once mentions are stripped, but a direction is required.
    #[error(
        "We didn't find direction in your command: '{text}' \
         You must write the direction to perform the action with keepers."
    )]
    NoDirection {
        /// Raw command text.
        text: String,
    },

    /// More than one word left once mentions are stripped.
    #[error(
        "We found several directions in your command: '{text}' \
         You can perform the action with keepers on one direction only."
    )]
    AmbiguousDirection {
        /// Raw command text.
        text: String,
        /// What was left after stripping mentions.
        residual: String,
    },

    /// A required token does not occur in the text.
    #[error("Token '{token}' didn't find in the string '{text}'")]
    TokenNotFound {
        /// The missing token.
        token: String,
        /// Raw command text.
        text: String,
    },

    /// A token occurs more than once.
    #[error("The text '{text}' contains {count} tokens '{token}', but expected 1")]
    DuplicateToken {
        /// The repeated token.
        token: String,
        /// How many times it was found.
        count: usize,
        /// Raw command text.
        text: String,
    },

    /// No mention can be bound to a token without crossing the next token.
    #[error("The text '{text}' doesn't contain slackName for token '{token}'")]
    NoMentionForToken {
        /// The token left without a mention.
        token: String,
        /// Raw command text.
        text: String,
    },

    /// The user directory did not return the invoking user.
    #[error("The user service didn't return the user {handle} who sent the command")]
    UnknownInvoker {
        /// Normalized handle of the invoker.
        handle: String,
    },
}

/// Errors that can occur while talking to Slack.
#[derive(Error, Debug)]
pub enum SlackError {
    /// Slack rejected the request.
    #[error("Slack API error: {0}")]
    Api(String),

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// Operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SlackError::Timeout(err.to_string())
        } else if err.is_connect() {
            SlackError::Network(format!("Connection failed: {}", err))
        } else {
            SlackError::Network(err.to_string())
        }
    }
}

/// Result type for Slack operations.
pub type SlackResult<T> = std::result::Result<T, SlackError>;
