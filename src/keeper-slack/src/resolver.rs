//! Slack-name resolution for incoming commands.
//!
//! Every mention in the command text plus the invoker is sent to the user
//! directory in a single call; the answer is turned into a
//! [`SlackParsedCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::command::SlackParsedCommand;
use crate::error::CommandError;
use crate::mention::{extract_mentions, normalize_handle};
use crate::user::UserIdentity;

/// Resolves Slack handles to user identities.
///
/// Implementations fail the whole call when a handle is unknown; a partial
/// answer is never returned.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Error returned by the directory. Resolution failures detected while
    /// building the command are converted into it.
    type Error: From<CommandError> + Send;

    /// Look up users by their `@`-prefixed handles.
    async fn find_users_by_slack_names(
        &self,
        slack_names: &[String],
    ) -> Result<Vec<UserIdentity>, Self::Error>;
}

/// Builds parsed commands by resolving their mentions.
pub struct SlackNameResolver<D: ?Sized> {
    directory: Arc<D>,
}

impl<D: ?Sized> Clone for SlackNameResolver<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D: UserDirectory + ?Sized> SlackNameResolver<D> {
    /// Create a resolver backed by `directory`.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolve the invoker and every mention in `text` and build the command.
    pub async fn resolve(
        &self,
        from_user: &str,
        text: &str,
    ) -> Result<SlackParsedCommand, D::Error> {
        let invoker_handle = normalize_handle(from_user);
        let slack_names = slack_names_for(&invoker_handle, text);
        debug!("Send slack names {:?} to user directory", slack_names);

        let users = self
            .directory
            .find_users_by_slack_names(&slack_names)
            .await?;
        debug!("User directory resolved {} users", users.len());

        let (invokers, mentioned): (Vec<_>, Vec<_>) = users
            .into_iter()
            .partition(|user| user.handle() == invoker_handle);

        let invoker = invokers
            .into_iter()
            .next()
            .ok_or(CommandError::UnknownInvoker {
                handle: invoker_handle,
            })?;

        Ok(SlackParsedCommand::new(invoker, text, mentioned))
    }
}

/// Deduplicated mentions in first-appearance order, then the invoker.
fn slack_names_for(invoker_handle: &str, text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for mention in extract_mentions(text) {
        if !names.contains(&mention.handle) {
            names.push(mention.handle);
        }
    }
    if !names.iter().any(|name| name == invoker_handle) {
        names.push(invoker_handle.to_string());
    }
    names
}
