//! The parsed form of one keepers slash command.

use std::collections::{BTreeMap, HashSet};

use crate::error::CommandError;
use crate::mention::{extract_mentions, strip_mentions};
use crate::token;
use crate::user::UserIdentity;

/// A slash command with its mentions resolved to users.
///
/// Built once per inbound command. Validation is deferred: construction
/// never fails, the accessors and the rules in [`crate::validation`] do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackParsedCommand {
    invoker: UserIdentity,
    text: String,
    mentioned: Vec<UserIdentity>,
}

impl SlackParsedCommand {
    /// Build a command from the invoker, the raw text and the users resolved
    /// for the mentions in that text.
    ///
    /// The invoker is dropped from `mentioned`, duplicate handles collapse to
    /// their first occurrence, and users are ordered by where their handle is
    /// first mentioned in `text`. Users never mentioned keep their relative
    /// order at the end.
    pub fn new(
        invoker: UserIdentity,
        text: impl Into<String>,
        mentioned: impl IntoIterator<Item = UserIdentity>,
    ) -> Self {
        let text = text.into();
        let mentions = extract_mentions(&text);

        let mut seen = HashSet::new();
        let mut mentioned: Vec<UserIdentity> = mentioned
            .into_iter()
            .filter(|user| user.handle() != invoker.handle())
            .filter(|user| seen.insert(user.handle().to_string()))
            .collect();

        mentioned.sort_by_key(|user| {
            mentions
                .iter()
                .position(|m| m.handle == user.handle())
                .unwrap_or(usize::MAX)
        });

        Self {
            invoker,
            text,
            mentioned,
        }
    }

    /// The user who sent the command.
    pub fn invoker(&self) -> &UserIdentity {
        &self.invoker
    }

    /// The raw command text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The first mentioned user.
    pub fn first_mentioned_user(&self) -> Result<&UserIdentity, CommandError> {
        self.mentioned
            .first()
            .ok_or_else(|| CommandError::NoMentionFound {
                text: self.text.clone(),
            })
    }

    /// All mentioned users in first-appearance order.
    pub fn all_mentioned_users(&self) -> &[UserIdentity] {
        &self.mentioned
    }

    /// Number of distinct mentioned users, invoker excluded.
    pub fn mention_count(&self) -> usize {
        self.mentioned.len()
    }

    /// The text with every mention removed and whitespace collapsed.
    ///
    /// Computed from the raw text, so unresolved and repeated mentions are
    /// stripped too.
    pub fn residual_text(&self) -> String {
        strip_mentions(&self.text)
    }

    /// Bind each token to the mentioned user that follows it.
    ///
    /// See [`token::bind_tokens`].
    pub fn users_by_tokens(
        &self,
        tokens: &[&str],
    ) -> Result<BTreeMap<String, UserIdentity>, CommandError> {
        token::bind_tokens(self, tokens)
    }
}
