//! Token binding for multi-target commands.
//!
//! A multi-target command marks each role with a token placed in front of
//! the user who plays it, e.g. `-t1 @slack1 -t2 @slack2`. Tokens may come in
//! any order and may have free text between them and their mention, but each
//! token must appear exactly once and its mention must come before the next
//! token in the text.

use std::collections::BTreeMap;

use tracing::debug;

use crate::command::SlackParsedCommand;
use crate::error::CommandError;
use crate::mention::find_mention_from;
use crate::user::UserIdentity;

/// Bind every token to the resolved user mentioned right after it.
///
/// `tokens` is a set: a marker listed twice is bound once.
///
/// Runs in two passes: locate each token once (sorting them by position),
/// then scan forward from each token for the nearest mention, which must
/// precede the following token.
///
/// A bound handle with no resolved user in `command` is left out of the
/// result instead of failing. Upstream resolution normally makes this
/// impossible; whether it should be a hard error is still undecided.
pub fn bind_tokens(
    command: &SlackParsedCommand,
    tokens: &[&str],
) -> Result<BTreeMap<String, UserIdentity>, CommandError> {
    let text = command.text();
    let located = locate_tokens(text, tokens)?;

    let mut bound = BTreeMap::new();
    for (index, &(token, position)) in located.iter().enumerate() {
        let no_mention = || CommandError::NoMentionForToken {
            token: token.to_string(),
            text: text.to_string(),
        };

        let mention = find_mention_from(text, position).ok_or_else(no_mention)?;
        if let Some(&(_, next_position)) = located.get(index + 1)
            && mention.position >= next_position
        {
            return Err(no_mention());
        }

        match command
            .all_mentioned_users()
            .iter()
            .find(|user| user.handle() == mention.handle)
        {
            Some(user) => {
                bound.insert(token.to_string(), user.clone());
            }
            None => {
                debug!(
                    "Token '{}' points at unresolved slack name {}, skipping",
                    token, mention.handle
                );
            }
        }
    }

    Ok(bound)
}

/// Find the single position of each distinct token, sorted left to right.
///
/// Repeated markers in `tokens` count once. Ties keep the input order.
fn locate_tokens<'a>(text: &str, tokens: &[&'a str]) -> Result<Vec<(&'a str, usize)>, CommandError> {
    let mut located: Vec<(&'a str, usize)> = Vec::with_capacity(tokens.len());

    for &token in tokens {
        if located.iter().any(|&(seen, _)| seen == token) {
            continue;
        }
        let positions: Vec<usize> = if token.is_empty() {
            Vec::new()
        } else {
            text.match_indices(token).map(|(pos, _)| pos).collect()
        };

        match positions.as_slice() {
            [] => {
                return Err(CommandError::TokenNotFound {
                    token: token.to_string(),
                    text: text.to_string(),
                });
            }
            [position] => located.push((token, *position)),
            _ => {
                return Err(CommandError::DuplicateToken {
                    token: token.to_string(),
                    count: positions.len(),
                    text: text.to_string(),
                });
            }
        }
    }

    located.sort_by_key(|&(_, position)| position);
    Ok(located)
}
