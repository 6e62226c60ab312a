//! Validation rules applied by single-target keepers commands.
//!
//! The rules are pure checks over an already parsed command; they never
//! change it.

use crate::command::SlackParsedCommand;
use crate::error::CommandError;
use crate::user::UserIdentity;

/// Whether a command needs a direction after its mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionPolicy {
    /// An empty direction is an error.
    Required,
    /// An empty direction is accepted.
    Optional,
}

/// Require exactly one mentioned user and return it.
pub fn exactly_one_target(command: &SlackParsedCommand) -> Result<&UserIdentity, CommandError> {
    match command.mention_count() {
        0 => Err(CommandError::NoTarget {
            text: command.text().to_string(),
        }),
        1 => command.first_mentioned_user(),
        count => Err(CommandError::TooManyTargets {
            count,
            text: command.text().to_string(),
        }),
    }
}

/// Require at most one word of residual text and return it.
///
/// With [`DirectionPolicy::Required`] the word must also be present.
pub fn exactly_one_direction(
    command: &SlackParsedCommand,
    policy: DirectionPolicy,
) -> Result<String, CommandError> {
    let residual = command.residual_text();

    if residual.is_empty() {
        return match policy {
            DirectionPolicy::Required => Err(CommandError::NoDirection {
                text: command.text().to_string(),
            }),
            DirectionPolicy::Optional => Ok(residual),
        };
    }

    if residual.split(' ').count() > 1 {
        return Err(CommandError::AmbiguousDirection {
            text: command.text().to_string(),
            residual,
        });
    }

    Ok(residual)
}
