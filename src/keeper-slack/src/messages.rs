//! Reply texts sent back to Slack.

use crate::user::UserIdentity;

/// Reply to a slash command carrying the wrong verification token.
pub const SORRY_MESSAGE: &str = "Sorry! You're not lucky enough to use our slack command.";

/// Immediate acknowledgment while the command runs in the background.
pub const IN_PROGRESS: &str = "In progress...";

/// A keeper was added to a direction.
pub fn keeper_added(keeper: &UserIdentity, direction: &str) -> String {
    format!(
        "Thanks, we added a new Keeper: {} in direction: {}",
        keeper.handle(),
        direction
    )
}

/// The keepers service accepted the request but added nothing.
pub fn keeper_not_added() -> String {
    "ERROR. Something went wrong. Keeper was not added :(".to_string()
}

/// A keeper was dismissed from a direction.
pub fn keeper_dismissed(keeper: &UserIdentity, direction: &str) -> String {
    format!(
        "Keeper: {} in direction: {} dismissed",
        keeper.handle(),
        direction
    )
}

/// The keepers service accepted the request but dismissed nothing.
pub fn keeper_not_dismissed() -> String {
    "ERROR. Something went wrong. Keeper was not dismissed :(".to_string()
}

/// Active directions of a keeper.
pub fn keeper_directions(keeper: &UserIdentity, directions: &[String]) -> String {
    if directions.is_empty() {
        format!("The keeper {} has no active directions.", keeper.handle())
    } else {
        format!(
            "The keeper {} has active directions: [{}]",
            keeper.handle(),
            directions.join(", ")
        )
    }
}
