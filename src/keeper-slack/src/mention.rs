//! Slack name mention scanning for `@slackname` syntax.
//!
//! A Slack name is at most 21 characters long and made of letters, digits,
//! periods, hyphens and underscores. The character class below keeps the
//! historical `A-z` range, which also admits `[`, `\`, `]`, `^` and `` ` ``;
//! callers downstream rely on exactly this accepted set.
//!
//! # Examples
//!
//! ```rust
//! use keeper_slack::mention::{extract_mentions, strip_mentions};
//!
//! let mentions = extract_mentions("-t1 @slack1 -t2 @slack2");
//! assert_eq!(mentions.len(), 2);
//! assert_eq!(mentions[1].handle, "@slack2");
//! assert_eq!(mentions[1].position, 16);
//!
//! assert_eq!(strip_mentions("  @a text   @b more "), "text more");
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Pattern for a single Slack name mention.
pub const SLACK_NAME_PATTERN: &str = r"@[a-zA-z0-9._-]{1,21}";

static SLACK_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLACK_NAME_PATTERN).expect("Invalid slack name regex"));

/// A raw `@handle` occurrence in command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// The handle including the leading `@`.
    pub handle: String,
    /// Byte offset of the `@` in the scanned text.
    pub position: usize,
}

/// Find every mention in `text`, left to right, without overlaps.
pub fn extract_mentions(text: &str) -> Vec<Mention> {
    SLACK_NAME_REGEX
        .find_iter(text)
        .map(|m| Mention {
            handle: m.as_str().to_string(),
            position: m.start(),
        })
        .collect()
}

/// Find the first mention starting at or after byte offset `from`.
pub fn find_mention_from(text: &str, from: usize) -> Option<Mention> {
    SLACK_NAME_REGEX.find_at(text, from).map(|m| Mention {
        handle: m.as_str().to_string(),
        position: m.start(),
    })
}

/// Remove every mention from `text`, collapse whitespace runs to a single
/// space and trim both ends.
///
/// Removal is repeated until nothing matches, so text that only forms a
/// mention once an inner one is cut out (`@@` followed by a long name) is
/// stripped as well.
pub fn strip_mentions(text: &str) -> String {
    let mut stripped = SLACK_NAME_REGEX.replace_all(text, "").into_owned();
    while SLACK_NAME_REGEX.is_match(&stripped) {
        stripped = SLACK_NAME_REGEX.replace_all(&stripped, "").into_owned();
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ensure a Slack user name carries the leading `@`.
pub fn normalize_handle(name: &str) -> String {
    let name = name.trim();
    if name.starts_with('@') {
        name.to_string()
    } else {
        format!("@{}", name)
    }
}
