//! Resolved Slack users.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A Slack handle resolved to a stable user id by the user directory.
///
/// Serializes in the Users service format: `{"uuid": "...", "slack": "@..."}`.
/// Equality, hashing and ordering only look at the handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(rename = "uuid")]
    id: String,
    #[serde(rename = "slack")]
    handle: String,
}

impl UserIdentity {
    /// Create an identity from an id and an `@`-prefixed handle.
    pub fn new(id: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: handle.into(),
        }
    }

    /// Stable user id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Slack handle, including the leading `@`.
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

impl PartialEq for UserIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for UserIdentity {}

impl Hash for UserIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl PartialOrd for UserIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.handle.cmp(&other.handle)
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.handle, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_follows_handle() {
        assert_eq!(
            UserIdentity::new("U1", "@slack1"),
            UserIdentity::new("U2", "@slack1")
        );
        assert_ne!(
            UserIdentity::new("U1", "@slack1"),
            UserIdentity::new("U1", "@slack2")
        );
    }

    #[test]
    fn test_ordering_follows_handle() {
        let mut users = vec![
            UserIdentity::new("U3", "@c"),
            UserIdentity::new("U1", "@a"),
            UserIdentity::new("U2", "@b"),
        ];
        users.sort();
        let handles: Vec<_> = users.iter().map(UserIdentity::handle).collect();
        assert_eq!(handles, ["@a", "@b", "@c"]);
    }

    #[test]
    fn test_wire_format() {
        let user: UserIdentity =
            serde_json::from_str(r#"{"uuid":"AAAA123","slack":"@bob.slack"}"#).unwrap();
        assert_eq!(user.id(), "AAAA123");
        assert_eq!(user.handle(), "@bob.slack");

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"uuid":"AAAA123","slack":"@bob.slack"}"#);
    }
}
