//! Slash command verification.

use keeper_slack::SlashCommandPayload;
use tracing::warn;

use crate::config::BotConfig;

/// Check the verification token Slack sent with a slash command.
pub fn verify_slash_command(config: &BotConfig, payload: &SlashCommandPayload) -> bool {
    if config.token_matches(&payload.token) {
        return true;
    }
    warn!(
        "Rejected slash command {} from {}: invalid token",
        payload.command, payload.user_name
    );
    false
}

/// Constant-time string comparison to prevent timing attacks.
pub(crate) fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"token", b"token"));
        assert!(!constant_time_compare(b"token", b"tokem"));
        assert!(!constant_time_compare(b"token", b"token!"));
        assert!(constant_time_compare(b"", b""));
    }

    #[test]
    fn test_verify_slash_command() {
        let config = BotConfig {
            slash_command_token: SecretString::new("secret".to_string().into()),
            ..Default::default()
        };
        let mut payload = SlashCommandPayload {
            token: "secret".to_string(),
            user_name: "from-user".to_string(),
            ..Default::default()
        };
        assert!(verify_slash_command(&config, &payload));

        payload.token = "wrong".to_string();
        assert!(!verify_slash_command(&config, &payload));
    }
}
