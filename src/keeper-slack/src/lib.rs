//! Slack slash-command parsing for the keepers bot.
//!
//! This crate turns the free text of a keepers slash command into typed
//! values the bot can act on:
//! - `@slackname` mention extraction and stripping
//! - `SlackParsedCommand`, the invoker + text + resolved users of one command
//! - Validation rules for single-target / single-direction commands
//! - Token binding (`-t1 @a -t2 @b`) for multi-target commands
//! - Slack-name resolution through a pluggable user directory
//! - Slash command payloads and delayed responses via `response_url`
//!
//! # Example
//!
//! ```rust
//! use keeper_slack::{SlackParsedCommand, UserIdentity};
//!
//! let invoker = UserIdentity::new("U0", "@from-user");
//! let target = UserIdentity::new("U1", "@slack1");
//! let command = SlackParsedCommand::new(invoker, "@slack1 teams", vec![target]);
//!
//! assert_eq!(command.first_mentioned_user().unwrap().handle(), "@slack1");
//! assert_eq!(command.residual_text(), "teams");
//! ```

pub mod command;
pub mod commands;
pub mod error;
pub mod mention;
pub mod messages;
pub mod resolver;
pub mod token;
pub mod user;
pub mod validation;

pub use command::SlackParsedCommand;
pub use commands::{
    DelayedResponse, KeeperCommand, ResponseType, SlashCommandPayload, SlashCommandResponse,
    send_delayed_response,
};
pub use error::{CommandError, SlackError, SlackResult};
pub use mention::{Mention, extract_mentions, normalize_handle, strip_mentions};
pub use resolver::{SlackNameResolver, UserDirectory};
pub use token::bind_tokens;
pub use user::UserIdentity;
pub use validation::{DirectionPolicy, exactly_one_direction, exactly_one_target};
