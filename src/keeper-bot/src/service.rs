//! Keeper business service.
//!
//! Turns a resolved slash command into calls on the Keepers service and the
//! reply text shown to the Slack user.

use std::sync::Arc;

use keeper_slack::{
    KeeperCommand, SlackNameResolver, SlackParsedCommand, UserDirectory, UserIdentity,
    exactly_one_direction, exactly_one_target, messages,
};
use tracing::{debug, info};

use crate::client::{KeeperRepository, KeeperRequest};
use crate::error::{BotError, BotResult};

/// Runs keepers slash commands.
pub struct KeeperService {
    resolver: SlackNameResolver<dyn UserDirectory<Error = BotError>>,
    keepers: Arc<dyn KeeperRepository>,
}

impl KeeperService {
    /// Create a service from a user directory and a keeper repository.
    pub fn new(
        users: Arc<dyn UserDirectory<Error = BotError>>,
        keepers: Arc<dyn KeeperRepository>,
    ) -> Self {
        Self {
            resolver: SlackNameResolver::new(users),
            keepers,
        }
    }

    /// Run `command` sent by `from_user` with `text` and return the reply.
    pub async fn execute(
        &self,
        command: KeeperCommand,
        from_user: &str,
        text: &str,
    ) -> BotResult<String> {
        debug!("Processing {} from {}: '{}'", command.slash_command(), from_user, text);
        let parsed = self.resolver.resolve(from_user, text).await?;

        match command {
            KeeperCommand::Add => self.add(&parsed).await,
            KeeperCommand::Dismiss => self.dismiss(&parsed).await,
            KeeperCommand::Directions => self.directions(&parsed).await,
        }
    }

    async fn add(&self, parsed: &SlackParsedCommand) -> BotResult<String> {
        let (request, keeper) = single_target_request(parsed, KeeperCommand::Add)?;
        let ids = self.keepers.add_keeper(&request).await?;

        if ids.is_empty() {
            return Ok(messages::keeper_not_added());
        }
        info!("Added keeper {} in direction {}", keeper.handle(), request.direction);
        Ok(messages::keeper_added(keeper, &request.direction))
    }

    async fn dismiss(&self, parsed: &SlackParsedCommand) -> BotResult<String> {
        let (request, keeper) = single_target_request(parsed, KeeperCommand::Dismiss)?;
        let ids = self.keepers.deactivate_keeper(&request).await?;

        if ids.is_empty() {
            return Ok(messages::keeper_not_dismissed());
        }
        info!("Dismissed keeper {} from direction {}", keeper.handle(), request.direction);
        Ok(messages::keeper_dismissed(keeper, &request.direction))
    }

    async fn directions(&self, parsed: &SlackParsedCommand) -> BotResult<String> {
        let keeper = parsed.first_mentioned_user()?;
        let directions = self.keepers.get_keeper_directions(keeper.id()).await?;
        Ok(messages::keeper_directions(keeper, &directions))
    }
}

fn single_target_request(
    parsed: &SlackParsedCommand,
    command: KeeperCommand,
) -> BotResult<(KeeperRequest, &UserIdentity)> {
    let keeper = exactly_one_target(parsed)?;
    let direction = exactly_one_direction(parsed, command.direction_policy())?;
    let request = KeeperRequest::new(parsed.invoker().id(), keeper.id(), direction);
    Ok((request, keeper))
}
