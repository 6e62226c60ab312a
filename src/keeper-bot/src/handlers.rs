//! Slash command endpoints.
//!
//! Slack posts every command as a form. A command with a `response_url` is
//! acknowledged right away and answered later through that URL; one without
//! it is answered in the HTTP response.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use keeper_slack::{
    DelayedResponse, KeeperCommand, SlashCommandPayload, SlashCommandResponse, messages,
    send_delayed_response,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::auth::verify_slash_command;
use crate::state::AppState;

/// Slash command routes, relative to the commands prefix.
pub fn command_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/commands/keeper/add", post(keeper_add))
        .route("/commands/keeper/dismiss", post(keeper_dismiss))
        .route("/commands/keeper/deactivate", post(keeper_dismiss))
        .route("/commands/keeper", post(keeper_directions))
}

/// Health check route.
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

async fn keeper_add(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SlashCommandPayload>,
) -> Response {
    handle_command(state, KeeperCommand::Add, payload).await
}

async fn keeper_dismiss(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SlashCommandPayload>,
) -> Response {
    handle_command(state, KeeperCommand::Dismiss, payload).await
}

async fn keeper_directions(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SlashCommandPayload>,
) -> Response {
    handle_command(state, KeeperCommand::Directions, payload).await
}

async fn handle_command(
    state: Arc<AppState>,
    command: KeeperCommand,
    payload: SlashCommandPayload,
) -> Response {
    info!(
        "Received slash command {} from user: '{}' text: '{}'",
        command.slash_command(),
        payload.user_name,
        payload.text
    );

    if !verify_slash_command(&state.config, &payload) {
        return messages::SORRY_MESSAGE.into_response();
    }

    if payload.has_response_url() {
        tokio::spawn(async move {
            let reply = run_command(&state, command, &payload).await;
            deliver(&state, &payload.response_url, reply).await;
        });
        return messages::IN_PROGRESS.into_response();
    }

    let reply = run_command(&state, command, &payload).await;
    Json(SlashCommandResponse::text(reply).ephemeral()).into_response()
}

/// Run the command and return the text for the Slack user, error or not.
async fn run_command(
    state: &AppState,
    command: KeeperCommand,
    payload: &SlashCommandPayload,
) -> String {
    match state
        .service
        .execute(command, &payload.user_name, &payload.text)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            warn!("{} failed: {}", command.slash_command(), e);
            e.user_message()
        }
    }
}

async fn deliver(state: &AppState, response_url: &str, reply: String) {
    let response = DelayedResponse::new(reply);
    match send_delayed_response(&state.http_client, response_url, &response).await {
        Ok(()) => debug!("Reply delivered to {}", response_url),
        Err(e) => error!("Failed to deliver reply to {}: {}", response_url, e),
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the server runs.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since start.
    pub uptime_seconds: u64,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
    })
}
