//! Keepers bot - HTTP service behind the keepers Slack slash commands.
//!
//! This crate provides:
//! - `/keeper-add`, `/keeper-dismiss` and `/keeper` endpoints
//! - REST clients for the Users and Keepers services
//! - Delayed replies through Slack's `response_url`
//! - Health check

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::BotConfig;
pub use error::{ApiError, BotError, BotResult};
pub use service::KeeperService;
pub use state::AppState;

/// Run the server with the given configuration.
pub async fn run(config: BotConfig) -> anyhow::Result<()> {
    run_with_shutdown(config, std::future::pending()).await
}

/// Run the server with graceful shutdown support.
pub async fn run_with_shutdown<F>(config: BotConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    config.validate().context("invalid configuration")?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.listen_addr))?;

    info!("Users service: {}", config.users.users_by_slack_names_url());
    info!("Keepers service: {}", config.keepers.keepers_url());

    let state = AppState::new(config).context("failed to create application state")?;
    let app = create_router(state);

    info!("Starting keepers bot on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutting down");
    Ok(())
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    create_router_with_state(Arc::new(state))
}

/// Create the application router with an Arc-wrapped state.
pub fn create_router_with_state(state: Arc<AppState>) -> Router {
    let prefix = state.config.commands_prefix.trim_matches('/');

    let commands = if prefix.is_empty() {
        handlers::command_routes()
    } else {
        Router::new().nest(&format!("/{}", prefix), handlers::command_routes())
    };

    Router::new()
        .merge(handlers::health_routes())
        .merge(commands)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
