//! REST clients for the Users and Keepers services.

mod keepers;
mod users;

pub use keepers::{KeeperRepository, KeeperRequest, KeepersClient};
pub use users::UsersClient;

use std::time::Duration;

use reqwest::Response;
use tracing::warn;

use crate::error::{ApiError, BotResult};

/// Build the HTTP client shared by every outbound call.
pub fn build_http_client(timeout: Duration) -> BotResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Turn a non-success answer into the service's [`ApiError`].
async fn api_error(service: &str, response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = ApiError::from_response(service, status.as_u16(), &body);
    warn!("{} service returned an error: {}", service, error);
    error
}
