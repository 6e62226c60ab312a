//! Keepers service client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::api_error;
use crate::config::KeepersServiceConfig;
use crate::error::{BotError, BotResult};

/// Body of the add and deactivate calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperRequest {
    /// Id of the user who sent the command.
    pub from: String,
    /// Id of the keeper.
    pub uuid: String,
    /// Direction the keeper is added to or dismissed from.
    pub direction: String,
}

impl KeeperRequest {
    /// Create a request.
    pub fn new(
        from: impl Into<String>,
        uuid: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            uuid: uuid.into(),
            direction: direction.into(),
        }
    }
}

/// Storage of keepers and their directions.
#[async_trait]
pub trait KeeperRepository: Send + Sync {
    /// Make a user the keeper of a direction. Returns the ids of the new records.
    async fn add_keeper(&self, request: &KeeperRequest) -> BotResult<Vec<String>>;

    /// Dismiss a keeper from a direction. Returns the ids of the dismissed records.
    async fn deactivate_keeper(&self, request: &KeeperRequest) -> BotResult<Vec<String>>;

    /// Active directions of the keeper with id `uuid`.
    async fn get_keeper_directions(&self, uuid: &str) -> BotResult<Vec<String>>;
}

/// [`KeeperRepository`] backed by the Keepers REST service.
#[derive(Clone)]
pub struct KeepersClient {
    client: reqwest::Client,
    url: String,
}

impl KeepersClient {
    /// Create a client for the configured Keepers service.
    pub fn new(client: reqwest::Client, config: &KeepersServiceConfig) -> Self {
        Self {
            client,
            url: config.keepers_url(),
        }
    }

    async fn read_answer<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> BotResult<T> {
        if !response.status().is_success() {
            return Err(BotError::KeeperExchange(api_error("Keepers", response).await));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl KeeperRepository for KeepersClient {
    async fn add_keeper(&self, request: &KeeperRequest) -> BotResult<Vec<String>> {
        debug!("Started add keeper request to Keepers service: {:?}", request);
        let response = self.client.post(&self.url).json(request).send().await?;
        let ids: Vec<String> = Self::read_answer(response).await?;
        info!("Keeper added: {:?}", ids);
        Ok(ids)
    }

    async fn deactivate_keeper(&self, request: &KeeperRequest) -> BotResult<Vec<String>> {
        debug!("Started deactivate keeper request to Keepers service: {:?}", request);
        let response = self.client.put(&self.url).json(request).send().await?;
        let ids: Vec<String> = Self::read_answer(response).await?;
        info!("Keeper deactivated: {:?}", ids);
        Ok(ids)
    }

    async fn get_keeper_directions(&self, uuid: &str) -> BotResult<Vec<String>> {
        let url = format!("{}/{}", self.url, uuid);
        debug!("Started keeper directions request to Keepers service: {}", url);
        let response = self.client.get(&url).send().await?;
        let directions: Vec<String> = Self::read_answer(response).await?;
        info!("Got keeper directions: {:?}", directions);
        Ok(directions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> KeepersClient {
        let config = KeepersServiceConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        KeepersClient::new(reqwest::Client::new(), &config)
    }

    fn request() -> KeeperRequest {
        KeeperRequest::new("uuid-from", "uuid1", "teams")
    }

    fn request_json() -> serde_json::Value {
        serde_json::json!({"from": "uuid-from", "uuid": "uuid1", "direction": "teams"})
    }

    fn service_error() -> ResponseTemplate {
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "httpStatus": 400,
            "internalErrorCode": 1,
            "clientMessage": "Oops something went wrong :(",
            "developerMessage": "General exception for this service",
            "exceptionMessage": "very big and scare error",
            "detailErrors": []
        }))
    }

    #[tokio::test]
    async fn test_add_keeper() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/keepers"))
            .and(body_json(request_json()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["1000"])))
            .expect(1)
            .mount(&server)
            .await;

        let ids = client_for(&server).add_keeper(&request()).await.unwrap();
        assert_eq!(ids, vec!["1000".to_string()]);
    }

    #[tokio::test]
    async fn test_add_keeper_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(service_error())
            .mount(&server)
            .await;

        let err = client_for(&server).add_keeper(&request()).await.unwrap_err();
        assert!(matches!(err, BotError::KeeperExchange(_)));
        assert_eq!(err.user_message(), "Oops something went wrong :(");
    }

    #[tokio::test]
    async fn test_deactivate_keeper() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/keepers"))
            .and(body_json(request_json()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["1000"])))
            .expect(1)
            .mount(&server)
            .await;

        let ids = client_for(&server)
            .deactivate_keeper(&request())
            .await
            .unwrap();
        assert_eq!(ids, vec!["1000".to_string()]);
    }

    #[tokio::test]
    async fn test_deactivate_keeper_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(service_error())
            .mount(&server)
            .await;

        let err = client_for(&server)
            .deactivate_keeper(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::KeeperExchange(_)));
    }

    #[tokio::test]
    async fn test_get_keeper_directions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/keepers/uuid1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!(["direction1", "direction2"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let directions = client_for(&server)
            .get_keeper_directions("uuid1")
            .await
            .unwrap();
        assert_eq!(directions, vec!["direction1", "direction2"]);
    }

    #[tokio::test]
    async fn test_get_keeper_directions_unexpected_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_keeper_directions("uuid1")
            .await
            .unwrap_err();
        assert!(err.user_message().contains("Keepers"));
    }
}
