//! End-to-end tests: router against mocked Users, Keepers and Slack servers.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use keeper_bot::{AppState, BotConfig, create_router};
use keeper_bot::config::{KeepersServiceConfig, UsersServiceConfig};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request as MockRequest, ResponseTemplate};

const TOKEN: &str = "slack-token";
const SLACK_HOOK: &str = "/hooks/response";

fn config(server: &MockServer) -> BotConfig {
    BotConfig {
        slash_command_token: SecretString::new(TOKEN.to_string().into()),
        users: UsersServiceConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        keepers: KeepersServiceConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn app(server: &MockServer) -> axum::Router {
    create_router(AppState::new(config(server)).unwrap())
}

fn command_request(server: &MockServer, uri: &str, token: &str, text: &str) -> Request<Body> {
    let response_url = format!("{}{}", server.uri(), SLACK_HOOK);
    let fields = [
        ("token", token),
        ("user_name", "from-user"),
        ("text", text),
        ("response_url", response_url.as_str()),
    ];
    let form = reqwest::Url::parse_with_params("http://localhost/", &fields)
        .unwrap()
        .query()
        .unwrap_or_default()
        .to_string();

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn mock_users(server: &MockServer, slack_names: serde_json::Value, users: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/users/usersBySlackNames"))
        .and(body_json(json!({ "slackNames": slack_names })))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .mount(server)
        .await;
}

fn service_error() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "httpStatus": 400,
        "internalErrorCode": 1,
        "clientMessage": "Oops something went wrong :(",
        "developerMessage": "General exception for this service",
        "exceptionMessage": "very big and scare error",
        "detailErrors": []
    }))
}

async fn mock_slack(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(SLACK_HOOK))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(server)
        .await;
}

/// Wait for the delayed reply posted to the Slack hook.
async fn slack_reply(server: &MockServer) -> serde_json::Value {
    for _ in 0..100 {
        let requests: Vec<MockRequest> = server.received_requests().await.unwrap_or_default();
        if let Some(reply) = requests.iter().find(|r| r.url.path() == SLACK_HOOK) {
            return serde_json::from_slice(&reply.body).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("no reply was posted to Slack");
}

fn users_json() -> serde_json::Value {
    json!([
        {"uuid": "uuid1", "slack": "@slack1"},
        {"uuid": "uuid-from", "slack": "@from-user"}
    ])
}

#[tokio::test]
async fn keeper_add_posts_reply_to_response_url() {
    let server = MockServer::start().await;
    mock_users(&server, json!(["@slack1", "@from-user"]), users_json()).await;
    Mock::given(method("POST"))
        .and(path("/v1/keepers"))
        .and(body_json(json!({"from": "uuid-from", "uuid": "uuid1", "direction": "teams"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["1000"])))
        .expect(1)
        .mount(&server)
        .await;
    mock_slack(&server).await;

    let req = command_request(&server, "/v1/commands/keeper/add", TOKEN, "@slack1 teams");
    let resp = app(&server).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "In progress...");
    assert_eq!(
        slack_reply(&server).await,
        json!({"text": "Thanks, we added a new Keeper: @slack1 in direction: teams"})
    );
}

#[tokio::test]
async fn keeper_dismiss_uses_put() {
    let server = MockServer::start().await;
    mock_users(&server, json!(["@slack1", "@from-user"]), users_json()).await;
    Mock::given(method("PUT"))
        .and(path("/v1/keepers"))
        .and(body_json(json!({"from": "uuid-from", "uuid": "uuid1", "direction": "teams"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["1000"])))
        .expect(1)
        .mount(&server)
        .await;
    mock_slack(&server).await;

    let req = command_request(&server, "/v1/commands/keeper/dismiss", TOKEN, "@slack1 teams");
    let resp = app(&server).oneshot(req).await.unwrap();

    assert_eq!(body_string(resp).await, "In progress...");
    assert_eq!(
        slack_reply(&server).await,
        json!({"text": "Keeper: @slack1 in direction: teams dismissed"})
    );
}

#[tokio::test]
async fn keeper_directions_are_listed() {
    let server = MockServer::start().await;
    mock_users(&server, json!(["@slack1", "@from-user"]), users_json()).await;
    Mock::given(method("GET"))
        .and(path("/v1/keepers/uuid1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["direction1", "direction2"])))
        .expect(1)
        .mount(&server)
        .await;
    mock_slack(&server).await;

    let req = command_request(&server, "/v1/commands/keeper", TOKEN, "@slack1");
    let resp = app(&server).oneshot(req).await.unwrap();

    assert_eq!(body_string(resp).await, "In progress...");
    assert_eq!(
        slack_reply(&server).await,
        json!({"text": "The keeper @slack1 has active directions: [direction1, direction2]"})
    );
}

#[tokio::test]
async fn users_service_error_is_relayed_to_slack() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/users/usersBySlackNames"))
        .respond_with(service_error())
        .mount(&server)
        .await;
    mock_slack(&server).await;

    let req = command_request(&server, "/v1/commands/keeper/add", TOKEN, "@slack1 teams");
    let resp = app(&server).oneshot(req).await.unwrap();

    assert_eq!(body_string(resp).await, "In progress...");
    assert_eq!(
        slack_reply(&server).await,
        json!({"text": "Oops something went wrong :("})
    );
}

#[tokio::test]
async fn keepers_service_error_is_relayed_to_slack() {
    let server = MockServer::start().await;
    mock_users(&server, json!(["@slack1", "@from-user"]), users_json()).await;
    Mock::given(method("POST"))
        .and(path("/v1/keepers"))
        .respond_with(service_error())
        .mount(&server)
        .await;
    mock_slack(&server).await;

    let req = command_request(&server, "/v1/commands/keeper/add", TOKEN, "@slack1 teams");
    app(&server).oneshot(req).await.unwrap();

    assert_eq!(
        slack_reply(&server).await,
        json!({"text": "Oops something went wrong :("})
    );
}

#[tokio::test]
async fn two_targets_are_rejected_without_calling_keepers() {
    let server = MockServer::start().await;
    mock_users(
        &server,
        json!(["@slack1", "@slack2", "@from-user"]),
        json!([
            {"uuid": "uuid1", "slack": "@slack1"},
            {"uuid": "uuid2", "slack": "@slack2"},
            {"uuid": "uuid-from", "slack": "@from-user"}
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/v1/keepers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["1000"])))
        .expect(0)
        .mount(&server)
        .await;
    mock_slack(&server).await;

    let req = command_request(
        &server,
        "/v1/commands/keeper/add",
        TOKEN,
        "@slack1 @slack2 teams",
    );
    app(&server).oneshot(req).await.unwrap();

    assert_eq!(
        slack_reply(&server).await,
        json!({"text": "We found 2 slack names in your command: '@slack1 @slack2 teams' \
                        You can not perform actions with several slack names."})
    );
}

#[tokio::test]
async fn wrong_token_makes_no_downstream_calls() {
    let server = MockServer::start().await;

    let req = command_request(&server, "/v1/commands/keeper/add", "wrong", "@slack1 teams");
    let resp = app(&server).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_string(resp).await,
        "Sorry! You're not lucky enough to use our slack command."
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
