//! HTTP session gateway against a mock backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use signin_testing::test_clock;
use signin_trigger::mocks::{MockIdentityPopup, RecordingNotifier};
use signin_trigger::providers::{HttpSessionGateway, SessionGateway};
use signin_trigger::{
    Activation, LoginError, LoginRequest, LoginTrigger, Outcome, SessionEndpointConfig, SessionResponse,
    TriggerConfig, TriggerEnvironment,
};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> HttpSessionGateway {
    HttpSessionGateway::new(SessionEndpointConfig::new(server.uri()).with_timeout(Duration::from_secs(2))).unwrap()
}

fn request() -> LoginRequest {
    LoginRequest::from_credential(MockIdentityPopup::test_credential())
}

#[tokio::test]
async fn posts_login_request_with_backend_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "idToken": "mock_id_token_456",
            "email": "test@example.com",
            "name": "Test User",
            "photoURL": "https://example.com/avatar.jpg",
            "uid": "mock_uid_123",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Welcome",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway(&server).establish_session(request()).await.unwrap();

    assert_eq!(response, SessionResponse::welcome("Welcome"));
}

#[tokio::test]
async fn rejection_carries_the_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid Google token" })))
        .mount(&server)
        .await;

    let error = gateway(&server).establish_session(request()).await.unwrap_err();

    assert_eq!(error.message, "Invalid Google token");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let config = SessionEndpointConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2));
    let gateway = HttpSessionGateway::new(config).unwrap();
    let error = gateway.establish_session(request()).await.unwrap_err();

    assert_eq!(error.message, "Network error");
    assert!(!error.message.contains("127.0.0.1"));
    assert!(!gateway.is_loading());
}

#[tokio::test]
async fn is_loading_while_a_request_is_in_flight() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Welcome" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    assert!(!gateway.is_loading());

    let pending = tokio::spawn({
        let gateway = gateway.clone();
        async move { gateway.establish_session(request()).await }
    });

    tokio::time::timeout(Duration::from_secs(2), async {
        while !gateway.is_loading() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("request never started");

    pending.await.unwrap().unwrap();
    assert!(!gateway.is_loading());
}

#[tokio::test]
async fn custom_login_path_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/session/google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Account disabled" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = SessionEndpointConfig::new(server.uri()).with_login_path("/session/google");
    let response = HttpSessionGateway::new(config).unwrap().establish_session(request()).await.unwrap();

    assert_eq!(response, SessionResponse::declined("Account disabled"));
}

#[tokio::test]
async fn trigger_signs_in_through_the_http_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::new();
    let env = TriggerEnvironment::new(
        MockIdentityPopup::new(),
        gateway(&server),
        notifier.clone(),
        test_clock(),
        TriggerConfig::default(),
    );
    let trigger = LoginTrigger::new(env);

    let result = trigger.activate_and_wait(Duration::from_secs(5)).await.unwrap();

    assert_eq!(
        result,
        Activation::Finished(Outcome::Failed(LoginError::ActionFailure {
            message: Some("Service Unavailable".to_string())
        }))
    );
    assert_eq!(notifier.errors(), vec!["Service Unavailable".to_string()]);
    assert!(!trigger.is_loading().await);
}
