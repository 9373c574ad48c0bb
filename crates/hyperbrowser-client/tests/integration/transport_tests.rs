//! Transport behaviour against a wiremock server.

use std::time::Duration;

use hyperbrowser_client::{ClientConfig, Hyperbrowser, HyperbrowserError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::common::{API_KEY, client, config};

#[tokio::test]
async fn test_sends_api_key_and_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/team/credit-info"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"remaining": 120})))
        .expect(1)
        .mount(&server)
        .await;

    let credits = client(&server).team().credit_info().await.unwrap();
    assert_eq!(credits["remaining"], 120);
}

#[tokio::test]
async fn test_error_message_from_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/team/credit-info"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).team().credit_info().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(matches!(
        err,
        HyperbrowserError::HttpError { ref message, .. } if message == "Invalid API key"
    ));
}

#[tokio::test]
async fn test_error_field_used_when_message_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})))
        .mount(&server)
        .await;

    let err = client(&server).sessions().get("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 404: Session not found");
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/team/credit-info"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).team().credit_info().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 502: HTTP error! status: 502");
}

#[tokio::test]
async fn test_empty_success_body_reads_as_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/session/sess-1/stop"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resp = client(&server).sessions().stop("sess-1").await.unwrap();
    assert!(!resp.success);
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/team/credit-info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client(&server).team().credit_info().await.unwrap_err();
    assert!(matches!(err, HyperbrowserError::ParseError { .. }));
    assert_eq!(err.status_code(), Some(200));
    assert!(err.to_string().starts_with("Failed to parse JSON response"));
}

#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/team/credit-info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let hb = Hyperbrowser::new(config(&server).with_timeout(Duration::from_millis(100))).unwrap();
    let err = hb.team().credit_info().await.unwrap_err();
    assert!(matches!(err, HyperbrowserError::Timeout(100)));
}

#[tokio::test]
async fn test_connection_refused() {
    let hb = Hyperbrowser::new(
        ClientConfig::new(API_KEY)
            .unwrap()
            .with_base_url("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = hb.team().credit_info().await.unwrap_err();
    assert!(matches!(err, HyperbrowserError::NetworkError(_)));
    assert_eq!(err.status_code(), None);
}
