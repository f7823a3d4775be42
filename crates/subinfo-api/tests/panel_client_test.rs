#![allow(clippy::unwrap_used)]
// Integration tests for `PanelClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subinfo_api::{Error, PanelClient, WireTimestamp};

// ── Helpers ─────────────────────────────────────────────────────────

const SUB_PATH: &str = "/sub/abc123";

async fn setup() -> (MockServer, PanelClient) {
    let server = MockServer::start().await;
    let url = Url::parse(&format!("{}{SUB_PATH}", server.uri())).unwrap();
    let client = PanelClient::with_client(reqwest::Client::new(), url).unwrap();
    (server, client)
}

// ── Info endpoint ───────────────────────────────────────────────────

#[tokio::test]
async fn test_get_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{SUB_PATH}/info")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "status": "active",
            "used_traffic": 536_870_912,
            "data_limit": 1_073_741_824,
            "expire": 1_735_689_600,
            "subscription_url": "/sub/abc123",
            "links": ["vless://a#one", "vmess://b", "False"]
        })))
        .mount(&server)
        .await;

    let info = client.get_info().await.unwrap();

    assert_eq!(info.username.as_deref(), Some("alice"));
    assert_eq!(info.status.as_deref(), Some("active"));
    assert_eq!(info.used_traffic, Some(536_870_912.0));
    assert_eq!(info.data_limit, Some(1_073_741_824.0));
    assert_eq!(info.expire, Some(1_735_689_600.0));
    assert_eq!(info.links.as_ref().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_get_info_without_links() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{SUB_PATH}/info")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "bob",
            "data_limit": null,
            "expire_date": "2030-06-01T12:00:00",
            "enabled": true,
            "activated": null
        })))
        .mount(&server)
        .await;

    let info = client.get_info().await.unwrap();

    assert!(info.links.is_none());
    assert_eq!(info.data_limit, None);
    assert_eq!(
        info.expire_date,
        Some(WireTimestamp::Text("2030-06-01T12:00:00".into()))
    );
    assert_eq!(info.activated, Some(None));
}

#[tokio::test]
async fn test_get_info_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{SUB_PATH}/info")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client.get_info().await.unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    assert!(matches!(err, Error::Http { status: 404, .. }));
}

#[tokio::test]
async fn test_get_info_server_error_keeps_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{SUB_PATH}/info")))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.get_info().await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 502, .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_get_info_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{SUB_PATH}/info")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.get_info().await;

    match result {
        Err(Error::Deserialization { body, .. }) => {
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Configs endpoint ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_configs_returns_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(SUB_PATH))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  dmxlc3M6Ly9h\n"))
        .mount(&server)
        .await;

    let body = client.get_configs().await.unwrap();
    assert_eq!(body, "  dmxlc3M6Ly9h\n");
}

#[tokio::test]
async fn test_get_configs_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(SUB_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("disabled"))
        .mount(&server)
        .await;

    let err = client.get_configs().await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "disabled");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_endpoint_urls() {
    let (server, client) = setup().await;
    assert_eq!(
        client.info_url().as_str(),
        format!("{}{SUB_PATH}/info", server.uri())
    );
    assert_eq!(
        client.configs_url().as_str(),
        format!("{}{SUB_PATH}", server.uri())
    );
}
