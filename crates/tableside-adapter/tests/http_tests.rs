/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints and session flow
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{login_body, mock_token, setup_mock_server};
use rstest::rstest;
use tableside_adapter::{
    ClientConfig, OrderApi, OrderId, OrderStatus, TablesideClient, TablesideError, UserRole,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(TablesideClient::new("http://127.0.0.1:9"));
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(TablesideClient::with_config(config, "https://api.example.test/"));
}

#[test]
fn test_client_rejects_garbage_url() {
    let err = TablesideClient::new("not a url").expect_err("invalid url");
    assert!(matches!(err, TablesideError::UrlParse(_)));
}

#[tokio::test]
async fn test_login_stores_token_and_logout_clears_it() {
    let server = setup_mock_server().await;
    let token = mock_token();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "foh@example.test",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(&token)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(TablesideClient::new(&server.uri()));
    let response = assert_ok!(client.login("foh@example.test", "hunter2").await);

    assert_eq!(response.user.role, UserRole::Manager);
    assert_eq!(client.tokens().get_token(), Some(token));

    assert_ok!(client.logout().await);
    assert!(client.tokens().get_token().is_none());
}

#[tokio::test]
async fn test_login_with_huge_expires_in_keeps_session() {
    let server = setup_mock_server().await;
    let token = mock_token();
    let mut body = login_body(&token);
    body["expires_in"] = serde_json::json!(u64::MAX);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(&token)["user"].clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(TablesideClient::new(&server.uri()));
    assert_ok!(client.login("foh@example.test", "hunter2").await);

    assert!(!client.tokens().is_expired());
    let user = assert_ok!(client.current_user().await);
    assert_eq!(user.id, "u-1");
}

#[tokio::test]
async fn test_logout_clears_token_even_when_server_fails() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = assert_ok!(TablesideClient::new(&server.uri()));
    client.set_token(mock_token(), 3600);

    let result = client.logout().await;
    assert!(result.is_err());
    assert!(client.tokens().is_expired());
}

#[rstest]
#[case(401, "unauthorized")]
#[case(403, "unauthorized")]
#[case(404, "not_found")]
#[case(429, "rate_limit")]
#[case(500, "api")]
#[tokio::test]
async fn test_status_code_mapping(#[case] status: u16, #[case] expected: &str) {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("retry-after", "7")
                .set_body_json(serde_json::json!({ "message": "nope" })),
        )
        .mount(&server)
        .await;

    let client = assert_ok!(TablesideClient::new(&server.uri()));
    client.set_token(mock_token(), 3600);

    let err = client.fetch_orders().await.expect_err("error status");
    let kind = match err {
        TablesideError::Unauthorized { .. } => "unauthorized",
        TablesideError::NotFound { .. } => "not_found",
        TablesideError::RateLimit { retry_after } => {
            assert_eq!(retry_after, 7);
            "rate_limit"
        }
        TablesideError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "nope");
            "api"
        }
        other => panic!("unexpected error: {other:?}"),
    };
    assert_eq!(kind, expected);
}

#[tokio::test]
async fn test_order_api_trait_over_http() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orders": [
                {
                    "id": "A",
                    "status": "PENDING",
                    "item_count": 1,
                    "total": "9.50",
                    "created_at": "2026-03-01T11:00:00Z"
                },
                {
                    "id": "B",
                    "status": "PREPARING",
                    "table": "T7",
                    "item_count": 4,
                    "total": "61.20",
                    "created_at": "2026-03-01T11:02:00Z"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = assert_ok!(TablesideClient::new(&server.uri()));
    client.set_token(mock_token(), 3600);

    let orders = assert_ok!(client.fetch_orders().await);
    let ids: Vec<&OrderId> = orders.iter().map(|order| &order.id).collect();
    assert_eq!(ids, vec![&OrderId::new("A"), &OrderId::new("B")]);
    assert_eq!(orders[1].status, OrderStatus::Preparing);
    assert_eq!(orders[1].table.as_deref(), Some("T7"));
}
