/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tableside-adapter tests

use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer token for testing
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// Login response body as the API returns it
pub fn login_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "token": token,
        "expires_in": 3600,
        "user": {
            "id": "u-1",
            "name": "Front of House",
            "email": "foh@example.test",
            "role": "manager"
        }
    })
}
