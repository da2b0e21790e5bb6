/*
[INPUT]:  HTTP configuration (base URL, timeouts) and the shared token store
[OUTPUT]: Configured reqwest client ready for API calls, status-code mapping
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::auth::TokenStore;
use crate::http::{Result, TablesideError};
use crate::types::ApiErrorBody;

const REQUEST_ID_HEADER: &str = "x-request-id";
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP client for the restaurant order-management API.
///
/// Clones share the underlying connection pool and token store.
#[derive(Debug, Clone)]
pub struct TablesideClient {
    http_client: Client,
    base_url: Url,
    timeout: Duration,
    tokens: TokenStore,
}

impl TablesideClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TablesideError::Config(format!(
                "base url cannot carry a path: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            timeout: config.timeout,
            tokens: TokenStore::new(),
        })
    }

    /// Base URL all endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Shared token store
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Install a pre-issued bearer token
    pub fn set_token(&self, token: impl Into<String>, expires_seconds: u64) {
        self.tokens.set_token(token.into(), expires_seconds);
    }

    /// Build a URL from path segments; segments are percent-encoded.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TablesideError::Config(format!("invalid base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder for public endpoints
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string()))
    }

    /// Build request builder for endpoints that require a session
    pub(crate) fn authed_request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder> {
        let token = self
            .tokens
            .get_token()
            .ok_or(TablesideError::NotAuthenticated)?;
        Ok(self
            .request(method, segments)?
            .header(AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Send a request and discard the body
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                TablesideError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                TablesideError::Http(err)
            }
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "api response");
        if status.is_success() {
            return Ok(response);
        }

        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> TablesideError {
    let status = response.status();
    let resource = response.url().path().to_string();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|parsed| parsed.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TablesideError::Unauthorized { message }
        }
        StatusCode::NOT_FOUND => TablesideError::NotFound { resource },
        StatusCode::TOO_MANY_REQUESTS => TablesideError::RateLimit { retry_after },
        _ => TablesideError::api_error(status, message),
    }
}
