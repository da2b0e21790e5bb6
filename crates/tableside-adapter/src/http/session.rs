/*
[INPUT]:  Staff credentials (email + password)
[OUTPUT]: Session token stored on the client, signed-in user profile
[POS]:    HTTP layer - session endpoints
[UPDATE]: When login/logout endpoints or token lifetime change
*/

use reqwest::Method;
use tracing::{info, warn};

use crate::http::{Result, TablesideClient};
use crate::types::{LoginRequest, LoginResponse, User};

impl TablesideClient {
    /// Sign in and store the issued bearer token
    ///
    /// POST /api/auth/login
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self
            .request(Method::POST, &["api", "auth", "login"])?
            .json(&body);
        let response: LoginResponse = self.send_json(builder).await?;
        self.tokens()
            .set_token(response.token.clone(), response.expires_in);
        info!(user_id = %response.user.id, "signed in");
        Ok(response)
    }

    /// Profile of the user owning the current token
    ///
    /// GET /api/auth/me
    pub async fn current_user(&self) -> Result<User> {
        let builder = self.authed_request(Method::GET, &["api", "auth", "me"])?;
        self.send_json(builder).await
    }

    /// Sign out; the local token is dropped even if the server call fails
    ///
    /// POST /api/auth/logout
    pub async fn logout(&self) -> Result<()> {
        let result = match self.authed_request(Method::POST, &["api", "auth", "logout"]) {
            Ok(builder) => self.send_empty(builder).await,
            Err(err) => Err(err),
        };
        self.tokens().clear();
        if let Err(err) = &result {
            warn!(error = %err, "logout request failed; local session cleared");
        }
        result
    }
}
