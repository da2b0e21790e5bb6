/*
[INPUT]:  Auth configuration, API client, notifier and feed failures
[OUTPUT]: Explicit signed-in user context and a bounded toast queue
[POS]:    Session layer - created on sign-in, torn down on sign-out
[UPDATE]: When sign-in sources or toast handling change
*/

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use tableside_adapter::{TablesideClient, User};
use tracing::info;

use crate::config::AuthConfig;

const TOAST_CAPACITY: usize = 5;
const DEFAULT_TOKEN_TTL_SECS: u64 = 12 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

/// FIFO of transient messages; the oldest is dropped when full.
#[derive(Debug)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    capacity: usize,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            level,
            message: message.into(),
            created_at: Instant::now(),
        });
    }

    /// Drop toasts older than `ttl` as of `now`.
    pub fn expire(&mut self, now: Instant, ttl: Duration) {
        self.items
            .retain(|toast| now.saturating_duration_since(toast.created_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Who is signed in. Passed by reference to whatever needs it.
#[derive(Debug)]
pub struct SessionContext {
    user: Option<User>,
    started_at: DateTime<Utc>,
    toasts: ToastQueue,
}

impl SessionContext {
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user),
            started_at: Utc::now(),
            toasts: ToastQueue::new(TOAST_CAPACITY),
        }
    }

    /// Start a session from configuration: a pre-issued token wins over credentials.
    pub async fn sign_in(client: &TablesideClient, auth: &AuthConfig) -> Result<Self> {
        let user = if let Some(token) = auth.token.as_deref() {
            client.set_token(token, DEFAULT_TOKEN_TTL_SECS);
            client
                .current_user()
                .await
                .context("validate configured token")?
        } else if let (Some(email), Some(password)) = (auth.email.as_deref(), auth.password.as_deref())
        {
            client
                .login(email, password)
                .await
                .context("sign in with configured credentials")?
                .user
        } else {
            bail!("auth config needs either `token` or `email` + `password`");
        };

        info!(user_id = %user.id, role = ?user.role, "session started");
        Ok(Self::new(user))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.user.is_some()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    /// Local teardown: forget the user and any pending toasts.
    pub fn end(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "session ended");
        }
        self.toasts.clear();
    }

    /// Sign out remotely, then tear down locally regardless of the outcome.
    pub async fn sign_out(&mut self, client: &TablesideClient) -> Result<()> {
        let result = client.logout().await.context("sign out");
        self.end();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableside_adapter::UserRole;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Floor Manager".to_string(),
            email: None,
            role: UserRole::Manager,
        }
    }

    #[test]
    fn toast_queue_is_bounded_fifo() {
        let mut queue = ToastQueue::new(2);
        queue.push(ToastLevel::Info, "one");
        queue.push(ToastLevel::Success, "two");
        queue.push(ToastLevel::Error, "three");

        let messages: Vec<&str> = queue.iter().map(|toast| toast.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let mut queue = ToastQueue::new(4);
        queue.push(ToastLevel::Info, "old");
        let later = Instant::now() + Duration::from_secs(10);
        queue.expire(later, Duration::from_secs(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn end_clears_user_and_toasts() {
        let mut session = SessionContext::new(user());
        session.toasts_mut().push(ToastLevel::Error, "boom");
        assert!(session.is_active());

        session.end();

        assert!(!session.is_active());
        assert!(session.user().is_none());
        assert!(session.toasts().is_empty());
    }

    #[tokio::test]
    async fn sign_in_requires_token_or_credentials() {
        let client = TablesideClient::new("http://127.0.0.1:9").expect("client");
        let err = SessionContext::sign_in(&client, &AuthConfig::default())
            .await
            .expect_err("no credentials");
        assert!(err.to_string().contains("token"));
    }
}
