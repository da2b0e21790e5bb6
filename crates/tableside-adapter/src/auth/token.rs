/*
[INPUT]:  Session tokens and expiration windows from the login endpoint
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - bearer token lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
*/

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
struct TokenData {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Thread-safe bearer token store shared by client clones
#[derive(Debug, Clone)]
pub struct TokenStore {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenStore {
    /// Create a new empty token store
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a new token with expiration
    ///
    /// Lifetimes too large to represent never expire.
    pub fn set_token(&self, token: String, expires_seconds: u64) {
        let expires_at = expiry_after(Utc::now(), expires_seconds);
        *self.write() = Some(TokenData { token, expires_at });
    }

    /// Get the current token if it has not expired
    pub fn get_token(&self) -> Option<String> {
        let guard = self.read();
        guard
            .as_ref()
            .filter(|data| Utc::now() <= data.expires_at)
            .map(|data| data.token.clone())
    }

    /// Check if token is expired (or absent)
    pub fn is_expired(&self) -> bool {
        match self.read().as_ref() {
            Some(data) => Utc::now() > data.expires_at,
            None => true,
        }
    }

    /// Clear the stored token
    pub fn clear(&self) {
        *self.write() = None;
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<TokenData>> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<TokenData>> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn expiry_after(now: DateTime<Utc>, expires_seconds: u64) -> DateTime<Utc> {
    i64::try_from(expires_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = TokenStore::new();
        assert!(store.get_token().is_none());
        assert!(store.is_expired());
    }

    #[test]
    fn test_set_and_get_token() {
        let store = TokenStore::new();
        store.set_token("test_token".to_string(), 3600);

        assert_eq!(store.get_token(), Some("test_token".to_string()));
        assert!(!store.is_expired());
    }

    #[test]
    fn test_oversized_lifetime_saturates() {
        let store = TokenStore::new();
        store.set_token("long".to_string(), 10_000_000_000_000_000);
        assert_eq!(store.get_token(), Some("long".to_string()));

        store.set_token("longest".to_string(), u64::MAX);
        assert_eq!(store.get_token(), Some("longest".to_string()));
        assert!(!store.is_expired());
    }

    #[test]
    fn test_expiry_after_clamps_to_max() {
        let now = Utc::now();
        assert_eq!(expiry_after(now, 60), now + Duration::seconds(60));
        assert_eq!(expiry_after(now, u64::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(
            expiry_after(now, i64::MAX as u64),
            DateTime::<Utc>::MAX_UTC
        );
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::new();
        let clone = store.clone();
        store.set_token("shared".to_string(), 3600);
        assert_eq!(clone.get_token(), Some("shared".to_string()));

        clone.clear();
        assert!(store.get_token().is_none());
        assert!(store.is_expired());
    }
}
