//! Access/refresh token pair and its durable store.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use support_common::PlatformError;
use tracing::warn;

use crate::error::ApiResult;
use crate::storage::KeyValueStorage;

/// Storage key for the persisted token pair. Distinct from the session
/// record key; the two records are kept in sync by the session facade.
pub const TOKEN_STORAGE_KEY: &str = "support_admin_tokens";

/// An access/refresh token pair.
///
/// Token contents are opaque strings; the client never inspects them.
/// Both tokens are always written and cleared together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived credential sent with each authenticated request
    pub access_token: String,
    /// Longer-lived credential exchanged for a new access token
    pub refresh_token: String,
}

impl TokenPair {
    /// Create a pair from opaque token strings.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Process-wide token state with synchronous write-through persistence.
///
/// Every mutation is on durable storage before it becomes visible in
/// memory; a persisted value that fails to write leaves the in-memory state
/// untouched.
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
    current: RwLock<Option<TokenPair>>,
}

impl TokenStore {
    /// Create a store over the given storage backend, loading any
    /// previously persisted pair. An unreadable or unparsable persisted
    /// value is treated as absent.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let current = match storage.load(TOKEN_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(pair) => Some(pair),
                Err(err) => {
                    warn!(%err, "persisted token record unparsable, discarding");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(%err, "persisted token record unreadable");
                None
            }
        };

        Self {
            storage,
            current: RwLock::new(current),
        }
    }

    /// Current token pair, if any.
    #[must_use]
    pub fn get(&self) -> Option<TokenPair> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrite both tokens, persisting before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair cannot be serialized or persisted.
    pub fn set(&self, pair: TokenPair) -> ApiResult<()> {
        let raw = serde_json::to_string(&pair).map_err(PlatformError::from)?;
        self.storage.store(TOKEN_STORAGE_KEY, &raw)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(pair);
        Ok(())
    }

    /// Remove both tokens from memory and durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted record cannot be removed; the
    /// in-memory state is cleared regardless.
    pub fn clear(&self) -> ApiResult<()> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.storage.remove(TOKEN_STORAGE_KEY)?;
        Ok(())
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("TokenStore")
            .field("tokens_present", &present)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_round_trip() {
        let store = TokenStore::new(Arc::new(MemoryStorage::new()));

        assert_eq!(store.get(), None);
        store.set(TokenPair::new("a", "r")).unwrap();
        assert_eq!(store.get(), Some(TokenPair::new("a", "r")));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_write_through_survives_reload() {
        let storage = Arc::new(MemoryStorage::new());

        let store = TokenStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>);
        store.set(TokenPair::new("AT", "RT")).unwrap();

        // A new store over the same backend starts from the persisted pair.
        let reloaded = TokenStore::new(storage);
        assert_eq!(reloaded.get(), Some(TokenPair::new("AT", "RT")));
    }

    #[test]
    fn test_corrupt_persisted_value_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.store(TOKEN_STORAGE_KEY, "not json").unwrap();

        let store = TokenStore::new(storage);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_overwrites_both_tokens() {
        let store = TokenStore::new(Arc::new(MemoryStorage::new()));
        store.set(TokenPair::new("a1", "r1")).unwrap();
        store.set(TokenPair::new("a2", "r2")).unwrap();
        assert_eq!(store.get(), Some(TokenPair::new("a2", "r2")));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let pair = TokenPair::new("secret-access", "secret-refresh");
        let output = format!("{pair:?}");
        assert!(!output.contains("secret-access"));
        assert!(!output.contains("secret-refresh"));
        assert!(output.contains("[REDACTED]"));
    }
}
