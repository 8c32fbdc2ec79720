use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;

/// Storage for identifiers of tokens invalidated before their natural expiry.
///
/// Each entry remembers when the token would have expired on its own so it can
/// be dropped once that instant has passed. Implementations must make `revoke`
/// and `is_revoked` atomic with respect to each other.
pub trait RevocationStore: Send + Sync + 'static {
    /// Mark `token_id` as revoked until `expires_at` (Unix seconds).
    ///
    /// # Returns
    /// `true` if the identifier was not revoked before this call
    fn revoke(&self, token_id: &str, expires_at: i64) -> bool;

    fn is_revoked(&self, token_id: &str) -> bool;

    /// Drop entries whose token has expired at `now`.
    ///
    /// # Returns
    /// Number of entries removed
    fn purge_expired(&self, now: i64) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local revocation set.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    /// token id -> expiry
    entries: RwLock<HashMap<String, i64>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn revoke(&self, token_id: &str, expires_at: i64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if entries.contains_key(token_id) {
            return false;
        }
        entries.insert(token_id.to_string(), expires_at);
        true
    }

    fn is_revoked(&self, token_id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token_id)
    }

    fn purge_expired(&self, now: i64) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
