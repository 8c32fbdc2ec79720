use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Access token payload.
///
/// `sub` carries the account email, `jti` is the identifier tracked by the
/// revocation store. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Create claims for `subject` expiring `ttl` from now.
    ///
    /// A zero or negative `ttl` produces claims that are already expired.
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Option<Self> {
        Self::issued_at(subject, Utc::now(), ttl)
    }

    /// Create claims for `subject` as if issued at `now`.
    pub fn issued_at(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expiration = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Validity left at `current_timestamp` (negative once expired).
    pub fn remaining(&self, current_timestamp: i64) -> Duration {
        Duration::seconds(self.exp - current_timestamp)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
