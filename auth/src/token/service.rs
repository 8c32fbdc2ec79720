use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use super::errors::TokenError;
use super::revocation::RevocationStore;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Lifetimes applied by the token service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Lifetime of freshly issued access tokens
    pub access_ttl: Duration,
    /// How close to expiry a token must be before it can be refreshed
    pub refresh_window: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            access_ttl: Duration::hours(24),
            refresh_window: Duration::minutes(15),
        }
    }
}

/// A token whose signature and expiry have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub claims: Claims,
    /// Raw token as presented, kept for revocation
    pub token: String,
}

/// Token lifecycle: issue, verify, revoke and refresh.
///
/// A token is accepted for authorization only while its signature checks out,
/// it has not expired and its `jti` is absent from the revocation store.
pub struct TokenService {
    handler: JwtHandler,
    revocations: Arc<dyn RevocationStore>,
    policy: TokenPolicy,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `handler` - Codec holding the process-wide secret and algorithm
    /// * `revocations` - Shared revocation store
    /// * `policy` - Access token lifetime and refresh window
    pub fn new(
        handler: JwtHandler,
        revocations: Arc<dyn RevocationStore>,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            handler,
            revocations,
            policy,
        }
    }

    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    /// Issue an access token for `subject` with the configured lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.sign(subject, self.policy.access_ttl)
    }

    /// Sign a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed or the expiry is not representable
    pub fn sign(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, ttl).ok_or_else(|| {
            TokenError::SigningFailed("Token lifetime is out of range".to_string())
        })?;
        let token = self.handler.encode(&claims)?;

        tracing::debug!(jti = %claims.jti, expires_at = ?claims.expires_at(), "Token issued");

        Ok(token)
    }

    /// Check signature and expiry of `token`.
    ///
    /// Revocation is not consulted; see [`TokenService::is_revoked`].
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the configured secret
    /// * `Malformed` - Input is not one of our tokens
    /// * `Expired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedToken {
            claims,
            token: token.to_string(),
        })
    }

    /// Add `token` to the revocation set.
    ///
    /// Revoking twice is a no-op. Revoking a token that has already expired,
    /// or one signed with another secret, is accepted without recording
    /// anything: neither can pass [`TokenService::verify`].
    ///
    /// # Errors
    /// * `Malformed` - Input is not a token
    pub fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let claims: Claims = match self.handler.decode(token) {
            Ok(claims) => claims,
            Err(JwtError::InvalidSignature) => {
                tracing::debug!("Revocation of foreign-signed token ignored");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if claims.is_expired(Utc::now().timestamp()) {
            tracing::debug!(jti = %claims.jti, "Revocation of expired token ignored");
            return Ok(());
        }

        if self.revocations.revoke(&claims.jti, claims.exp) {
            tracing::info!(jti = %claims.jti, "Token revoked");
        }

        Ok(())
    }

    /// Membership check against the revocation set.
    ///
    /// Input that does not decode to our claims is reported as not revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        self.handler
            .decode_unverified::<Claims>(token)
            .map(|claims| self.revocations.is_revoked(&claims.jti))
            .unwrap_or(false)
    }

    pub fn is_verified_revoked(&self, verified: &VerifiedToken) -> bool {
        self.revocations.is_revoked(&verified.claims.jti)
    }

    /// Exchange a token close to expiry for a new one.
    ///
    /// On success the old token is revoked and a token for the same subject
    /// with a full access lifetime is returned.
    ///
    /// # Errors
    /// * `InvalidToken` - Old token fails verification, is revoked, or lost a
    ///   concurrent refresh
    /// * `NotYetRefreshable` - More than the refresh window remains
    /// * `SigningFailed` - New token could not be encoded
    pub fn refresh(&self, old_token: &str) -> Result<String, TokenError> {
        let verified = self
            .verify(old_token)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;
        let claims = &verified.claims;

        if self.revocations.is_revoked(&claims.jti) {
            return Err(TokenError::InvalidToken(
                "Token has been revoked".to_string(),
            ));
        }

        if claims.remaining(Utc::now().timestamp()) > self.policy.refresh_window {
            return Err(TokenError::NotYetRefreshable);
        }

        let new_token = self.issue(&claims.sub)?;

        // The revocation insert decides which of several concurrent refreshes wins
        if !self.revocations.revoke(&claims.jti, claims.exp) {
            return Err(TokenError::InvalidToken(
                "Token has been revoked".to_string(),
            ));
        }

        tracing::info!(jti = %claims.jti, "Token refreshed");

        Ok(new_token)
    }

    /// Forget revocations of tokens that have expired on their own.
    pub fn purge_expired(&self) -> usize {
        self.revocations.purge_expired(Utc::now().timestamp())
    }

    pub fn revoked_count(&self) -> usize {
        self.revocations.len()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::token::InMemoryRevocationStore;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn service() -> TokenService {
        TokenService::new(
            JwtHandler::new(SECRET).unwrap(),
            Arc::new(InMemoryRevocationStore::new()),
            TokenPolicy::default(),
        )
    }

    #[test]
    fn test_sign_then_verify() {
        let service = service();

        let token = service.issue("demo@sample.com").unwrap();
        let verified = service.verify(&token).expect("Token should verify");

        assert_eq!(verified.claims.sub, "demo@sample.com");
        assert_eq!(verified.token, token);
        assert_eq!(
            verified.claims.exp - verified.claims.iat,
            Duration::hours(24).num_seconds()
        );
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let service = service();

        let token = service.sign("user", Duration::zero()).unwrap();
        assert_eq!(service.verify(&token).unwrap_err(), TokenError::Expired);

        let token = service.sign("user", Duration::minutes(-5)).unwrap();
        assert_eq!(service.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let service = service();
        let other = TokenService::new(
            JwtHandler::new(b"another_secret_at_least_32_bytes!!").unwrap(),
            Arc::new(InMemoryRevocationStore::new()),
            TokenPolicy::default(),
        );

        let token = other.issue("user").unwrap();
        assert_eq!(
            service.verify(&token).unwrap_err(),
            TokenError::InvalidSignature
        );

        // Signature is checked before expiry
        let expired = other.sign("user", Duration::zero()).unwrap();
        assert_eq!(
            service.verify(&expired).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let service = service();
        assert!(matches!(
            service.verify("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let service = service();
        let token = service.issue("user").unwrap();

        assert!(!service.is_revoked(&token));

        service.revoke(&token).unwrap();
        assert!(service.is_revoked(&token));
        assert_eq!(service.revoked_count(), 1);

        service.revoke(&token).unwrap();
        assert!(service.is_revoked(&token));
        assert_eq!(service.revoked_count(), 1);

        // Still cryptographically valid; only revocation makes it unusable
        let verified = service.verify(&token).unwrap();
        assert!(service.is_verified_revoked(&verified));
    }

    #[test]
    fn test_revoke_only_touches_that_token() {
        let service = service();
        let first = service.issue("user").unwrap();
        let second = service.issue("user").unwrap();

        service.revoke(&first).unwrap();

        assert!(service.is_revoked(&first));
        assert!(!service.is_revoked(&second));
    }

    #[test]
    fn test_revoke_expired_token_is_noop() {
        let service = service();
        let token = service.sign("user", Duration::zero()).unwrap();

        service.revoke(&token).unwrap();
        assert_eq!(service.revoked_count(), 0);
    }

    #[test]
    fn test_revoke_foreign_token_is_noop() {
        let service = service();
        let other = TokenService::new(
            JwtHandler::new(b"another_secret_at_least_32_bytes!!").unwrap(),
            Arc::new(InMemoryRevocationStore::new()),
            TokenPolicy::default(),
        );
        let foreign = other.issue("user").unwrap();

        service.revoke(&foreign).unwrap();
        assert_eq!(service.revoked_count(), 0);
        assert_eq!(
            service.verify(&foreign).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_sign_with_out_of_range_ttl() {
        let service = service();

        assert!(matches!(
            service.sign("demo@sample.com", Duration::days(100_000_000)),
            Err(TokenError::SigningFailed(_))
        ));
        assert!(matches!(
            service.sign("demo@sample.com", Duration::days(-100_000_000)),
            Err(TokenError::SigningFailed(_))
        ));
    }

    #[test]
    fn test_revoke_rejects_malformed_token() {
        let service = service();
        assert!(matches!(
            service.revoke("garbage"),
            Err(TokenError::Malformed(_))
        ));
        assert!(!service.is_revoked("garbage"));
    }

    #[test]
    fn test_refresh_not_yet_refreshable() {
        let service = service();
        let token = service.sign("user", Duration::minutes(16)).unwrap();

        assert_eq!(
            service.refresh(&token).unwrap_err(),
            TokenError::NotYetRefreshable
        );
        assert!(!service.is_revoked(&token));
    }

    #[test]
    fn test_refresh_inside_window() {
        let service = service();
        let token = service.sign("demo@sample.com", Duration::minutes(15)).unwrap();

        let new_token = service.refresh(&token).expect("Refresh should succeed");

        assert!(service.is_revoked(&token));
        assert!(!service.is_revoked(&new_token));

        let verified = service.verify(&new_token).unwrap();
        assert_eq!(verified.claims.sub, "demo@sample.com");
        assert!(verified.claims.remaining(Utc::now().timestamp()) > Duration::hours(23));
    }

    #[test]
    fn test_refresh_rejects_invalid_tokens() {
        let service = service();

        let expired = service.sign("user", Duration::zero()).unwrap();
        assert!(matches!(
            service.refresh(&expired),
            Err(TokenError::InvalidToken(_))
        ));

        assert!(matches!(
            service.refresh("garbage"),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_refresh_twice_fails() {
        let service = service();
        let token = service.sign("user", Duration::minutes(5)).unwrap();

        service.refresh(&token).unwrap();
        assert!(matches!(
            service.refresh(&token),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_concurrent_refresh_has_single_winner() {
        let service = Arc::new(service());
        let token = service.sign("user", Duration::minutes(5)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                let token = token.clone();
                thread::spawn(move || service.refresh(&token).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(winners, 1);
    }

    #[test]
    fn test_purge_expired_keeps_live_revocations() {
        let store = Arc::new(InMemoryRevocationStore::new());
        let service = TokenService::new(
            JwtHandler::new(SECRET).unwrap(),
            store.clone(),
            TokenPolicy::default(),
        );

        let token = service.issue("user").unwrap();
        service.revoke(&token).unwrap();
        store.revoke("stale", 1);

        assert_eq!(service.purge_expired(), 1);
        assert!(service.is_revoked(&token));
        assert_eq!(service.revoked_count(), 1);
    }
}
