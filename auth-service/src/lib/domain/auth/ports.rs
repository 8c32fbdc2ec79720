use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthorizedSubject;
use crate::user::models::Credentials;
use crate::user::models::SignupCommand;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register an account and issue its first access token.
    ///
    /// # Errors
    /// * `Conflict` - Email is already registered
    /// * `StorageFailure` - User directory failed
    /// * `Internal` - Hashing or signing failed
    async fn signup(&self, command: SignupCommand) -> Result<String, AuthError>;

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `StorageFailure` - User directory failed
    async fn signin(&self, credentials: Credentials) -> Result<String, AuthError>;

    /// Accept or reject an access token for a protected operation.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is invalid, expired or revoked
    async fn authorize(&self, token: &str) -> Result<AuthorizedSubject, AuthError>;

    /// End the session bound to `token`.
    ///
    /// Tokens signed with another secret are accepted and left unrecorded.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is not well-formed
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Revoke `token` explicitly. Same semantics as [`AuthServicePort::logout`].
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;

    /// Exchange a token close to expiry for a new one.
    ///
    /// # Errors
    /// * `InvalidToken` - Token fails verification or was already revoked
    /// * `NotYetRefreshable` - Token still has more than the refresh window left
    async fn refresh_access(&self, token: &str) -> Result<String, AuthError>;
}
