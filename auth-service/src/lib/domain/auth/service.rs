use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthorizedSubject;
use crate::domain::auth::ports::AuthServicePort;
use crate::user::models::Credentials;
use crate::user::models::SignupCommand;
use crate::user::models::UserRecord;
use crate::user::ports::UserDirectory;

/// Domain service implementation for authentication.
///
/// Identity checks go through the user directory and the password hasher; every
/// token decision is delegated to the token service.
pub struct AuthService<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<UD> AuthService<UD>
where
    UD: UserDirectory,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User directory implementation
    /// * `tokens` - Shared token service
    pub fn new(directory: Arc<UD>, tokens: Arc<TokenService>) -> Self {
        Self {
            directory,
            tokens,
            password_hasher: PasswordHasher::new(),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }
}

#[async_trait]
impl<UD> AuthServicePort for AuthService<UD>
where
    UD: UserDirectory,
{
    async fn signup(&self, command: SignupCommand) -> Result<String, AuthError> {
        let email = command.email.as_str().to_string();

        // Skip the hashing cost for an obvious duplicate; create() still guards the race
        if self.directory.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Signup rejected, email already registered");
            return Err(AuthError::Conflict(email));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = UserRecord {
            full_name: command.full_name,
            email: command.email,
            username: command.username,
            password_hash,
        };

        let created_user = self.directory.create(user).await.map_err(|e| {
            tracing::warn!(email = %email, error = %e, "Failed to create user");
            AuthError::from(e)
        })?;

        tracing::info!(email = %created_user.email, "User signed up");

        Ok(self.tokens.issue(created_user.email.as_str())?)
    }

    async fn signin(&self, credentials: Credentials) -> Result<String, AuthError> {
        let Some(user) = self.directory.find_by_email(&credentials.email).await? else {
            tracing::debug!(email = %credentials.email, "Signin for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .verify_password(credentials.password, user.password_hash)
            .await?
        {
            tracing::debug!(email = %credentials.email, "Signin with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.tokens.issue(user.email.as_str())?)
    }

    async fn authorize(&self, token: &str) -> Result<AuthorizedSubject, AuthError> {
        let verified = self.tokens.verify(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            AuthError::Unauthorized(e.to_string())
        })?;

        if self.tokens.is_verified_revoked(&verified) {
            tracing::warn!(jti = %verified.claims.jti, "Revoked token presented");
            return Err(AuthError::Unauthorized(
                "Token has been revoked".to_string(),
            ));
        }

        Ok(AuthorizedSubject {
            subject: verified.claims.sub,
            token: verified.token,
        })
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.tokens.revoke(token)?;
        tracing::info!("User logged out");
        Ok(())
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        Ok(self.tokens.revoke(token)?)
    }

    async fn refresh_access(&self, token: &str) -> Result<String, AuthError> {
        self.tokens.refresh(token).map_err(|e| {
            tracing::warn!(error = %e, "Token refresh rejected");
            AuthError::from(e)
        })
    }
}
