use auth::TokenError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Failures surfaced by the auth orchestrator.
///
/// None of these are retried; callers report them as they are.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Wrong login details")]
    InvalidCredentials,

    #[error("Email already exists: {0}")]
    Conflict(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid refresh token: {0}")]
    InvalidToken(String),

    #[error("Token is not expired or not soon to expire")]
    NotYetRefreshable,

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::Conflict(email),
            UserError::StorageFailure(msg) => AuthError::StorageFailure(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Expired => AuthError::Expired,
            TokenError::Malformed(_) => AuthError::Unauthorized(err.to_string()),
            TokenError::InvalidToken(msg) => AuthError::InvalidToken(msg),
            TokenError::NotYetRefreshable => AuthError::NotYetRefreshable,
            TokenError::SigningFailed(msg) => AuthError::Internal(msg),
        }
    }
}
