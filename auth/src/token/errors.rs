use thiserror::Error;

use crate::jwt::JwtError;

/// Failures of the token lifecycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Invalid refresh token: {0}")]
    InvalidToken(String),

    #[error("Token is not expired or not soon to expire")]
    NotYetRefreshable,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidSignature => TokenError::InvalidSignature,
            JwtError::Malformed(msg) => TokenError::Malformed(msg),
            JwtError::EncodingFailed(msg) => TokenError::SigningFailed(msg),
            JwtError::MissingSecret | JwtError::UnsupportedAlgorithm(_) => {
                TokenError::SigningFailed(err.to_string())
            }
        }
    }
}
