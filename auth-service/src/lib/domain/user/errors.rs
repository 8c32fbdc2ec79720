use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for user directory operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}
