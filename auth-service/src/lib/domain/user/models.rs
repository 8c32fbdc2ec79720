use std::fmt;
use std::str::FromStr;

use crate::user::errors::EmailError;

/// Registered account as held by the user directory.
///
/// Created on signup and never modified afterwards. Only the password hash is
/// kept; the plaintext never reaches the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub full_name: Option<String>,
    pub email: EmailAddress,
    pub username: Option<String>,
    pub password_hash: String,
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account
pub struct SignupCommand {
    pub full_name: Option<String>,
    pub email: EmailAddress,
    pub username: Option<String>,
    /// Plain text password (hashed by the service)
    pub password: String,
}

impl SignupCommand {
    pub fn new(
        full_name: Option<String>,
        email: EmailAddress,
        username: Option<String>,
        password: String,
    ) -> Self {
        Self {
            full_name,
            email,
            username,
            password,
        }
    }
}

impl fmt::Debug for SignupCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupCommand")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Email and plaintext password presented at signin. Never persisted.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
