//! Authentication core library
//!
//! Provides the credential and token engine used by the auth service:
//! - Password hashing (Argon2id)
//! - JWT encoding and signature checking
//! - Token lifecycle with revocation and refresh
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Token Lifecycle
//! ```
//! use std::sync::Arc;
//!
//! use auth::{InMemoryRevocationStore, JwtHandler, TokenPolicy, TokenService};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(
//!     handler,
//!     Arc::new(InMemoryRevocationStore::new()),
//!     TokenPolicy::default(),
//! );
//!
//! let token = tokens.issue("demo@sample.com").unwrap();
//! let verified = tokens.verify(&token).unwrap();
//! assert_eq!(verified.claims.sub, "demo@sample.com");
//!
//! tokens.revoke(&token).unwrap();
//! assert!(tokens.is_revoked(&token));
//! ```

pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::InMemoryRevocationStore;
pub use token::RevocationStore;
pub use token::TokenError;
pub use token::TokenPolicy;
pub use token::TokenService;
pub use token::VerifiedToken;
