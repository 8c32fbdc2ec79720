pub mod errors;
pub mod revocation;
pub mod service;

pub use errors::TokenError;
pub use revocation::InMemoryRevocationStore;
pub use revocation::RevocationStore;
pub use service::TokenPolicy;
pub use service::TokenService;
pub use service::VerifiedToken;
