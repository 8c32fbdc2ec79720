use async_trait::async_trait;

use crate::domain::user::models::UserRecord;
use crate::user::errors::UserError;

/// Record store of accounts keyed by email.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve an account by email address.
    ///
    /// # Returns
    /// Optional record (None if no account uses this email)
    ///
    /// # Errors
    /// * `StorageFailure` - Backing store could not be read
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserError>;

    /// Persist a new account.
    ///
    /// The uniqueness check and the write happen atomically, so concurrent
    /// creates for one email yield exactly one success.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StorageFailure` - Backing store could not be written
    async fn create(&self, user: UserRecord) -> Result<UserRecord, UserError>;
}
