use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::UserError;

/// User directory persisted as a single JSON document.
///
/// The file holds `{"users": [...]}`. Records are loaded once at open and kept
/// in memory; every create rewrites the whole document while holding the lock,
/// so the uniqueness check and the write form one critical section.
pub struct JsonFileUserDirectory {
    path: PathBuf,
    users: Mutex<Vec<UserRecord>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDocument {
    users: Vec<StoredUser>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredUser {
    #[serde(default)]
    full_name: Option<String>,
    email: String,
    #[serde(default)]
    username: Option<String>,
    password_hash: String,
}

impl From<&UserRecord> for StoredUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.as_str().to_string(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
        }
    }
}

impl TryFrom<StoredUser> for UserRecord {
    type Error = UserError;

    fn try_from(stored: StoredUser) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(stored.email).map_err(|e| {
            UserError::StorageFailure(format!("Corrupt user record: {}", e))
        })?;

        Ok(UserRecord {
            full_name: stored.full_name,
            email,
            username: stored.username,
            password_hash: stored.password_hash,
        })
    }
}

impl JsonFileUserDirectory {
    /// Open the directory stored at `path`.
    ///
    /// A missing file yields an empty directory; the file is created on the
    /// first signup.
    ///
    /// # Errors
    /// * `StorageFailure` - File exists but cannot be read or parsed
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, UserError> {
        let path = path.into();

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<UserDocument>(&bytes).map_err(|e| {
                UserError::StorageFailure(format!(
                    "Failed to parse {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => UserDocument::default(),
            Err(e) => {
                return Err(UserError::StorageFailure(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let users = document
            .users
            .into_iter()
            .map(UserRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(path = %path.display(), users = users.len(), "User directory loaded");

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, users: &[UserRecord]) -> Result<(), UserError> {
        let document = UserDocument {
            users: users.iter().map(StoredUser::from).collect(),
        };
        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| UserError::StorageFailure(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| UserError::StorageFailure(e.to_string()))?;
        }

        // Readers never observe a half-written document
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, &bytes)
            .await
            .map_err(|e| UserError::StorageFailure(e.to_string()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| UserError::StorageFailure(e.to_string()))
    }
}

#[async_trait]
impl UserDirectory for JsonFileUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserError> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn create(&self, user: UserRecord) -> Result<UserRecord, UserError> {
        let mut users = self.users.lock().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.push(user.clone());

        if let Err(e) = self.persist(&users).await {
            users.pop();
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write user directory");
            return Err(e);
        }

        Ok(user)
    }
}
