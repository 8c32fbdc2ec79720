use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::UserError;

/// Process-local user directory.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    /// email -> record
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: UserRecord) -> Result<UserRecord, UserError> {
        let mut users = self.users.write().await;

        match users.entry(user.email.as_str().to_string()) {
            Entry::Occupied(_) => Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;

    fn record(email: &str, password_hash: &str) -> UserRecord {
        UserRecord {
            full_name: Some("Demo User".to_string()),
            email: EmailAddress::new(email.to_string()).unwrap(),
            username: Some("demo4u".to_string()),
            password_hash: password_hash.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let directory = InMemoryUserDirectory::new();
        assert!(directory.is_empty().await);

        directory
            .create(record("demo@sample.com", "$argon2id$hash"))
            .await
            .unwrap();

        let found = directory.find_by_email("demo@sample.com").await.unwrap();
        assert_eq!(found, Some(record("demo@sample.com", "$argon2id$hash")));
        assert!(directory
            .find_by_email("other@sample.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let directory = InMemoryUserDirectory::new();

        directory
            .create(record("demo@sample.com", "$argon2id$first"))
            .await
            .unwrap();
        let result = directory
            .create(record("demo@sample.com", "$argon2id$second"))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
        let stored = directory
            .find_by_email("demo@sample.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.password_hash, "$argon2id$first");
        assert_eq!(directory.len().await, 1);
    }
}
