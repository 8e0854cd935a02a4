//! User directory: read access to the user population.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::User;

/// Read interface over registered users.
///
/// Implementations are externally synchronized; callers never cache results.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// All users flagged as able to accept jobs, read fresh on every call.
    async fn find_helper_eligible(&self) -> Result<Vec<User>, StoreError>;

    /// Look a user up by email.
    async fn find_by_id(&self, email: &str) -> Result<User, StoreError>;
}

/// Directory backed by a map held in memory.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl fmt::Debug for InMemoryUserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryUserDirectory")
            .field("users", &"<RwLock<HashMap<String, User>>>")
            .finish()
    }
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory pre-populated with `users`. Later duplicates replace earlier ones.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users
            .into_iter()
            .map(|u| (u.email.clone(), u))
            .collect::<HashMap<_, _>>();
        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a user, returning the previous record.
    pub async fn upsert(&self, user: User) -> Option<User> {
        let mut users = self.users.write().await;
        users.insert(user.email.clone(), user)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_helper_eligible(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.is_helper_eligible())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, email: &str) -> Result<User, StoreError> {
        let users = self.users.read().await;
        users
            .get(email)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }
}
