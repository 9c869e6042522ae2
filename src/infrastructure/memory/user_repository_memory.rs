use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::user_repository::{InsertOutcome, UserRepository};
use crate::domain::users::user::{User, UserStatus};

/// Enforces the same uniqueness rules as the `users` table constraints.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_username(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self.users.read().await.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.users.read().await.iter().any(|u| u.email == email))
    }

    async fn find_active_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email && u.status == UserStatus::Active)
            .cloned())
    }

    async fn insert(&self, user: &User) -> anyhow::Result<InsertOutcome> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Ok(InsertOutcome::DuplicateUsername);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Ok(InsertOutcome::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(InsertOutcome::Inserted)
    }
}
