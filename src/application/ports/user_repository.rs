use async_trait::async_trait;

use crate::domain::users::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateUsername,
    DuplicateEmail,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> anyhow::Result<bool>;
    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool>;
    async fn find_active_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Uniqueness races are reported through the outcome instead of an error.
    async fn insert(&self, user: &User) -> anyhow::Result<InsertOutcome>;
}
