use async_trait::async_trait;

#[async_trait]
pub trait EmailSecretRepository: Send + Sync {
    /// Replaces any code previously issued for `email`.
    async fn upsert(&self, email: &str, secret_code: &str, now: i64) -> anyhow::Result<()>;
    async fn matches(&self, email: &str, secret_code: &str) -> anyhow::Result<bool>;
}
