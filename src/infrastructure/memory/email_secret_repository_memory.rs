use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::email_secret_repository::EmailSecretRepository;

#[derive(Default)]
pub struct InMemoryEmailSecretRepository {
    codes: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl EmailSecretRepository for InMemoryEmailSecretRepository {
    async fn upsert(&self, email: &str, secret_code: &str, _now: i64) -> anyhow::Result<()> {
        self.codes
            .write()
            .await
            .insert(email.to_string(), secret_code.to_string());
        Ok(())
    }

    async fn matches(&self, email: &str, secret_code: &str) -> anyhow::Result<bool> {
        Ok(self
            .codes
            .read()
            .await
            .get(email)
            .is_some_and(|code| code == secret_code))
    }
}
