use async_trait::async_trait;

use crate::application::ports::email_secret_repository::EmailSecretRepository;
use crate::infrastructure::db::PgPool;

pub struct SqlxEmailSecretRepository {
    pub pool: PgPool,
}

impl SqlxEmailSecretRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailSecretRepository for SqlxEmailSecretRepository {
    async fn upsert(&self, email: &str, secret_code: &str, now: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO email_validation (email, secret_code, created_at, updated_at)
               VALUES ($1, $2, $3, $3)
               ON CONFLICT (email) DO UPDATE
               SET secret_code = EXCLUDED.secret_code, updated_at = EXCLUDED.updated_at"#,
        )
        .bind(email)
        .bind(secret_code)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn matches(&self, email: &str, secret_code: &str) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM email_validation WHERE email = $1 AND secret_code = $2)",
        )
        .bind(email)
        .bind(secret_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}
