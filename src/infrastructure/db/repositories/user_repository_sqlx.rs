use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::user_repository::{InsertOutcome, UserRepository};
use crate::domain::users::user::{User, UserStatus};
use crate::infrastructure::db::PgPool;

const USERNAME_KEY: &str = "users_username_key";
const EMAIL_KEY: &str = "users_email_key";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn exists_by_username(&self, username: &str) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_active_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, username, full_name, email, auth_key, password_hash,
                      password_reset_token, verification_token, status, created_at, updated_at
               FROM users WHERE email = $1 AND status = $2"#,
        )
        .bind(email)
        .bind(UserStatus::Active.as_i16())
        .fetch_optional(&self.pool)
        .await?;
        let Some(r) = row else {
            return Ok(None);
        };
        let status: i16 = r.get("status");
        let status = UserStatus::from_i16(status)
            .ok_or_else(|| anyhow::anyhow!("unknown user status {status}"))?;
        Ok(Some(User {
            id: r.get("id"),
            username: r.get("username"),
            full_name: r.get("full_name"),
            email: r.get("email"),
            auth_key: r.get("auth_key"),
            password_hash: r.get("password_hash"),
            password_reset_token: r.get("password_reset_token"),
            verification_token: r.get("verification_token"),
            status,
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    async fn insert(&self, user: &User) -> anyhow::Result<InsertOutcome> {
        let res = sqlx::query(
            r#"INSERT INTO users (id, username, full_name, email, auth_key, password_hash,
                                  password_reset_token, verification_token, status, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.auth_key)
        .bind(&user.password_hash)
        .bind(&user.password_reset_token)
        .bind(&user.verification_token)
        .bind(user.status.as_i16())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                match db.constraint() {
                    Some(USERNAME_KEY) => Ok(InsertOutcome::DuplicateUsername),
                    Some(EMAIL_KEY) => Ok(InsertOutcome::DuplicateEmail),
                    _ => Err(sqlx::Error::Database(db).into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
