use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::PasswordHasher;
use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub struct Login<'a, U: UserRepository + ?Sized> {
    pub users: &'a U,
    pub passwords: &'a PasswordHasher,
}

fn invalid_password() -> ServiceError {
    ServiceError::validation("password", "invalid password")
}

impl<'a, U: UserRepository + ?Sized> Login<'a, U> {
    /// Unknown, inactive and wrong-password accounts fail with the same error.
    pub async fn execute(&self, req: &LoginRequest) -> ServiceResult<User> {
        let email = req.email.trim().to_lowercase();
        let Some(user) = self.users.find_active_by_email(&email).await? else {
            return Err(invalid_password());
        };
        if !self.passwords.verify(&req.password, &user.password_hash)? {
            return Err(invalid_password());
        }
        tracing::debug!(user_id = %user.id, "user_logged_in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::InsertOutcome;
    use crate::domain::users::user::UserStatus;
    use crate::infrastructure::memory::user_repository_memory::InMemoryUserRepository;
    use uuid::Uuid;

    async fn seeded(status: UserStatus) -> (InMemoryUserRepository, PasswordHasher) {
        let passwords = PasswordHasher::new(1024, 1, 1).unwrap();
        let users = InMemoryUserRepository::default();
        let user = User {
            id: Uuid::new_v4(),
            username: "jo".into(),
            full_name: "Jo".into(),
            email: "jo@example.com".into(),
            auth_key: "k".into(),
            password_hash: passwords.hash("hunter22").unwrap(),
            password_reset_token: "r_1".into(),
            verification_token: "v_1".into(),
            status,
            created_at: 1,
            updated_at: 1,
        };
        assert_eq!(users.insert(&user).await.unwrap(), InsertOutcome::Inserted);
        (users, passwords)
    }

    fn req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn accepts_correct_password_case_insensitive_email() {
        let (users, passwords) = seeded(UserStatus::Active).await;
        let user = Login {
            users: &users,
            passwords: &passwords,
        }
        .execute(&req("JO@example.com", "hunter22"))
        .await
        .unwrap();
        assert_eq!(user.username, "jo");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (users, passwords) = seeded(UserStatus::Active).await;
        let uc = Login {
            users: &users,
            passwords: &passwords,
        };

        for attempt in [req("jo@example.com", "nope"), req("ghost@example.com", "hunter22")] {
            match uc.execute(&attempt).await.unwrap_err() {
                ServiceError::Validation { field, message } => {
                    assert_eq!(field, "password");
                    assert_eq!(message, "invalid password");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn inactive_accounts_cannot_log_in() {
        let (users, passwords) = seeded(UserStatus::Inactive).await;
        let err = Login {
            users: &users,
            passwords: &passwords,
        }
        .execute(&req("jo@example.com", "hunter22"))
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "password", .. }));
    }
}
