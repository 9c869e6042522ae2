use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::email_secret_repository::EmailSecretRepository;
use crate::application::ports::user_repository::{InsertOutcome, UserRepository};
use crate::application::services::passwords::PasswordHasher;
use crate::application::services::secrets;
use crate::domain::users::user::{User, UserStatus};

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub email_secret_code: String,
}

pub struct Signup<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: EmailSecretRepository + ?Sized,
{
    pub users: &'a U,
    pub secrets: &'a S,
    pub passwords: &'a PasswordHasher,
}

fn username_taken() -> ServiceError {
    ServiceError::validation("username", "username already taken")
}

fn email_taken() -> ServiceError {
    ServiceError::validation("email", "email address already taken")
}

impl<'a, U, S> Signup<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: EmailSecretRepository + ?Sized,
{
    pub async fn execute(&self, req: &SignupRequest) -> ServiceResult<User> {
        let username = req.username.trim().to_lowercase();
        let email = req.email.trim().to_lowercase();

        if !self.secrets.matches(&email, &req.email_secret_code).await? {
            return Err(ServiceError::validation(
                "email_secret_code",
                "Invalid secret code",
            ));
        }
        if self.users.exists_by_username(&username).await? {
            return Err(username_taken());
        }
        if self.users.exists_by_email(&email).await? {
            return Err(email_taken());
        }

        let now = chrono::Utc::now().timestamp();
        let user = User {
            id: Uuid::new_v4(),
            username,
            full_name: req.full_name.trim().to_string(),
            email,
            auth_key: secrets::opaque_token(),
            password_hash: self.passwords.hash(&req.password)?,
            password_reset_token: secrets::stamped_token(now),
            verification_token: secrets::stamped_token(now),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        // The checks above are advisory; the store's unique constraints decide races.
        match self.users.insert(&user).await? {
            InsertOutcome::Inserted => {
                tracing::info!(user_id = %user.id, username = %user.username, "user_registered");
                Ok(user)
            }
            InsertOutcome::DuplicateUsername => Err(username_taken()),
            InsertOutcome::DuplicateEmail => Err(email_taken()),
        }
    }
}
