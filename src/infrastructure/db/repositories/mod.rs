pub mod book_repository_sqlx;
pub mod email_secret_repository_sqlx;
pub mod user_repository_sqlx;
