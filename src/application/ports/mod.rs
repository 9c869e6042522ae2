pub mod book_repository;
pub mod email_secret_repository;
pub mod mailer;
pub mod user_repository;
