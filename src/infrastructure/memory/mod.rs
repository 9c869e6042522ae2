//! Process-local adapters used by `STORAGE_BACKEND=memory` and by tests.

pub mod book_repository_memory;
pub mod email_secret_repository_memory;
pub mod user_repository_memory;
