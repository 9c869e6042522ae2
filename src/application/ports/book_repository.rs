use async_trait::async_trait;

use crate::domain::books::book::{Book, BookDraft};

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Stores a new book stamped with `now` and returns it with its assigned id.
    async fn create(&self, draft: &BookDraft, now: i64) -> anyhow::Result<Book>;
    async fn count(&self) -> anyhow::Result<i64>;
    /// Newest first (`created_at` desc, then `id` desc).
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Book>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Book>>;
    /// Persists every editable field of `book`; false when the row is gone.
    async fn update(&self, book: &Book) -> anyhow::Result<bool>;
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;
}
