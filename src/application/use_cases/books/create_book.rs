use crate::application::error::ServiceResult;
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft};

pub struct CreateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> CreateBook<'a, R> {
    pub async fn execute(&self, draft: &BookDraft) -> ServiceResult<Book> {
        let now = chrono::Utc::now().timestamp();
        let book = self.repo.create(draft, now).await?;
        tracing::info!(book_id = book.id, "book_created");
        Ok(book)
    }
}
