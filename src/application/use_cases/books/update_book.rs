use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft};

pub struct UpdateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> UpdateBook<'a, R> {
    /// Last write wins; concurrent updates are not detected.
    pub async fn execute(&self, id: i64, draft: &BookDraft) -> ServiceResult<Book> {
        let mut book = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("book"))?;
        book.apply(draft, chrono::Utc::now().timestamp());
        if !self.repo.update(&book).await? {
            return Err(ServiceError::NotFound("book"));
        }
        tracing::info!(book_id = id, "book_updated");
        Ok(book)
    }
}
