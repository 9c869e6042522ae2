use crate::application::error::ServiceResult;
use crate::application::ports::book_repository::BookRepository;

pub struct DeleteBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> DeleteBook<'a, R> {
    /// Returns the number of rows removed; zero means the id did not exist.
    pub async fn execute(&self, id: i64) -> ServiceResult<u64> {
        let removed = self.repo.delete(id).await?;
        if removed > 0 {
            tracing::info!(book_id = id, "book_deleted");
        }
        Ok(removed)
    }
}
