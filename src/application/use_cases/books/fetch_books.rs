use crate::application::dto::books::BookPage;
use crate::application::error::ServiceResult;
use crate::application::ports::book_repository::BookRepository;

pub const DEFAULT_PER_PAGE: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub per_page: i64,
    pub page_count: i64,
    pub current_page: i64,
    pub offset: i64,
}

/// `page_count` is the floor of `total / per_page`. The requested page is
/// clamped to `page_count` and then raised to at least 1.
pub fn page_window(total: i64, per_page: i64, page: i64) -> PageWindow {
    let per_page = if per_page <= 0 {
        DEFAULT_PER_PAGE
    } else {
        per_page
    };
    let page_count = total.max(0) / per_page;
    let current_page = page.min(page_count).max(1);
    PageWindow {
        per_page,
        page_count,
        current_page,
        offset: per_page * (current_page - 1),
    }
}

pub struct FetchBooks<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> FetchBooks<'a, R> {
    pub async fn execute(&self, per_page: i64, page: i64) -> ServiceResult<BookPage> {
        let total_count = self.repo.count().await?;
        let window = page_window(total_count, per_page, page);
        let books = self.repo.list(window.per_page, window.offset).await?;
        Ok(BookPage {
            books,
            total_count,
            page_count: window.page_count,
            current_page: window.current_page,
            per_page: window.per_page,
        })
    }
}
