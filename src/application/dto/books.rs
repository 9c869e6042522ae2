use crate::domain::books::book::Book;

/// One page of the catalog plus the numbers needed to render a pager.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total_count: i64,
    pub page_count: i64,
    pub current_page: i64,
    pub per_page: i64,
}
