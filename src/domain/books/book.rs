#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub price: f64,
    pub rating: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Field values accepted from clients when creating or replacing a book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub content: String,
    pub price: f64,
    pub rating: i32,
}

impl Book {
    /// Overwrites every client-editable field; `id` and `created_at` are kept.
    pub fn apply(&mut self, draft: &BookDraft, now: i64) {
        self.title = draft.title.clone();
        self.author = draft.author.clone();
        self.content = draft.content.clone();
        self.price = draft.price;
        self.rating = draft.rating;
        self.updated_at = now;
    }
}
