use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft};

#[derive(Default)]
struct Shelf {
    last_id: i64,
    rows: BTreeMap<i64, Book>,
}

#[derive(Default)]
pub struct InMemoryBookRepository {
    shelf: RwLock<Shelf>,
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, draft: &BookDraft, now: i64) -> anyhow::Result<Book> {
        let mut shelf = self.shelf.write().await;
        shelf.last_id += 1;
        let book = Book {
            id: shelf.last_id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            content: draft.content.clone(),
            price: draft.price,
            rating: draft.rating,
            created_at: now,
            updated_at: now,
        };
        shelf.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.shelf.read().await.rows.len() as i64)
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Book>> {
        let shelf = self.shelf.read().await;
        let mut books: Vec<Book> = shelf.rows.values().cloned().collect();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(books
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Book>> {
        Ok(self.shelf.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, book: &Book) -> anyhow::Result<bool> {
        let mut shelf = self.shelf.write().await;
        match shelf.rows.get_mut(&book.id) {
            Some(row) => {
                *row = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let removed = self.shelf.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
