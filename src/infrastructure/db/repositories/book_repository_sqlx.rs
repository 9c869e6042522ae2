use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft};
use crate::infrastructure::db::PgPool;

pub struct SqlxBookRepository {
    pub pool: PgPool,
}

impl SqlxBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn book_from_row(r: &PgRow) -> Book {
    Book {
        id: r.get("id"),
        title: r.get("title"),
        author: r.get("author"),
        content: r.get("content"),
        price: r.get("price"),
        rating: r.get("rating"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl BookRepository for SqlxBookRepository {
    async fn create(&self, draft: &BookDraft, now: i64) -> anyhow::Result<Book> {
        let row = sqlx::query(
            r#"INSERT INTO books (title, author, content, price, rating, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $6)
               RETURNING id, title, author, content, price, rating, created_at, updated_at"#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.content)
        .bind(draft.price)
        .bind(draft.rating)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(book_from_row(&row))
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"SELECT id, title, author, content, price, rating, created_at, updated_at
               FROM books
               ORDER BY created_at DESC, id DESC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(book_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(
            r#"SELECT id, title, author, content, price, rating, created_at, updated_at
               FROM books WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(book_from_row))
    }

    async fn update(&self, book: &Book) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE books
               SET title = $1, author = $2, content = $3, price = $4, rating = $5, updated_at = $6
               WHERE id = $7"#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.content)
        .bind(book.price)
        .bind(book.rating)
        .bind(book.updated_at)
        .bind(book.id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
