use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::PathRejection},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::error::ServiceError;
use crate::application::use_cases::books::create_book::CreateBook;
use crate::application::use_cases::books::delete_book::DeleteBook;
use crate::application::use_cases::books::fetch_books::{DEFAULT_PER_PAGE, FetchBooks};
use crate::application::use_cases::books::get_book::GetBook;
use crate::application::use_cases::books::update_book::UpdateBook;
use crate::bootstrap::app_context::AppContext;
use crate::domain::books::book as domain;
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::{ApiError, ErrorBody, FieldError};
use crate::presentation::http::extract::ValidatedJson;
use crate::presentation::http::response::{
    BookEnvelope, BookListEnvelope, Envelope, PageMeta, TextEnvelope,
};

#[derive(Debug, Serialize, ToSchema)]
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

impl From<domain::Book> for Book {
    fn from(b: domain::Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            content: b.content,
            price: b.price,
            rating: b.rating,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    #[validate(length(min = 1, message = "required"))]
    pub author: String,
    #[validate(length(min = 1, message = "required"))]
    pub content: String,
    #[validate(range(min = 1.0, message = "gte"))]
    pub price: f64,
    #[validate(range(max = 5, message = "lte"))]
    pub rating: i32,
}

impl From<BookForm> for domain::BookDraft {
    fn from(f: BookForm) -> Self {
        Self {
            title: f.title,
            author: f.author,
            content: f.content,
            price: f.price,
            rating: f.rating,
        }
    }
}

/// Raw pager parameters; anything unparsable falls back to the defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    #[serde(rename = "perPage")]
    #[param(value_type = Option<i64>)]
    pub per_page: Option<String>,
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

impl BookListQuery {
    fn per_page(&self) -> i64 {
        self.per_page
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PER_PAGE)
    }

    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/book", get(fetch_books))
        .route("/book/:id", get(get_book))
        .route("/auth/book", post(create_book))
        .route("/auth/book/:id", put(update_book).delete(delete_book))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/v1/book", tag = "Books", params(BookListQuery), responses(
    (status = 200, body = BookListEnvelope)
))]
pub async fn fetch_books(
    State(ctx): State<AppContext>,
    Query(q): Query<BookListQuery>,
) -> Result<Json<Envelope<Vec<Book>>>, ApiError> {
    let repo = ctx.book_repo();
    let uc = FetchBooks {
        repo: repo.as_ref(),
    };
    let page = uc.execute(q.per_page(), q.page()).await?;
    let meta = PageMeta {
        total_count: page.total_count,
        page_count: page.page_count,
        current_page: page.current_page,
        per_page: page.per_page,
    };
    let books = page.books.into_iter().map(Book::from).collect();
    Ok(Json(Envelope::paged(books, meta)))
}

#[utoipa::path(get, path = "/v1/book/{id}", tag = "Books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, body = BookEnvelope),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_book(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.book_repo();
    let uc = GetBook {
        repo: repo.as_ref(),
    };
    let book = uc.execute(id).await?;
    Ok(Json(Envelope::success(book.into())))
}

#[utoipa::path(post, path = "/v1/auth/book", tag = "Books", request_body = BookForm,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, body = BookEnvelope),
        (status = 400, body = [FieldError]),
        (status = 401, body = ErrorBody)
    ))]
pub async fn create_book(
    State(ctx): State<AppContext>,
    _user: AuthUser,
    ValidatedJson(form): ValidatedJson<BookForm>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let repo = ctx.book_repo();
    let uc = CreateBook {
        repo: repo.as_ref(),
    };
    let book = uc.execute(&form.into()).await?;
    Ok(Json(Envelope::success(book.into())))
}

#[utoipa::path(put, path = "/v1/auth/book/{id}", tag = "Books", request_body = BookForm,
    params(("id" = i64, Path, description = "Book id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, body = BookEnvelope),
        (status = 400, body = [FieldError]),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn update_book(
    State(ctx): State<AppContext>,
    _user: AuthUser,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(form): ValidatedJson<BookForm>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.book_repo();
    let uc = UpdateBook {
        repo: repo.as_ref(),
    };
    let book = uc.execute(id, &form.into()).await?;
    Ok(Json(Envelope::success(book.into())))
}

#[utoipa::path(delete, path = "/v1/auth/book/{id}", tag = "Books",
    params(("id" = i64, Path, description = "Book id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, body = TextEnvelope),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_book(
    State(ctx): State<AppContext>,
    _user: AuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.book_repo();
    let uc = DeleteBook {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await? == 0 {
        return Err(ServiceError::NotFound("book").into());
    }
    Ok(Json(Envelope::success("deleted".to_string())))
}
