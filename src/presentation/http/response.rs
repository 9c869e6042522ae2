use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::http::auth::Claims;
use crate::presentation::http::books::Book;
use crate::presentation::http::users::EmailSecretResponse;

pub const SUCCESS: &str = "Success";

#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub total_count: i64,
    pub page_count: i64,
    pub current_page: i64,
    pub per_page: i64,
}

/// Wrapper shared by every successful response.
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    BookEnvelope = Envelope<Book>,
    BookListEnvelope = Envelope<Vec<Book>>,
    TextEnvelope = Envelope<String>,
    EmailSecretEnvelope = Envelope<EmailSecretResponse>,
    ClaimsEnvelope = Envelope<Claims>
)]
pub struct Envelope<T> {
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::with_message(data, SUCCESS)
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            meta: None,
        }
    }

    pub fn paged(data: T, meta: PageMeta) -> Self {
        Self {
            data,
            message: SUCCESS.to_string(),
            meta: Some(meta),
        }
    }
}
