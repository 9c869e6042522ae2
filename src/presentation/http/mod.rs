use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::infrastructure::db::PgPool;

pub mod auth;
pub mod books;
pub mod error;
pub mod extract;
pub mod health;
pub mod response;
pub mod users;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
        paths(
            books::fetch_books,
            books::get_book,
            books::create_book,
            books::update_book,
            books::delete_book,
            users::request_secret,
            users::signup,
            users::login,
            users::profile,
            health::health,
        ),
        components(schemas(
            books::Book,
            books::BookForm,
            users::RequestSecretForm,
            users::EmailSecretResponse,
            users::SignupForm,
            users::LoginForm,
            auth::Claims,
            response::PageMeta,
            response::BookEnvelope,
            response::BookListEnvelope,
            response::TextEnvelope,
            response::EmailSecretEnvelope,
            response::ClaimsEnvelope,
            error::FieldError,
            error::ErrorBody,
            health::HealthResp,
        )),
        modifiers(&BearerAuth),
        tags(
            (name = "Books", description = "Book catalog"),
            (name = "Users", description = "Signup, login and profile"),
            (name = "Health", description = "System health checks")
        )
    )]
pub struct ApiDoc;

/// Every route of the service plus the Swagger UI, without middleware layers.
pub fn router(ctx: AppContext, pool: Option<PgPool>) -> Router {
    Router::new()
        .merge(health::routes(pool))
        .nest("/v1", books::routes(ctx.clone()))
        .nest("/v1", users::routes(ctx))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}
