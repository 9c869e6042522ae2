#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bookshelf_api::bootstrap::app_context::{AppContext, AppServices};
use bookshelf_api::bootstrap::config::{Config, PasswordConfig, StorageBackend};
use bookshelf_api::domain::users::user::{User, UserStatus};
use bookshelf_api::infrastructure::mail::log_mailer::LogMailer;
use bookshelf_api::presentation::http::auth::issue_token;

pub struct TestApp {
    pub router: Router,
    pub cfg: Config,
    pub mailer: Arc<LogMailer>,
}

/// In-memory app with cheap password hashing. Must run inside a tokio runtime.
pub fn spawn_app() -> TestApp {
    let cfg = Config {
        storage_backend: StorageBackend::Memory,
        password: PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        ..Config::default()
    };
    let mailer = Arc::new(LogMailer::default());
    let (services, _worker) = AppServices::in_memory(&cfg, mailer.clone()).unwrap();
    let ctx = AppContext::new(cfg.clone(), services);
    TestApp {
        router: bookshelf_api::presentation::http::router(ctx, None),
        cfg,
        mailer,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Bearer token for a user that only exists inside the token.
    pub fn token(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let user = User {
            id: Uuid::new_v4(),
            username: "librarian".into(),
            full_name: "Lib Rarian".into(),
            email: "librarian@example.com".into(),
            auth_key: "key".into(),
            password_hash: "unused".into(),
            password_reset_token: format!("reset_{now}"),
            verification_token: format!("verify_{now}"),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };
        issue_token(&self.cfg.jwt, &user).unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "bookshelf-test-boundary";

pub fn multipart(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
