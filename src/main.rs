use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use bookshelf_api::application::ports::mailer::Mailer;
use bookshelf_api::application::services::mail_dispatch::MailDispatcher;
use bookshelf_api::bootstrap::app_context::{AppContext, AppServices, password_hasher};
use bookshelf_api::bootstrap::config::{Config, StorageBackend};
use bookshelf_api::infrastructure::db::repositories::book_repository_sqlx::SqlxBookRepository;
use bookshelf_api::infrastructure::db::repositories::email_secret_repository_sqlx::SqlxEmailSecretRepository;
use bookshelf_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use bookshelf_api::infrastructure::mail::log_mailer::LogMailer;
use bookshelf_api::infrastructure::mail::smtp_mailer::SmtpMailer;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bookshelf_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting bookshelf backend");

    let mailer: Arc<dyn Mailer> = match &cfg.smtp {
        Some(smtp) => {
            info!(host = %smtp.host, port = smtp.port, "smtp_mailer_enabled");
            Arc::new(SmtpMailer::new(smtp)?)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, secret codes will only be logged");
            Arc::new(LogMailer::default())
        }
    };

    let (services, pool, mail_worker) = match cfg.storage_backend {
        StorageBackend::Postgres => {
            let pool = bookshelf_api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.database_max_connections,
            )
            .await?;
            bookshelf_api::infrastructure::db::migrate(&pool).await?;
            let (mail, worker) = MailDispatcher::spawn(mailer, cfg.mail_queue_capacity);
            let services = AppServices::new(
                Arc::new(SqlxBookRepository::new(pool.clone())),
                Arc::new(SqlxUserRepository::new(pool.clone())),
                Arc::new(SqlxEmailSecretRepository::new(pool.clone())),
                mail,
                password_hasher(&cfg)?,
            );
            (services, Some(pool), worker)
        }
        StorageBackend::Memory => {
            tracing::warn!("storage_backend_memory_data_is_not_persisted");
            let (services, worker) = AppServices::in_memory(&cfg, mailer)?;
            (services, None, worker)
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers),
        Some(Err(_)) | None if cfg.is_production => {
            // FRONTEND_URL is enforced by Config in production; deny all if it is unusable
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                    "http://invalid",
                )))
                .allow_methods(methods)
                .allow_headers(headers)
        }
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers),
    };

    let app = bookshelf_api::presentation::http::router(ctx, pool)
        .layer(TimeoutLayer::new(Duration::from_secs(cfg.request_timeout_secs)))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    });

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }

    // The router (and with it every dispatcher handle) is gone, so the worker
    // finishes the queued mail and exits.
    match tokio::time::timeout(Duration::from_secs(10), mail_worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "Mail worker panicked"),
        Err(_) => error!("Mail worker did not drain before shutdown"),
    }
    Ok(())
}
