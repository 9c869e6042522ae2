use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::email_secret_repository::EmailSecretRepository;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::mail_dispatch::MailDispatcher;
use crate::application::services::passwords::PasswordHasher;
use crate::bootstrap::config::Config;
use crate::infrastructure::memory::book_repository_memory::InMemoryBookRepository;
use crate::infrastructure::memory::email_secret_repository_memory::InMemoryEmailSecretRepository;
use crate::infrastructure::memory::user_repository_memory::InMemoryUserRepository;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    book_repo: Arc<dyn BookRepository>,
    user_repo: Arc<dyn UserRepository>,
    email_secret_repo: Arc<dyn EmailSecretRepository>,
    mail: MailDispatcher,
    passwords: PasswordHasher,
}

impl AppServices {
    pub fn new(
        book_repo: Arc<dyn BookRepository>,
        user_repo: Arc<dyn UserRepository>,
        email_secret_repo: Arc<dyn EmailSecretRepository>,
        mail: MailDispatcher,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            book_repo,
            user_repo,
            email_secret_repo,
            mail,
            passwords,
        }
    }

    /// Wires the process-local repositories and starts the mail worker.
    /// Needs a running tokio runtime.
    pub fn in_memory(
        cfg: &Config,
        mailer: Arc<dyn Mailer>,
    ) -> anyhow::Result<(Self, JoinHandle<()>)> {
        let (mail, worker) = MailDispatcher::spawn(mailer, cfg.mail_queue_capacity);
        let services = Self::new(
            Arc::new(InMemoryBookRepository::default()),
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryEmailSecretRepository::default()),
            mail,
            password_hasher(cfg)?,
        );
        Ok((services, worker))
    }
}

pub fn password_hasher(cfg: &Config) -> anyhow::Result<PasswordHasher> {
    PasswordHasher::new(
        cfg.password.memory_kib,
        cfg.password.iterations,
        cfg.password.parallelism,
    )
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn book_repo(&self) -> Arc<dyn BookRepository> {
        self.services.book_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn email_secret_repo(&self) -> Arc<dyn EmailSecretRepository> {
        self.services.email_secret_repo.clone()
    }

    pub fn mail(&self) -> &MailDispatcher {
        &self.services.mail
    }

    pub fn passwords(&self) -> &PasswordHasher {
        &self.services.passwords
    }
}
