use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::mailer::{Mailer, OutgoingMail};

const OUTBOX_LIMIT: usize = 100;

/// Stands in for SMTP when no relay is configured: logs each mail and keeps
/// the most recent ones in memory.
#[derive(Default)]
pub struct LogMailer {
    outbox: Mutex<VecDeque<OutgoingMail>>,
}

impl LogMailer {
    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.outbox.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()> {
        tracing::info!(to = %mail.to, subject = %mail.subject, "mail_logged_smtp_disabled");
        let mut outbox = self.outbox.lock().await;
        if outbox.len() == OUTBOX_LIMIT {
            outbox.pop_front();
        }
        outbox.push_back(mail.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_only_recent_mail() {
        let mailer = LogMailer::default();
        for i in 0..(OUTBOX_LIMIT + 5) {
            mailer
                .send(&OutgoingMail {
                    to: format!("{i}@example.com"),
                    subject: "s".into(),
                    html_body: "b".into(),
                })
                .await
                .unwrap();
        }
        let sent = mailer.sent().await;
        assert_eq!(sent.len(), OUTBOX_LIMIT);
        assert_eq!(sent[0].to, "5@example.com");
    }
}
