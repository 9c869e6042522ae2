use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::application::ports::mailer::{Mailer, OutgoingMail};

struct MailJob {
    mail: OutgoingMail,
    done: oneshot::Sender<anyhow::Result<()>>,
}

/// Handle to the background mail worker. Cloning shares the same queue.
#[derive(Clone)]
pub struct MailDispatcher {
    tx: mpsc::Sender<MailJob>,
}

/// Resolves once the worker has attempted delivery.
pub struct MailReceipt(oneshot::Receiver<anyhow::Result<()>>);

impl MailReceipt {
    pub async fn wait(self) -> anyhow::Result<()> {
        match self.0.await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!("mail worker stopped before reporting")),
        }
    }
}

impl MailDispatcher {
    /// Starts a single worker draining a queue of at most `capacity` mails.
    /// The worker exits once every dispatcher handle is dropped.
    pub fn spawn(mailer: Arc<dyn Mailer>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<MailJob>(capacity.max(1));
        let handle = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let result = mailer.send(&job.mail).await;
                match &result {
                    Ok(()) => tracing::debug!(to = %job.mail.to, subject = %job.mail.subject, "mail_sent"),
                    Err(e) => {
                        tracing::error!(to = %job.mail.to, subject = %job.mail.subject, error = ?e, "mail_send_failed")
                    }
                }
                // Receipt may already be dropped by a caller that does not wait.
                let _ = job.done.send(result);
            }
            tracing::debug!("mail_worker_stopped");
        });
        (Self { tx }, handle)
    }

    /// Queues `mail` without waiting for delivery. Fails when the queue is full.
    pub fn enqueue(&self, mail: OutgoingMail) -> anyhow::Result<MailReceipt> {
        let (done, rx) = oneshot::channel();
        self.tx
            .try_send(MailJob { mail, done })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => anyhow::anyhow!("mail queue is full"),
                mpsc::error::TrySendError::Closed(_) => anyhow::anyhow!("mail worker is not running"),
            })?;
        Ok(MailReceipt(rx))
    }
}
