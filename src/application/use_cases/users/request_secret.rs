use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::email_secret_repository::EmailSecretRepository;
use crate::application::ports::mailer::OutgoingMail;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::mail_dispatch::{MailDispatcher, MailReceipt};
use crate::application::services::secrets;
use crate::domain::users::user::EmailSecret;

pub const SECRET_MAIL_SUBJECT: &str = "Email Validation Secret Code";

pub struct RequestSecret<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: EmailSecretRepository + ?Sized,
{
    pub users: &'a U,
    pub secrets: &'a S,
    pub mail: &'a MailDispatcher,
}

pub struct IssuedSecret {
    pub secret: EmailSecret,
    pub receipt: MailReceipt,
}

impl<'a, U, S> RequestSecret<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: EmailSecretRepository + ?Sized,
{
    /// Issues a fresh code for `email`, replacing any earlier one, and queues
    /// it for delivery.
    pub async fn execute(&self, email: &str) -> ServiceResult<IssuedSecret> {
        let email = email.trim().to_lowercase();
        if self.users.exists_by_email(&email).await? {
            return Err(ServiceError::validation(
                "email",
                "invalid email address, already registered",
            ));
        }

        let secret_code = secrets::secret_code();
        let now = chrono::Utc::now().timestamp();
        self.secrets.upsert(&email, &secret_code, now).await?;

        let receipt = self.mail.enqueue(secret_code_mail(&email, &secret_code))?;
        tracing::info!(email = %email, "email_secret_issued");
        Ok(IssuedSecret {
            secret: EmailSecret { email, secret_code },
            receipt,
        })
    }
}

fn secret_code_mail(email: &str, secret_code: &str) -> OutgoingMail {
    let html_body = format!(
        "<html><body>\
         <p>Hello,</p>\
         <p>Use the code below to confirm <strong>{email}</strong> and finish creating your account.</p>\
         <p style=\"font-size:24px;letter-spacing:4px\"><strong>{secret_code}</strong></p>\
         <p>If you did not ask for this code you can ignore this message.</p>\
         </body></html>"
    );
    OutgoingMail {
        to: email.to_string(),
        subject: SECRET_MAIL_SUBJECT.to_string(),
        html_body,
    }
}
