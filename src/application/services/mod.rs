pub mod mail_dispatch;
pub mod passwords;
pub mod secrets;
