pub mod login;
pub mod profile;
pub mod request_secret;
pub mod signup;
