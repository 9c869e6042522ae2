use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::use_cases::users::login::{Login, LoginRequest};
use crate::application::use_cases::users::profile::Profile;
use crate::application::use_cases::users::request_secret::RequestSecret;
use crate::application::use_cases::users::signup::{Signup, SignupRequest};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{self, AuthUser, Claims};
use crate::presentation::http::error::{ApiError, ErrorBody, FieldError};
use crate::presentation::http::extract::{ValidatedForm, ValidatedJson};
use crate::presentation::http::response::{
    ClaimsEnvelope, EmailSecretEnvelope, Envelope, TextEnvelope,
};

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().any(char::is_uppercase) {
        return Err(ValidationError::new("lowercase"));
    }
    if !username.chars().all(char::is_alphanumeric) {
        return Err(ValidationError::new("alphanumunicode"));
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RequestSecretForm {
    #[validate(length(min = 1, message = "required"), email(message = "email"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmailSecretResponse {
    pub email: String,
    pub secret_code: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SignupForm {
    #[validate(
        length(min = 1, message = "required"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "required"), email(message = "email"))]
    pub email: String,
    pub full_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "required"),
        must_match(other = "password", message = "eqfield")
    )]
    pub password_repeat: String,
    /// Required but not verified.
    #[validate(length(min = 1, message = "required"))]
    pub captcha: String,
    #[validate(length(equal = 6, message = "len"))]
    pub email_secret_code: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "required"), email(message = "email"))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
    /// Required but not verified.
    #[validate(length(min = 1, message = "required"))]
    pub captcha: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/user/email-validation-secret", post(request_secret))
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
        .route("/auth/user", get(profile))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/user/email-validation-secret", tag = "Users",
    request_body(content = RequestSecretForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = EmailSecretEnvelope),
        (status = 400, body = [FieldError]),
        (status = 422, body = FieldError)
    ))]
pub async fn request_secret(
    State(ctx): State<AppContext>,
    ValidatedForm(form): ValidatedForm<RequestSecretForm>,
) -> Result<Json<Envelope<EmailSecretResponse>>, ApiError> {
    let users = ctx.user_repo();
    let secrets = ctx.email_secret_repo();
    let uc = RequestSecret {
        users: users.as_ref(),
        secrets: secrets.as_ref(),
        mail: ctx.mail(),
    };
    // Delivery is reported by the mail worker; the response does not wait for it.
    let issued = uc.execute(&form.email).await?;
    Ok(Json(Envelope::success(EmailSecretResponse {
        email: issued.secret.email,
        secret_code: issued.secret.secret_code,
    })))
}

#[utoipa::path(post, path = "/v1/user/signup", tag = "Users", request_body = SignupForm,
    responses(
        (status = 200, body = TextEnvelope),
        (status = 400, body = [FieldError]),
        (status = 422, body = FieldError)
    ))]
pub async fn signup(
    State(ctx): State<AppContext>,
    ValidatedJson(form): ValidatedJson<SignupForm>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let users = ctx.user_repo();
    let secrets = ctx.email_secret_repo();
    let uc = Signup {
        users: users.as_ref(),
        secrets: secrets.as_ref(),
        passwords: ctx.passwords(),
    };
    let req = SignupRequest {
        username: form.username,
        email: form.email,
        full_name: form.full_name,
        password: form.password,
        email_secret_code: form.email_secret_code,
    };
    uc.execute(&req).await?;
    Ok(Json(Envelope::with_message(
        "Registration Success, continue to login".to_string(),
        "Registration Success",
    )))
}

#[utoipa::path(post, path = "/v1/user/login", tag = "Users",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = TextEnvelope),
        (status = 400, body = [FieldError]),
        (status = 422, body = FieldError)
    ))]
pub async fn login(
    State(ctx): State<AppContext>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let users = ctx.user_repo();
    let uc = Login {
        users: users.as_ref(),
        passwords: ctx.passwords(),
    };
    let req = LoginRequest {
        email: form.email,
        password: form.password,
    };
    let user = uc.execute(&req).await?;
    let token = auth::issue_token(&ctx.cfg.jwt, &user)?;
    Ok(Json(Envelope::with_message(
        token,
        "Login Success, JWT Token provided",
    )))
}

#[utoipa::path(get, path = "/v1/auth/user", tag = "Users",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, body = ClaimsEnvelope),
        (status = 401, body = ErrorBody)
    ))]
pub async fn profile(AuthUser(claims): AuthUser) -> Result<Json<Envelope<Claims>>, ApiError> {
    Profile.execute().await?;
    Ok(Json(Envelope::success(claims)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_form() -> SignupForm {
        SignupForm {
            username: "joreader".into(),
            email: "jo@example.com".into(),
            full_name: "Jo Reader".into(),
            password: "hunter22".into(),
            password_repeat: "hunter22".into(),
            captcha: "xyz".into(),
            email_secret_code: "123456".into(),
        }
    }

    #[test]
    fn complete_signup_form_passes() {
        assert!(signup_form().validate().is_ok());
    }

    #[test]
    fn username_must_be_lowercase_alphanumeric() {
        assert_eq!(
            validate_username("JoReader").unwrap_err().code,
            "lowercase"
        );
        assert_eq!(
            validate_username("jo_reader").unwrap_err().code,
            "alphanumunicode"
        );
        assert!(validate_username("jöreader2").is_ok());
    }

    #[test]
    fn mismatched_repeat_and_short_code_are_reported() {
        let mut form = signup_form();
        form.password_repeat = "hunter23".into();
        form.email_secret_code = "123".into();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password_repeat"));
        assert!(fields.contains_key("email_secret_code"));
        assert!(!fields.contains_key("password"));
    }

    #[test]
    fn login_form_requires_captcha() {
        let form = LoginForm {
            email: "jo@example.com".into(),
            password: "hunter22".into(),
            captcha: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("captcha"));
    }
}
