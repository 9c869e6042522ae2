use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::JwtConfig;
use crate::domain::users::user::User;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub exp: usize,
}

pub fn issue_token(cfg: &JwtConfig, user: &User) -> anyhow::Result<String> {
    let exp = chrono::Utc::now() + chrono::Duration::minutes(cfg.expire_minutes);
    let claims = Claims {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        exp: exp.timestamp() as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(cfg: &JwtConfig, token: &str) -> anyhow::Result<Claims> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Claims of a caller that presented a valid `Authorization: Bearer` token.
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
        let claims = decode_token(&ctx.cfg.jwt, token).map_err(|e| {
            tracing::debug!(error = %e, "bearer_rejected");
            ApiError::Unauthorized("invalid or expired token".into())
        })?;
        Ok(AuthUser(claims))
    }
}
