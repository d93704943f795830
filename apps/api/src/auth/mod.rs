//! Sessions, tokens and password hashing.
//!
//! The signed-in user travels as an explicit [`Session`] value: handlers extract it
//! from the bearer token and pass it to every store call that needs an owner.

pub mod handlers;
pub mod store;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

impl Session {
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    pub fn is_admin(&self, admin_email: &str) -> bool {
        self.email.eq_ignore_ascii_case(admin_email)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization token is required".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = verify_token(token, &state.config.jwt_secret)?;
        Ok(Session {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// A session whose email matches the configured admin account.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = Session::from_request_parts(parts, state).await?;
        if !session.is_admin(&state.config.admin_email) {
            tracing::warn!("Non-admin {} attempted an admin operation", session.email);
            return Err(AppError::Forbidden);
        }
        Ok(AdminSession)
    }
}

/// Creates the configured admin account, or resets its password to the configured
/// one when the email is already registered.
pub async fn provision_admin(state: &AppState) -> Result<Uuid, AppError> {
    if state.config.admin_password.chars().count() < handlers::MIN_PASSWORD_LEN {
        return Err(AppError::Internal(anyhow::anyhow!(
            "ADMIN_PASSWORD must be at least {} characters",
            handlers::MIN_PASSWORD_LEN
        )));
    }
    let password_hash = hash_password(&state.config.admin_password)?;
    let admin = state
        .users
        .upsert(&state.config.admin_email, &password_hash)
        .await?;
    tracing::info!("Admin account {} ready ({})", admin.email, admin.id);
    Ok(admin.id)
}

pub fn issue_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Authorization token has expired".to_string())
        }
        _ => AppError::Unauthorized("Invalid authorization token".to_string()),
    })
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
