use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, issue_token, verify_password, Session};
use crate::errors::AppError;
use crate::models::user::{User, UserProfile};
use crate::state::AppState;
use crate::validation::{check, Pattern, Rule};

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserProfile,
    pub access_token: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn profile(state: &AppState, user: &User) -> UserProfile {
    UserProfile {
        id: user.id,
        email: user.email.clone(),
        is_admin: user.email.eq_ignore_ascii_case(&state.config.admin_email),
    }
}

fn respond(state: &AppState, user: &User) -> Result<Json<AuthResponse>, AppError> {
    let access_token = issue_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;
    Ok(Json(AuthResponse {
        user: profile(state, user),
        access_token,
    }))
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = normalize_email(&req.email);
    let mut errors = check([
        Rule::Required {
            path: "email".into(),
            value: &email,
            message: "Email is required",
        },
        Rule::Matches {
            path: "email".into(),
            value: &email,
            pattern: Pattern::Email,
            message: "Invalid email format",
        },
    ]);
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(crate::validation::FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    errors.into_result()?;

    // The admin account is provisioned from configuration only.
    if email.eq_ignore_ascii_case(&state.config.admin_email) {
        warn!("Signup attempted with the admin email");
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user = state.users.create(&email, &password_hash).await?;
    info!("Created account {} ({})", user.id, user.email);

    let body = respond(&state, &user)?;
    Ok((StatusCode::CREATED, body))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email);
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .filter(|u| verify_password(&req.password, &u.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    respond(&state, &user)
}

/// GET /api/v1/auth/me
pub async fn handle_me(State(state): State<AppState>, session: Session) -> Json<UserProfile> {
    Json(UserProfile {
        id: session.user_id,
        is_admin: session.is_admin(&state.config.admin_email),
        email: session.email,
    })
}
