//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::AppError;
use crate::generation::generator::{generate_resume, GenerateRequest, GenerateResponse};
use crate::resume::wizard::LISTING_PATH;
use crate::state::AppState;

/// POST /api/v1/resumes/:id/generate
///
/// Generates styled resume text for a stored resume. The text is returned to the
/// caller and never persisted.
pub async fn handle_generate(
    State(state): State<AppState>,
    session: Session,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let doc = state
        .resumes
        .get(&session, resume_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found_redirect(format!("Resume {resume_id} not found"), LISTING_PATH)
        })?;

    let response = generate_resume(
        state.llm.as_ref(),
        state.templates.as_ref(),
        &doc,
        request.resume_type,
    )
    .await?;

    Ok(Json(response))
}
