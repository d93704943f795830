//! Axum route handlers for resumes and the resume wizard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDocument, ResumePatch, ResumeSummary};
use crate::resume::validation::{validate_resume, validate_sections};
use crate::resume::wizard::{self, step_count, Step, Submission, WizardState, LISTING_PATH, STEPS};
use crate::state::AppState;
use crate::validation::ValidationErrors;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    /// Limits validation to the sections of this wizard step.
    pub step: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: ValidationErrors,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub submission: Submission,
    /// The reset wizard the client should continue from.
    pub state: WizardState,
}

fn step_in_range(step: usize) -> Result<&'static Step, AppError> {
    if (1..=step_count()).contains(&step) {
        Ok(&STEPS[step - 1])
    } else {
        Err(AppError::BadRequest(format!(
            "step must be between 1 and {}",
            step_count()
        )))
    }
}

fn resume_not_found(id: Uuid) -> AppError {
    AppError::not_found_redirect(format!("Resume {id} not found"), LISTING_PATH)
}

// ────────────────────────────────────────────────────────────────────────────
// Resume CRUD
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let docs = state.resumes.list(&session).await?;
    Ok(Json(docs.iter().map(ResumeSummary::from).collect()))
}

/// POST /api/v1/resumes
///
/// Saves a complete resume. Conditional sections are normalized before writing.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    session: Session,
    Json(resume): Json<Resume>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    validate_resume(&resume)?;
    let id = state.resumes.create(&session, &resume.normalized()).await?;
    info!("Created resume {id} for user {}", session.user_id);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state
        .resumes
        .get(&session, id)
        .await?
        .ok_or_else(|| resume_not_found(id))?;
    Ok(Json(doc))
}

/// PUT /api/v1/resumes/:id
///
/// Full overwrite of every section with a validated resume.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(resume): Json<Resume>,
) -> Result<Json<ResumeDocument>, AppError> {
    validate_resume(&resume)?;
    state
        .resumes
        .update(&session, id, &ResumePatch::from(resume.normalized()))
        .await?;
    info!("Updated resume {id} for user {}", session.user_id);

    let doc = state
        .resumes
        .get(&session, id)
        .await?
        .ok_or_else(|| resume_not_found(id))?;
    Ok(Json(doc))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.resumes.delete(&session, id).await? {
        return Err(resume_not_found(id));
    }
    info!("Deleted resume {id} for user {}", session.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/validate[?step=N]
///
/// Dry-run validation; reports errors instead of failing the request.
pub async fn handle_validate_resume(
    _session: Session,
    Query(query): Query<ValidateQuery>,
    Json(resume): Json<Resume>,
) -> Result<Json<ValidationReport>, AppError> {
    let outcome = match query.step {
        Some(step) => validate_sections(&resume, step_in_range(step)?.sections),
        None => validate_resume(&resume),
    };
    let errors = outcome.err().unwrap_or_default();
    Ok(Json(ValidationReport {
        valid: errors.is_empty(),
        errors,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/wizard/steps
pub async fn handle_wizard_steps() -> Json<&'static [Step]> {
    Json(&STEPS[..])
}

/// GET /api/v1/wizard
pub async fn handle_wizard_start(_session: Session) -> Json<WizardState> {
    Json(WizardState::new())
}

/// GET /api/v1/wizard/edit/:id
pub async fn handle_wizard_edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardState>, AppError> {
    let wizard = wizard::load_for_edit(state.resumes.as_ref(), &session, id).await?;
    Ok(Json(wizard))
}

/// POST /api/v1/wizard/advance
pub async fn handle_wizard_advance(
    _session: Session,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<WizardState>, AppError> {
    step_in_range(wizard.current_step)?;
    wizard.advance().map_err(|fields| {
        AppError::invalid("The form is not valid. Please check your entries on this step.", fields)
    })?;
    Ok(Json(wizard))
}

/// POST /api/v1/wizard/retreat
pub async fn handle_wizard_retreat(
    _session: Session,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<WizardState>, AppError> {
    step_in_range(wizard.current_step)?;
    wizard.retreat();
    Ok(Json(wizard))
}

/// POST /api/v1/wizard/submit
pub async fn handle_wizard_submit(
    State(state): State<AppState>,
    session: Session,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<SubmitResponse>, AppError> {
    let submission = wizard.submit(state.resumes.as_ref(), &session).await?;
    Ok(Json(SubmitResponse {
        submission,
        state: wizard,
    }))
}
