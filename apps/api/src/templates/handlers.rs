//! Axum route handlers for admin management of AI reference templates.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::models::template::{AiResumeTemplate, AiResumeTemplateDocument, AiResumeTemplateSummary};
use crate::state::AppState;
use crate::templates::validation::validate_template;

fn template_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("AI template {id} not found"))
}

/// GET /api/v1/admin/ai-templates
///
/// Listing rows omit the PDF payload.
pub async fn handle_list_templates(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<AiResumeTemplateSummary>>, AppError> {
    let docs = state.templates.list().await?;
    Ok(Json(docs.iter().map(AiResumeTemplateSummary::from).collect()))
}

/// POST /api/v1/admin/ai-templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(template): Json<AiResumeTemplate>,
) -> Result<(StatusCode, Json<AiResumeTemplateDocument>), AppError> {
    validate_template(&template)?;
    let doc = state.templates.create(&template).await?;
    info!(
        "Created AI template {} ({}, pdf: {})",
        doc.id,
        doc.template.resume_type.as_str(),
        doc.has_pdf()
    );
    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /api/v1/admin/ai-templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<AiResumeTemplateDocument>, AppError> {
    state
        .templates
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| template_not_found(id))
}

/// PUT /api/v1/admin/ai-templates/:id
pub async fn handle_update_template(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<Uuid>,
    Json(template): Json<AiResumeTemplate>,
) -> Result<Json<AiResumeTemplateDocument>, AppError> {
    validate_template(&template)?;
    let doc = state.templates.update(id, &template).await?;
    info!("Updated AI template {id}");
    Ok(Json(doc))
}

/// DELETE /api/v1/admin/ai-templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.templates.delete(id).await? {
        return Err(template_not_found(id));
    }
    info!("Deleted AI template {id}");
    Ok(StatusCode::NO_CONTENT)
}
