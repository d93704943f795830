//! Axum route handlers for public content reads and admin content edits.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::cms::{self, validation};
use crate::errors::AppError;
use crate::models::cms::{AboutUs, BlogPost, BlogPostDocument, CmsDocument, Footer, HelpContent, Logo};
use crate::state::AppState;
use crate::validation::ValidationErrors;

// ────────────────────────────────────────────────────────────────────────────
// Public reads
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/content/logo
pub async fn handle_get_logo(State(state): State<AppState>) -> Result<Json<Logo>, AppError> {
    Ok(Json(cms::load(state.content.as_ref()).await?))
}

/// GET /api/v1/content/about
pub async fn handle_get_about(State(state): State<AppState>) -> Result<Json<AboutUs>, AppError> {
    Ok(Json(cms::load(state.content.as_ref()).await?))
}

/// GET /api/v1/content/help
pub async fn handle_get_help(
    State(state): State<AppState>,
) -> Result<Json<HelpContent>, AppError> {
    Ok(Json(cms::load(state.content.as_ref()).await?))
}

/// GET /api/v1/content/footer
pub async fn handle_get_footer(State(state): State<AppState>) -> Result<Json<Footer>, AppError> {
    Ok(Json(cms::load(state.content.as_ref()).await?))
}

/// GET /api/v1/blog
pub async fn handle_list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostDocument>>, AppError> {
    Ok(Json(state.content.list_posts().await?))
}

/// GET /api/v1/blog/:slug
pub async fn handle_get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostDocument>, AppError> {
    state
        .content
        .get_post_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Blog post '{slug}' not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin singletons
// ────────────────────────────────────────────────────────────────────────────

async fn save_page<T: CmsDocument>(
    state: &AppState,
    doc: T,
    validate: fn(&T) -> Result<(), ValidationErrors>,
) -> Result<Json<T>, AppError> {
    validate(&doc)?;
    cms::save(state.content.as_ref(), &doc).await?;
    info!("Updated content '{}'", T::KEY);
    Ok(Json(doc))
}

/// GET /api/v1/admin/content/{logo,about,help,footer}
pub async fn handle_admin_get_page<T: CmsDocument>(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<T>, AppError> {
    Ok(Json(cms::load_for_edit(state.content.as_ref()).await?))
}

/// PUT /api/v1/admin/content/logo
pub async fn handle_put_logo(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(logo): Json<Logo>,
) -> Result<Json<Logo>, AppError> {
    save_page(&state, logo, validation::validate_logo).await
}

/// PUT /api/v1/admin/content/about
pub async fn handle_put_about(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(about): Json<AboutUs>,
) -> Result<Json<AboutUs>, AppError> {
    save_page(&state, about, validation::validate_about).await
}

/// PUT /api/v1/admin/content/help
pub async fn handle_put_help(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(help): Json<HelpContent>,
) -> Result<Json<HelpContent>, AppError> {
    save_page(&state, help, validation::validate_help).await
}

/// PUT /api/v1/admin/content/footer
pub async fn handle_put_footer(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(footer): Json<Footer>,
) -> Result<Json<Footer>, AppError> {
    save_page(&state, footer, validation::validate_footer).await
}

// ────────────────────────────────────────────────────────────────────────────
// Admin blog
// ────────────────────────────────────────────────────────────────────────────

fn post_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Blog post {id} not found"))
}

/// GET /api/v1/admin/blog
pub async fn handle_admin_list_posts(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<BlogPostDocument>>, AppError> {
    Ok(Json(state.content.list_posts().await?))
}

/// POST /api/v1/admin/blog
pub async fn handle_create_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(post): Json<BlogPost>,
) -> Result<(StatusCode, Json<BlogPostDocument>), AppError> {
    validation::validate_blog_post(&post)?;
    let doc = state.content.create_post(&post).await?;
    info!("Created blog post {} ({})", doc.id, doc.post.slug);
    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /api/v1/admin/blog/:id
pub async fn handle_get_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogPostDocument>, AppError> {
    state
        .content
        .get_post(id)
        .await?
        .map(Json)
        .ok_or_else(|| post_not_found(id))
}

/// PUT /api/v1/admin/blog/:id
pub async fn handle_update_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<Uuid>,
    Json(post): Json<BlogPost>,
) -> Result<Json<BlogPostDocument>, AppError> {
    validation::validate_blog_post(&post)?;
    let doc = state.content.update_post(id, &post).await?;
    info!("Updated blog post {id}");
    Ok(Json(doc))
}

/// DELETE /api/v1/admin/blog/:id
pub async fn handle_delete_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.content.delete_post(id).await? {
        return Err(post_not_found(id));
    }
    info!("Deleted blog post {id}");
    Ok(StatusCode::NO_CONTENT)
}
