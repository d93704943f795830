//! AI reference templates, shared across all users and edited by the admin.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{AiResumeTemplate, AiResumeTemplateDocument, ResumeType};

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Oldest first, the order reference selection walks.
    async fn list(&self) -> Result<Vec<AiResumeTemplateDocument>, AppError>;

    async fn list_by_type(
        &self,
        resume_type: ResumeType,
    ) -> Result<Vec<AiResumeTemplateDocument>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<AiResumeTemplateDocument>, AppError>;

    async fn create(
        &self,
        template: &AiResumeTemplate,
    ) -> Result<AiResumeTemplateDocument, AppError>;

    /// `NotFound` when the template does not exist.
    async fn update(
        &self,
        id: Uuid,
        template: &AiResumeTemplate,
    ) -> Result<AiResumeTemplateDocument, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

fn template_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("AI template {id} not found"))
}

fn to_document(template: &AiResumeTemplate) -> Result<Value, AppError> {
    serde_json::to_value(template)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize template: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct TemplateRow {
    id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TemplateRow> for AiResumeTemplateDocument {
    type Error = AppError;

    fn try_from(row: TemplateRow) -> Result<Self, AppError> {
        let template = serde_json::from_value(row.data).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Stored template {} is malformed: {e}", row.id))
        })?;
        Ok(AiResumeTemplateDocument {
            id: row.id,
            template,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn list(&self) -> Result<Vec<AiResumeTemplateDocument>, AppError> {
        sqlx::query_as::<_, TemplateRow>(
            "SELECT id, data, created_at, updated_at FROM ai_resume_templates ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(AiResumeTemplateDocument::try_from)
        .collect()
    }

    async fn list_by_type(
        &self,
        resume_type: ResumeType,
    ) -> Result<Vec<AiResumeTemplateDocument>, AppError> {
        sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM ai_resume_templates
            WHERE resume_type = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(resume_type.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(AiResumeTemplateDocument::try_from)
        .collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<AiResumeTemplateDocument>, AppError> {
        sqlx::query_as::<_, TemplateRow>(
            "SELECT id, data, created_at, updated_at FROM ai_resume_templates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(AiResumeTemplateDocument::try_from)
        .transpose()
    }

    async fn create(
        &self,
        template: &AiResumeTemplate,
    ) -> Result<AiResumeTemplateDocument, AppError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO ai_resume_templates (id, resume_type, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(template.resume_type.as_str())
        .bind(to_document(template)?)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted AI template {}", row.id);
        AiResumeTemplateDocument::try_from(row)
    }

    async fn update(
        &self,
        id: Uuid,
        template: &AiResumeTemplate,
    ) -> Result<AiResumeTemplateDocument, AppError> {
        sqlx::query_as::<_, TemplateRow>(
            r#"
            UPDATE ai_resume_templates
            SET resume_type = $1, data = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(template.resume_type.as_str())
        .bind(to_document(template)?)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| template_not_found(id))
        .and_then(AiResumeTemplateDocument::try_from)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM ai_resume_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryTemplates {
    docs: HashMap<Uuid, (AiResumeTemplateDocument, u64)>,
    revision: u64,
}

impl MemoryTemplates {
    fn ordered(&self) -> Vec<AiResumeTemplateDocument> {
        let mut docs: Vec<_> = self.docs.values().collect();
        docs.sort_by(|(a, ra), (b, rb)| (a.created_at, ra).cmp(&(b.created_at, rb)));
        docs.into_iter().map(|(doc, _)| doc.clone()).collect()
    }
}

#[derive(Default)]
pub struct MemoryTemplateStore {
    inner: RwLock<MemoryTemplates>,
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn list(&self) -> Result<Vec<AiResumeTemplateDocument>, AppError> {
        Ok(self.inner.read().await.ordered())
    }

    async fn list_by_type(
        &self,
        resume_type: ResumeType,
    ) -> Result<Vec<AiResumeTemplateDocument>, AppError> {
        let mut docs = self.inner.read().await.ordered();
        docs.retain(|doc| doc.template.resume_type == resume_type);
        Ok(docs)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AiResumeTemplateDocument>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .docs
            .get(&id)
            .map(|(doc, _)| doc.clone()))
    }

    async fn create(
        &self,
        template: &AiResumeTemplate,
    ) -> Result<AiResumeTemplateDocument, AppError> {
        let now = Utc::now();
        let doc = AiResumeTemplateDocument {
            id: Uuid::new_v4(),
            template: template.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.inner.write().await;
        inner.revision += 1;
        let revision = inner.revision;
        inner.docs.insert(doc.id, (doc.clone(), revision));
        Ok(doc)
    }

    async fn update(
        &self,
        id: Uuid,
        template: &AiResumeTemplate,
    ) -> Result<AiResumeTemplateDocument, AppError> {
        let mut inner = self.inner.write().await;
        let (doc, _) = inner
            .docs
            .get_mut(&id)
            .ok_or_else(|| template_not_found(id))?;
        doc.template = template.clone();
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.docs.remove(&id).is_some())
    }
}
