//! Per-user resume documents.
//!
//! Each resume is a JSON document owned by exactly one user. Updates merge the
//! provided top-level sections over the stored document; there is no locking and
//! no version check, so the last writer wins.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDocument, ResumePatch};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Writes a new document and returns its generated id.
    async fn create(&self, session: &Session, resume: &Resume) -> Result<Uuid, AppError>;

    /// Merges `patch` into an existing document; `NotFound` if it does not exist.
    async fn update(&self, session: &Session, id: Uuid, patch: &ResumePatch)
        -> Result<(), AppError>;

    async fn get(&self, session: &Session, id: Uuid) -> Result<Option<ResumeDocument>, AppError>;

    /// Most recently updated first.
    async fn list(&self, session: &Session) -> Result<Vec<ResumeDocument>, AppError>;

    /// Returns false when no such document exists.
    async fn delete(&self, session: &Session, id: Uuid) -> Result<bool, AppError>;
}

fn to_document(value: &impl serde::Serialize) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))
}

fn from_document(
    id: Uuid,
    user_id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<ResumeDocument, AppError> {
    let resume: Resume = serde_json::from_value(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored resume {id} is malformed: {e}")))?;
    Ok(ResumeDocument {
        id,
        user_id,
        resume,
        created_at,
        updated_at,
    })
}

/// Overwrites the top-level keys of `target` with those present in `patch`.
pub fn merge_top_level(target: &mut Value, patch: Value) {
    match (target.as_object_mut(), patch) {
        (Some(obj), Value::Object(fields)) => {
            for (k, v) in fields {
                obj.insert(k, v);
            }
        }
        (_, patch) => *target = patch,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct ResumeRow {
    id: Uuid,
    user_id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ResumeRow> for ResumeDocument {
    type Error = AppError;

    fn try_from(row: ResumeRow) -> Result<Self, AppError> {
        from_document(row.id, row.user_id, row.data, row.created_at, row.updated_at)
    }
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, session: &Session, resume: &Resume) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO resumes (id, user_id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            "#,
        )
        .bind(id)
        .bind(session.user_id)
        .bind(to_document(resume)?)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!("Inserted resume {id} for user {}", session.user_id);
        Ok(id)
    }

    async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: &ResumePatch,
    ) -> Result<(), AppError> {
        // jsonb `||` replaces top-level keys, which is exactly the merge rule.
        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET data = data || $1, updated_at = $2
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(to_document(patch)?)
        .bind(Utc::now())
        .bind(id)
        .bind(session.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Resume {id} not found")));
        }
        Ok(())
    }

    async fn get(&self, session: &Session, id: Uuid) -> Result<Option<ResumeDocument>, AppError> {
        sqlx::query_as::<_, ResumeRow>(
            "SELECT id, user_id, data, created_at, updated_at FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(session.user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(ResumeDocument::try_from)
        .transpose()
    }

    async fn list(&self, session: &Session) -> Result<Vec<ResumeDocument>, AppError> {
        sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT id, user_id, data, created_at, updated_at
            FROM resumes
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(session.user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ResumeDocument::try_from)
        .collect()
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(session.user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

struct StoredResume {
    user_id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Write counter; breaks ties between equal timestamps.
    revision: u64,
}

#[derive(Default)]
struct MemoryResumes {
    docs: HashMap<Uuid, StoredResume>,
    revision: u64,
}

#[derive(Default)]
pub struct MemoryResumeStore {
    inner: RwLock<MemoryResumes>,
}

impl StoredResume {
    fn document(&self, id: Uuid) -> Result<ResumeDocument, AppError> {
        from_document(
            id,
            self.user_id,
            self.data.clone(),
            self.created_at,
            self.updated_at,
        )
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn create(&self, session: &Session, resume: &Resume) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let data = to_document(resume)?;

        let mut inner = self.inner.write().await;
        inner.revision += 1;
        let revision = inner.revision;
        inner.docs.insert(
            id,
            StoredResume {
                user_id: session.user_id,
                data,
                created_at: now,
                updated_at: now,
                revision,
            },
        );
        Ok(id)
    }

    async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: &ResumePatch,
    ) -> Result<(), AppError> {
        let patch = to_document(patch)?;

        let mut inner = self.inner.write().await;
        inner.revision += 1;
        let revision = inner.revision;
        let stored = inner
            .docs
            .get_mut(&id)
            .filter(|doc| doc.user_id == session.user_id)
            .ok_or_else(|| AppError::not_found(format!("Resume {id} not found")))?;

        merge_top_level(&mut stored.data, patch);
        stored.updated_at = Utc::now();
        stored.revision = revision;
        Ok(())
    }

    async fn get(&self, session: &Session, id: Uuid) -> Result<Option<ResumeDocument>, AppError> {
        let inner = self.inner.read().await;
        inner
            .docs
            .get(&id)
            .filter(|doc| doc.user_id == session.user_id)
            .map(|doc| doc.document(id))
            .transpose()
    }

    async fn list(&self, session: &Session) -> Result<Vec<ResumeDocument>, AppError> {
        let inner = self.inner.read().await;
        let mut owned: Vec<_> = inner
            .docs
            .iter()
            .filter(|(_, doc)| doc.user_id == session.user_id)
            .collect();
        owned.sort_by(|(_, a), (_, b)| {
            (b.updated_at, b.revision).cmp(&(a.updated_at, a.revision))
        });
        owned.into_iter().map(|(id, doc)| doc.document(*id)).collect()
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .docs
            .get(&id)
            .is_some_and(|doc| doc.user_id == session.user_id);
        if owned {
            inner.docs.remove(&id);
        }
        Ok(owned)
    }
}
