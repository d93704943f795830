//! Shared site content: singleton pages keyed by name, and blog posts.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cms::{BlogPost, BlogPostDocument};

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get_singleton(&self, key: &str) -> Result<Option<Value>, AppError>;

    /// Replaces the whole document stored under `key`.
    async fn put_singleton(&self, key: &str, value: Value) -> Result<(), AppError>;

    /// Newest created first.
    async fn list_posts(&self) -> Result<Vec<BlogPostDocument>, AppError>;

    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPostDocument>, AppError>;

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostDocument>, AppError>;

    /// `Conflict` when the slug is taken.
    async fn create_post(&self, post: &BlogPost) -> Result<BlogPostDocument, AppError>;

    /// Overwrites the post and refreshes its date. `NotFound` or `Conflict`.
    async fn update_post(&self, id: Uuid, post: &BlogPost) -> Result<BlogPostDocument, AppError>;

    async fn delete_post(&self, id: Uuid) -> Result<bool, AppError>;
}

fn slug_taken(slug: &str) -> AppError {
    AppError::Conflict(format!("A post with slug '{slug}' already exists"))
}

fn post_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Blog post {id} not found"))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn to_document(post: &BlogPost) -> Result<Value, AppError> {
    serde_json::to_value(post)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize blog post: {e}")))
}

fn from_document(id: Uuid, data: Value) -> Result<BlogPost, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored blog post {id} is malformed: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    data: Value,
    date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for BlogPostDocument {
    type Error = AppError;

    fn try_from(row: PostRow) -> Result<Self, AppError> {
        Ok(BlogPostDocument {
            post: from_document(row.id, row.data)?,
            id: row.id,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn get_singleton(&self, key: &str) -> Result<Option<Value>, AppError> {
        let data: Option<Value> = sqlx::query_scalar("SELECT data FROM cms_content WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(data)
    }

    async fn put_singleton(&self, key: &str, value: Value) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO cms_content (key, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!("Stored content document '{key}'");
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<BlogPostDocument>, AppError> {
        sqlx::query_as::<_, PostRow>(
            "SELECT id, data, date, created_at, updated_at FROM blog_posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(BlogPostDocument::try_from)
        .collect()
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPostDocument>, AppError> {
        sqlx::query_as::<_, PostRow>(
            "SELECT id, data, date, created_at, updated_at FROM blog_posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BlogPostDocument::try_from)
        .transpose()
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostDocument>, AppError> {
        sqlx::query_as::<_, PostRow>(
            "SELECT id, data, date, created_at, updated_at FROM blog_posts WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .map(BlogPostDocument::try_from)
        .transpose()
    }

    async fn create_post(&self, post: &BlogPost) -> Result<BlogPostDocument, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO blog_posts (id, slug, data, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (slug) DO NOTHING
            RETURNING id, data, date, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.slug)
        .bind(to_document(post)?)
        .bind(today())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| slug_taken(&post.slug))?;

        debug!("Inserted blog post {} ({})", row.id, post.slug);
        BlogPostDocument::try_from(row)
    }

    async fn update_post(&self, id: Uuid, post: &BlogPost) -> Result<BlogPostDocument, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE blog_posts
            SET slug = $1, data = $2, date = $3, updated_at = $4
            WHERE id = $5
            RETURNING id, data, date, created_at, updated_at
            "#,
        )
        .bind(&post.slug)
        .bind(to_document(post)?)
        .bind(today())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                slug_taken(&post.slug)
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| post_not_found(id))?;

        BlogPostDocument::try_from(row)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
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
struct MemoryContent {
    singletons: HashMap<String, Value>,
    posts: HashMap<Uuid, (BlogPostDocument, u64)>,
    revision: u64,
}

impl MemoryContent {
    fn slug_in_use(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.posts
            .values()
            .any(|(doc, _)| doc.post.slug == slug && Some(doc.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryContentStore {
    inner: RwLock<MemoryContent>,
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn get_singleton(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.inner.read().await.singletons.get(key).cloned())
    }

    async fn put_singleton(&self, key: &str, value: Value) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .singletons
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<BlogPostDocument>, AppError> {
        let inner = self.inner.read().await;
        let mut posts: Vec<_> = inner.posts.values().collect();
        // Creation revision breaks ties between equal timestamps.
        posts.sort_by(|(a, ra), (b, rb)| (b.created_at, rb).cmp(&(a.created_at, ra)));
        Ok(posts.into_iter().map(|(doc, _)| doc.clone()).collect())
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPostDocument>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .posts
            .get(&id)
            .map(|(doc, _)| doc.clone()))
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostDocument>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .posts
            .values()
            .find(|(doc, _)| doc.post.slug == slug)
            .map(|(doc, _)| doc.clone()))
    }

    async fn create_post(&self, post: &BlogPost) -> Result<BlogPostDocument, AppError> {
        let mut inner = self.inner.write().await;
        if inner.slug_in_use(&post.slug, None) {
            return Err(slug_taken(&post.slug));
        }

        let now = Utc::now();
        let doc = BlogPostDocument {
            id: Uuid::new_v4(),
            post: post.clone(),
            date: today(),
            created_at: now,
            updated_at: now,
        };
        inner.revision += 1;
        let revision = inner.revision;
        inner.posts.insert(doc.id, (doc.clone(), revision));
        Ok(doc)
    }

    async fn update_post(&self, id: Uuid, post: &BlogPost) -> Result<BlogPostDocument, AppError> {
        let mut inner = self.inner.write().await;
        if !inner.posts.contains_key(&id) {
            return Err(post_not_found(id));
        }
        if inner.slug_in_use(&post.slug, Some(id)) {
            return Err(slug_taken(&post.slug));
        }

        let (doc, _) = inner.posts.get_mut(&id).ok_or_else(|| post_not_found(id))?;
        doc.post = post.clone();
        doc.date = today();
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(slug: &str) -> BlogPost {
        BlogPost {
            title: format!("Post {slug}"),
            slug: slug.to_string(),
            content: "Body".into(),
            ..BlogPost::default()
        }
    }

    #[tokio::test]
    async fn test_singleton_put_replaces() {
        let store = MemoryContentStore::default();
        assert!(store.get_singleton("footer").await.unwrap().is_none());

        store
            .put_singleton("footer", json!({"text": "one"}))
            .await
            .unwrap();
        store
            .put_singleton("footer", json!({"text": "two"}))
            .await
            .unwrap();

        assert_eq!(
            store.get_singleton("footer").await.unwrap(),
            Some(json!({"text": "two"}))
        );
    }

    #[tokio::test]
    async fn test_create_post_sets_date_and_lookup_by_slug() {
        let store = MemoryContentStore::default();
        let doc = store.create_post(&post("cv-tips")).await.unwrap();

        assert_eq!(doc.date, today());
        let by_slug = store.get_post_by_slug("cv-tips").await.unwrap().unwrap();
        assert_eq!(by_slug.id, doc.id);
        assert!(store.get_post_by_slug("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let store = MemoryContentStore::default();
        store.create_post(&post("cv-tips")).await.unwrap();
        let err = store.create_post(&post("cv-tips")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_own_slug_but_rejects_others() {
        let store = MemoryContentStore::default();
        let a = store.create_post(&post("first")).await.unwrap();
        store.create_post(&post("second")).await.unwrap();

        let mut edited = post("first");
        edited.title = "Renamed".into();
        let updated = store.update_post(a.id, &edited).await.unwrap();
        assert_eq!(updated.post.title, "Renamed");
        assert!(updated.updated_at >= a.updated_at);

        let err = store.update_post(a.id, &post("second")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let store = MemoryContentStore::default();
        let err = store
            .update_post(Uuid::new_v4(), &post("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_created_first() {
        let store = MemoryContentStore::default();
        store.create_post(&post("older")).await.unwrap();
        store.create_post(&post("newer")).await.unwrap();

        let slugs: Vec<_> = store
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.post.slug)
            .collect();
        assert_eq!(slugs, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let store = MemoryContentStore::default();
        let doc = store.create_post(&post("gone")).await.unwrap();
        assert!(store.delete_post(doc.id).await.unwrap());
        assert!(!store.delete_post(doc.id).await.unwrap());
        assert!(store.get_post(doc.id).await.unwrap().is_none());
    }
}
