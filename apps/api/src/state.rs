use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::store::{MemoryUserStore, PgUserStore, UserStore};
use crate::cms::store::{ContentStore, MemoryContentStore, PgContentStore};
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::resume::store::{MemoryResumeStore, PgResumeStore, ResumeStore};
use crate::templates::store::{MemoryTemplateStore, PgTemplateStore, TemplateStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generation backend. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub users: Arc<dyn UserStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub content: Arc<dyn ContentStore>,
    pub templates: Arc<dyn TemplateStore>,
}

impl AppState {
    pub fn with_postgres(config: Config, llm: Arc<dyn TextGenerator>, pool: PgPool) -> Self {
        Self {
            config,
            llm,
            users: Arc::new(PgUserStore::new(pool.clone())),
            resumes: Arc::new(PgResumeStore::new(pool.clone())),
            content: Arc::new(PgContentStore::new(pool.clone())),
            templates: Arc::new(PgTemplateStore::new(pool)),
        }
    }

    /// Everything lives in process memory and is lost on restart.
    pub fn in_memory(config: Config, llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            config,
            llm,
            users: Arc::new(MemoryUserStore::default()),
            resumes: Arc::new(MemoryResumeStore::default()),
            content: Arc::new(MemoryContentStore::default()),
            templates: Arc::new(MemoryTemplateStore::default()),
        }
    }
}
