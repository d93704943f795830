//! Admin-managed site content: logo, About, Help/FAQ, footer and the blog.

pub mod handlers;
pub mod store;
pub mod validation;

use tracing::info;

use crate::errors::AppError;
use crate::models::cms::CmsDocument;
use store::ContentStore;

async fn stored<T: CmsDocument>(store: &dyn ContentStore) -> Result<Option<T>, AppError> {
    store
        .get_singleton(T::KEY)
        .await?
        .map(|data| {
            serde_json::from_value(data).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Stored content '{}' is malformed: {e}", T::KEY))
            })
        })
        .transpose()
}

/// Public read: the stored page, or its fallback when nothing is stored.
pub async fn load<T: CmsDocument>(store: &dyn ContentStore) -> Result<T, AppError> {
    Ok(stored(store).await?.unwrap_or_else(T::fallback))
}

/// Admin read: pages with initial content have it written the first time.
pub async fn load_for_edit<T: CmsDocument>(store: &dyn ContentStore) -> Result<T, AppError> {
    if let Some(doc) = stored(store).await? {
        return Ok(doc);
    }

    match T::initial() {
        Some(initial) => {
            save(store, &initial).await?;
            info!("Seeded default content for '{}'", T::KEY);
            Ok(initial)
        }
        None => Ok(T::default()),
    }
}

pub async fn save<T: CmsDocument>(store: &dyn ContentStore, doc: &T) -> Result<(), AppError> {
    let data = serde_json::to_value(doc).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize content '{}': {e}", T::KEY))
    })?;
    store.put_singleton(T::KEY, data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cms::{AboutUs, Footer, HelpContent, Logo};
    use store::MemoryContentStore;
    use validation::validate_help;

    #[tokio::test]
    async fn test_public_read_does_not_write() {
        let store = MemoryContentStore::default();
        let help: HelpContent = load(&store).await.unwrap();
        assert_eq!(help, HelpContent::fallback());
        assert!(validate_help(&help).is_ok());
        assert!(store.get_singleton(HelpContent::KEY).await.unwrap().is_none());
        assert!(store.get_singleton(AboutUs::KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_admin_read_seeds_initial_content() {
        let store = MemoryContentStore::default();
        let about: AboutUs = load_for_edit(&store).await.unwrap();
        assert_eq!(Some(about.clone()), AboutUs::initial());
        assert!(store.get_singleton(AboutUs::KEY).await.unwrap().is_some());

        let help: HelpContent = load_for_edit(&store).await.unwrap();
        assert_eq!(help.faq_title, "Frequently Asked Questions");
        assert!(validate_help(&help).is_ok());
    }

    #[tokio::test]
    async fn test_logo_and_footer_read_as_empty_without_writing() {
        let store = MemoryContentStore::default();
        let logo: Logo = load_for_edit(&store).await.unwrap();
        let footer: Footer = load(&store).await.unwrap();
        assert_eq!(logo, Logo::default());
        assert_eq!(footer, Footer::default());
        assert!(store.get_singleton(Logo::KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryContentStore::default();
        let footer = Footer {
            text: "© 2024 ResumeForge".into(),
        };
        save(&store, &footer).await.unwrap();
        assert_eq!(load::<Footer>(&store).await.unwrap(), footer);
    }
}
