//! AI reference templates and the selection rule used at generation time.

pub mod handlers;
pub mod store;
pub mod validation;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{AiResumeTemplateDocument, ResumeType};
use store::TemplateStore;

/// Template picked to steer a generation request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceTemplate {
    pub id: Uuid,
    pub name: String,
    pub pdf_file_name: String,
    /// Base64 PDF body, without the data URI prefix.
    #[serde(skip)]
    pub pdf_base64: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Found(ReferenceTemplate),
    /// Templates of this type exist but none carries a usable PDF.
    WithoutPdf,
    NoMatch,
}

impl Selection {
    /// Informational message for the caller when generation runs without a reference.
    pub fn notice(&self, resume_type: ResumeType) -> Option<String> {
        match self {
            Selection::Found(_) => None,
            Selection::WithoutPdf => Some(format!(
                "A template for '{}' was found, but it has no PDF attached. Continuing without a reference PDF.",
                resume_type.label()
            )),
            Selection::NoMatch => Some(format!(
                "No template matches the '{}' type. Continuing without a reference PDF.",
                resume_type.label()
            )),
        }
    }
}

fn reference_of(doc: &AiResumeTemplateDocument) -> Option<ReferenceTemplate> {
    let payload = validation::pdf_payload(&doc.template.pdf_data).ok()?;
    Some(ReferenceTemplate {
        id: doc.id,
        name: doc.template.name.clone(),
        pdf_file_name: doc.template.pdf_file_name.clone(),
        pdf_base64: payload.to_string(),
    })
}

/// First stored template of the requested type that carries a readable PDF.
pub async fn find_reference(
    store: &dyn TemplateStore,
    resume_type: ResumeType,
) -> Result<Selection, AppError> {
    let candidates = store.list_by_type(resume_type).await?;
    if candidates.is_empty() {
        return Ok(Selection::NoMatch);
    }
    Ok(candidates
        .iter()
        .filter(|doc| doc.has_pdf())
        .find_map(reference_of)
        .map_or(Selection::WithoutPdf, Selection::Found))
}
