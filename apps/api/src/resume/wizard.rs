//! Step controller for the resume wizard.
//!
//! The wizard walks the user through [`STEPS`] in order. Each step owns one or more
//! resume sections; moving forward validates only those sections, moving back
//! never validates. Submitting validates everything, normalizes the conditional
//! sections and writes the document through the [`ResumeStore`].
//!
//! The HTTP layer is stateless, so the client sends the whole [`WizardState`] with
//! every call and receives the next one back.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::AppError;
use crate::models::resume::{EducationEntry, Resume, ResumeDocument, ResumePatch};
use crate::resume::store::ResumeStore;
use crate::resume::validation::{validate_resume, validate_sections, Section};
use crate::validation::ValidationErrors;

pub const LISTING_PATH: &str = "/my-resumes";

#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub id: usize,
    pub name: &'static str,
    pub sections: &'static [Section],
}

pub static STEPS: [Step; 9] = [
    Step {
        id: 1,
        name: "Target Position",
        sections: &[Section::TargetPosition],
    },
    Step {
        id: 2,
        name: "Biodata",
        sections: &[Section::Biodata],
    },
    Step {
        id: 3,
        name: "Short Profile",
        sections: &[Section::ShortProfile],
    },
    Step {
        id: 4,
        name: "Education",
        sections: &[Section::Education],
    },
    Step {
        id: 5,
        name: "Work Experience",
        sections: &[Section::Experience],
    },
    Step {
        id: 6,
        name: "Skills",
        sections: &[Section::Skills],
    },
    Step {
        id: 7,
        name: "Hobbies",
        sections: &[Section::Hobbies],
    },
    Step {
        id: 8,
        name: "References",
        sections: &[Section::References],
    },
    Step {
        id: 9,
        name: "Summary & Finish",
        sections: &[],
    },
];

pub fn step_count() -> usize {
    STEPS.len()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    /// 1-based index into [`STEPS`].
    pub current_step: usize,
    pub resume: Resume,
    /// Present when editing an existing document.
    #[serde(default)]
    pub edit_id: Option<Uuid>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub resume_id: Uuid,
    pub updated: bool,
    /// Follow-up page where the user picks a style and generates text.
    pub redirect_to: String,
}

impl WizardState {
    pub fn new() -> Self {
        WizardState {
            current_step: 1,
            resume: Resume::blank(),
            edit_id: None,
        }
    }

    /// Edit mode over a stored document. An empty education list gets one blank row.
    pub fn editing(doc: ResumeDocument) -> Self {
        let mut resume = doc.resume;
        if resume.education.is_empty() {
            resume.education.push(EducationEntry::default());
        }
        WizardState {
            current_step: 1,
            resume,
            edit_id: Some(doc.id),
        }
    }

    pub fn step(&self) -> &'static Step {
        let index = self.current_step.clamp(1, step_count()) - 1;
        &STEPS[index]
    }

    /// Validates the current step and moves forward when it passes.
    /// On failure the index is left unchanged. Never moves past the last step.
    pub fn advance(&mut self) -> Result<usize, ValidationErrors> {
        validate_sections(&self.resume, self.step().sections)?;
        if self.current_step < step_count() {
            self.current_step += 1;
        }
        Ok(self.current_step)
    }

    /// Moves back one step without validating. Stays at step 1.
    pub fn retreat(&mut self) -> usize {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
        self.current_step
    }

    /// Full validation followed by normalization; the state itself is not touched.
    pub fn prepare_submission(&self) -> Result<Resume, ValidationErrors> {
        validate_resume(&self.resume)?;
        Ok(self.resume.clone().normalized())
    }

    /// Validates, persists and, on success, resets to a fresh wizard.
    /// Any failure leaves the state exactly as it was.
    pub async fn submit(
        &mut self,
        store: &dyn ResumeStore,
        session: &Session,
    ) -> Result<Submission, AppError> {
        let resume = self.prepare_submission().map_err(|fields| {
            AppError::invalid("Please review the highlighted fields before saving", fields)
        })?;

        let (resume_id, updated) = match self.edit_id {
            Some(id) => {
                store.update(session, id, &ResumePatch::from(resume)).await?;
                info!("Updated resume {id} for user {}", session.user_id);
                (id, true)
            }
            None => {
                let id = store.create(session, &resume).await?;
                info!("Created resume {id} for user {}", session.user_id);
                (id, false)
            }
        };

        *self = WizardState::new();
        Ok(Submission {
            resume_id,
            updated,
            redirect_to: format!("/resume/generate?resumeId={resume_id}"),
        })
    }
}

/// Loads an existing document into edit mode. A missing document carries a
/// redirect back to the listing page.
pub async fn load_for_edit(
    store: &dyn ResumeStore,
    session: &Session,
    id: Uuid,
) -> Result<WizardState, AppError> {
    store
        .get(session, id)
        .await?
        .map(WizardState::editing)
        .ok_or_else(|| AppError::not_found_redirect(format!("Resume {id} not found"), LISTING_PATH))
}
