//! Resume Generation: turns a stored resume into styled free text.
//!
//! Flow: pick reference template → build system prompt with tone guidance →
//!       format user data → LLM generate → return text.
//!
//! Nothing is persisted; a failed call simply surfaces as an error.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{
    GENERATION_SYSTEM_TEMPLATE, NO_REFERENCE_NOTE, REFERENCE_INSTRUCTION,
};
use crate::generation::tone::tone_guidance;
use crate::llm_client::TextGenerator;
use crate::models::resume::{Gender, Resume, ResumeDocument};
use crate::models::template::ResumeType;
use crate::templates::store::TemplateStore;
use crate::templates::{find_reference, ReferenceTemplate, Selection};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub resume_type: ResumeType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub generated_resume_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_template: Option<ReferenceTemplate>,
    /// Set when generation ran without a reference PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

pub async fn generate_resume(
    llm: &dyn TextGenerator,
    templates: &dyn TemplateStore,
    doc: &ResumeDocument,
    resume_type: ResumeType,
) -> Result<GenerateResponse, AppError> {
    let selection = find_reference(templates, resume_type).await?;
    let notice = selection.notice(resume_type);
    let reference = match selection {
        Selection::Found(reference) => Some(reference),
        Selection::WithoutPdf | Selection::NoMatch => None,
    };

    let system = build_system_prompt(resume_type);
    let prompt = build_user_prompt(&doc.resume, reference.is_some());

    info!(
        "Generating {} resume for {} (reference: {})",
        resume_type.as_str(),
        doc.id,
        reference.as_ref().map_or("none", |r| r.name.as_str())
    );

    let text = llm
        .generate(
            &system,
            &prompt,
            reference.as_ref().map(|r| r.pdf_base64.as_str()),
        )
        .await?;

    Ok(GenerateResponse {
        generated_resume_text: text,
        reference_template: reference,
        notice,
    })
}

pub fn build_system_prompt(resume_type: ResumeType) -> String {
    GENERATION_SYSTEM_TEMPLATE
        .replace("{tone_guidance}", &tone_guidance())
        .replace("{resume_type}", resume_type.label())
}

pub fn build_user_prompt(resume: &Resume, has_reference: bool) -> String {
    let closing = if has_reference {
        REFERENCE_INSTRUCTION
    } else {
        NO_REFERENCE_NOTE
    };
    format!("{}\n{closing}", format_resume_data(resume))
}

// ────────────────────────────────────────────────────────────────────────────
// User data block
// ────────────────────────────────────────────────────────────────────────────

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
        Gender::Other => "Other",
    }
}

/// One subsection per populated section. Target position only when applying;
/// skills, hobbies and references only when their flag is set.
pub fn format_resume_data(resume: &Resume) -> String {
    let mut out = String::from("## User Resume Data\n\n");

    let target = &resume.target_position;
    if target.applying_for_position {
        out.push_str("### Target Position\n");
        out.push_str(&format!("- Position: {}\n", or_na(&target.position_name)));
        if !target.company_name.is_empty() {
            out.push_str(&format!("- Company: {}\n", target.company_name));
        }
        if !target.industry.is_empty() {
            out.push_str(&format!("- Industry: {}\n", target.industry));
        }
        out.push('\n');
    }

    let b = &resume.biodata;
    out.push_str("### Biodata\n");
    out.push_str(&format!("- Name: {}\n", or_na(&b.name)));
    out.push_str(&format!("- Address: {}\n", or_na(&b.address)));
    out.push_str(&format!("- Contact: {}\n", or_na(&b.contact_number)));
    out.push_str(&format!("- Place/Date of Birth: {}\n", or_na(&b.birth_place_date)));
    out.push_str(&format!("- Gender: {}\n\n", gender_label(b.gender)));

    let p = &resume.short_profile;
    out.push_str("### Short Profile\n");
    out.push_str(&format!("- Background: {}\n", or_na(&p.background)));
    out.push_str(&format!("- Key Strengths: {}\n", or_na(&p.strengths)));
    out.push_str(&format!("- Career Goals: {}\n", or_na(&p.career_goals)));
    out.push_str(&format!("- Value to the Team: {}\n\n", or_na(&p.team_value)));

    if !resume.education.is_empty() {
        out.push_str("### Education\n");
        for edu in &resume.education {
            out.push_str(&format!(
                "- {} {} at {} ({})\n",
                edu.level, edu.major, edu.institution, edu.year_range
            ));
            if !edu.gpa.is_empty() {
                out.push_str(&format!("  - GPA: {}\n", edu.gpa));
            }
            if !edu.achievements.is_empty() {
                out.push_str(&format!("  - Achievements: {}\n", edu.achievements));
            }
        }
        out.push('\n');
    }

    if !resume.experience.is_empty() {
        out.push_str("### Work Experience\n");
        for exp in &resume.experience {
            out.push_str(&format!(
                "- {} at {} ({}, {})\n",
                exp.position, exp.company, exp.location, exp.period
            ));
            out.push_str(&format!("  - Tasks: {}\n", exp.tasks));
            if !exp.achievements.is_empty() {
                out.push_str(&format!("  - Achievements: {}\n", exp.achievements));
            }
        }
        out.push('\n');
    }

    let skills = &resume.skills;
    if skills.has_skills {
        out.push_str("### Skills\n");
        if !skills.main_skills.is_empty() {
            out.push_str(&format!("- Main: {}\n", skills.main_skills));
        }
        if !skills.foreign_languages.is_empty() {
            out.push_str(&format!("- Foreign Languages: {}\n", skills.foreign_languages));
        }
        out.push('\n');
    }

    let hobbies = &resume.hobbies;
    if hobbies.has_hobbies && !hobbies.hobbies_list.is_empty() {
        out.push_str(&format!("### Hobbies\n- {}\n\n", hobbies.hobbies_list));
    }

    let refs = &resume.references;
    if refs.has_references && !refs.entries.is_empty() {
        out.push_str("### References\n");
        for r in &refs.entries {
            out.push_str(&format!(
                "- {}, {} at {} (Contact: {})\n",
                r.full_name, r.position, r.company, r.contact_number
            ));
            if !r.email.is_empty() {
                out.push_str(&format!("  Email: {}\n", r.email));
            }
            out.push_str(&format!("  Relationship: {}\n", r.relationship));
        }
        out.push('\n');
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
