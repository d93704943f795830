use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Style category a generated resume is written in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResumeType {
    FreshGraduate,
    Professional,
    CareerChanger,
}

impl ResumeType {
    pub const ALL: [ResumeType; 3] = [
        ResumeType::FreshGraduate,
        ResumeType::Professional,
        ResumeType::CareerChanger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeType::FreshGraduate => "fresh_graduate",
            ResumeType::Professional => "professional",
            ResumeType::CareerChanger => "career_changer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResumeType::FreshGraduate => "Fresh Graduate",
            ResumeType::Professional => "Professional",
            ResumeType::CareerChanger => "Career Changer",
        }
    }
}

/// Reference resume an admin uploads to steer the style of generated text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiResumeTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub resume_type: ResumeType,
    /// `data:application/pdf;base64,...`; empty when no PDF is attached.
    #[serde(default)]
    pub pdf_data: String,
    #[serde(default)]
    pub pdf_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiResumeTemplateDocument {
    pub id: Uuid,
    #[serde(flatten)]
    pub template: AiResumeTemplate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AiResumeTemplateDocument {
    pub fn has_pdf(&self) -> bool {
        !self.template.pdf_data.is_empty()
    }
}

/// Listing row without the PDF payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResumeTemplateSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub resume_type: ResumeType,
    pub pdf_file_name: String,
    pub has_pdf: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&AiResumeTemplateDocument> for AiResumeTemplateSummary {
    fn from(doc: &AiResumeTemplateDocument) -> Self {
        AiResumeTemplateSummary {
            id: doc.id,
            name: doc.template.name.clone(),
            description: doc.template.description.clone(),
            resume_type: doc.template.resume_type,
            pdf_file_name: doc.template.pdf_file_name.clone(),
            has_pdf: doc.has_pdf(),
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_type_serializes_as_str() {
        for t in ResumeType::ALL {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
        }
        assert!(serde_json::from_value::<ResumeType>(serde_json::json!("intern")).is_err());
    }

    #[test]
    fn test_template_optional_fields_default() {
        let t: AiResumeTemplate = serde_json::from_value(serde_json::json!({
            "name": "Classic",
            "resumeType": "professional"
        }))
        .unwrap();
        assert_eq!(t.pdf_data, "");
        assert_eq!(t.resume_type, ResumeType::Professional);
    }
}
