use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Every struct defaults field-by-field so a partially stored document still
// loads into the full shape the wizard edits.

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetPosition {
    pub applying_for_position: bool,
    pub position_name: String,
    pub company_name: String,
    pub industry: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[default]
    #[serde(rename = "Laki-laki")]
    Male,
    #[serde(rename = "Perempuan")]
    Female,
    #[serde(rename = "Lainnya")]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Biodata {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub birth_place_date: String,
    pub gender: Gender,
    pub photo_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortProfile {
    pub background: String,
    pub strengths: String,
    pub career_goals: String,
    pub team_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub level: String,
    pub institution: String,
    pub major: String,
    pub year_range: String,
    pub gpa: String,
    pub achievements: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub location: String,
    pub period: String,
    pub tasks: String,
    pub achievements: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Skills {
    pub has_skills: bool,
    /// Comma-separated.
    pub main_skills: String,
    pub foreign_languages: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Hobbies {
    pub has_hobbies: bool,
    pub hobbies_list: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub full_name: String,
    pub position: String,
    pub company: String,
    pub contact_number: String,
    pub email: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct References {
    pub has_references: bool,
    pub entries: Vec<ReferenceEntry>,
}

/// The resume aggregate edited by the wizard and stored per user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    pub target_position: TargetPosition,
    pub biodata: Biodata,
    pub short_profile: ShortProfile,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Skills,
    pub hobbies: Hobbies,
    pub references: References,
}

impl Resume {
    /// The value a fresh wizard starts from: one blank education entry so the
    /// mandatory list always has a row to fill in.
    pub fn blank() -> Self {
        Resume {
            education: vec![EducationEntry::default()],
            ..Resume::default()
        }
    }

    /// Clears fields that only matter while their section flag is on.
    pub fn normalized(mut self) -> Self {
        if !self.skills.has_skills {
            self.skills.main_skills.clear();
            self.skills.foreign_languages.clear();
        }
        if !self.hobbies.has_hobbies {
            self.hobbies.hobbies_list.clear();
        }
        if !self.references.has_references {
            self.references.entries.clear();
        }
        self
    }

    /// Display title used by the resume listing.
    pub fn title(&self) -> String {
        let position = self.target_position.position_name.trim();
        if self.target_position.applying_for_position && !position.is_empty() {
            return position.to_string();
        }
        let name = self.biodata.name.trim();
        if !name.is_empty() {
            return format!("Resume for {name}");
        }
        "Untitled resume".to_string()
    }
}

/// Partial update: only sections that are `Some` overwrite the stored ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_position: Option<TargetPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biodata: Option<Biodata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_profile: Option<ShortProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Hobbies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<References>,
}

impl From<Resume> for ResumePatch {
    fn from(r: Resume) -> Self {
        ResumePatch {
            target_position: Some(r.target_position),
            biodata: Some(r.biodata),
            short_profile: Some(r.short_profile),
            education: Some(r.education),
            experience: Some(r.experience),
            skills: Some(r.skills),
            hobbies: Some(r.hobbies),
            references: Some(r.references),
        }
    }
}

/// A stored resume with its server-assigned metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub resume: Resume,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row for the "my resumes" page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeDocument> for ResumeSummary {
    fn from(doc: &ResumeDocument) -> Self {
        ResumeSummary {
            id: doc.id,
            title: doc.resume.title(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
