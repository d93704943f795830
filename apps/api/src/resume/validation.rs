//! Resume constraints, one rule list per section.
//!
//! The flags `applyingForPosition`, `hasSkills`, `hasHobbies` and `hasReferences`
//! gate their dependent fields through `Rule::RequiredWhen` / `Rule::EntriesWhen`;
//! while a flag is off nothing under it can fail.

use serde::{Deserialize, Serialize};

use crate::models::resume::{EducationEntry, ExperienceEntry, ReferenceEntry, Resume};
use crate::validation::{check, join, Pattern, Rule, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    TargetPosition,
    Biodata,
    ShortProfile,
    Education,
    Experience,
    Skills,
    Hobbies,
    References,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::TargetPosition,
        Section::Biodata,
        Section::ShortProfile,
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::Hobbies,
        Section::References,
    ];

    /// Document key, also the prefix of every error path in the section.
    pub fn key(&self) -> &'static str {
        match self {
            Section::TargetPosition => "targetPosition",
            Section::Biodata => "biodata",
            Section::ShortProfile => "shortProfile",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Hobbies => "hobbies",
            Section::References => "references",
        }
    }
}

/// Validates the whole aggregate.
pub fn validate_resume(resume: &Resume) -> Result<(), ValidationErrors> {
    validate_sections(resume, &Section::ALL)
}

/// Validates only the listed sections.
pub fn validate_sections(resume: &Resume, sections: &[Section]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for section in sections {
        errors.extend(check(section_rules(resume, *section)));
    }
    errors.into_result()
}

fn section_rules(resume: &Resume, section: Section) -> Vec<Rule<'_>> {
    let key = section.key();
    match section {
        Section::TargetPosition => {
            let t = &resume.target_position;
            vec![Rule::RequiredWhen {
                enabled: t.applying_for_position,
                path: join(key, "positionName"),
                value: &t.position_name,
                message: "Position applied for is required when you answer 'Yes'",
            }]
        }
        Section::Biodata => {
            let b = &resume.biodata;
            vec![
                Rule::Required {
                    path: join(key, "name"),
                    value: &b.name,
                    message: "Name is required",
                },
                Rule::Required {
                    path: join(key, "address"),
                    value: &b.address,
                    message: "Address is required",
                },
                Rule::Required {
                    path: join(key, "contactNumber"),
                    value: &b.contact_number,
                    message: "Contact number is required",
                },
                Rule::Matches {
                    path: join(key, "contactNumber"),
                    value: &b.contact_number,
                    pattern: Pattern::Phone,
                    message: "Invalid contact number format",
                },
                Rule::Required {
                    path: join(key, "birthPlaceDate"),
                    value: &b.birth_place_date,
                    message: "Place and date of birth are required",
                },
                Rule::OptionalUrl {
                    path: join(key, "photoUrl"),
                    value: &b.photo_url,
                    message: "Invalid photo URL",
                },
            ]
        }
        Section::ShortProfile => {
            let p = &resume.short_profile;
            vec![
                Rule::Required {
                    path: join(key, "background"),
                    value: &p.background,
                    message: "Background is required",
                },
                Rule::Required {
                    path: join(key, "strengths"),
                    value: &p.strengths,
                    message: "Main strengths are required",
                },
                Rule::Required {
                    path: join(key, "careerGoals"),
                    value: &p.career_goals,
                    message: "Career goals are required",
                },
                Rule::Required {
                    path: join(key, "teamValue"),
                    value: &p.team_value,
                    message: "The value you bring to a team is required",
                },
            ]
        }
        Section::Education => {
            let mut rules = vec![Rule::MinEntries {
                path: key.to_string(),
                len: resume.education.len(),
                min: 1,
                message: "At least one education entry is required",
            }];
            for (i, entry) in resume.education.iter().enumerate() {
                rules.extend(education_rules(&format!("{key}[{i}]"), entry));
            }
            rules
        }
        Section::Experience => resume
            .experience
            .iter()
            .enumerate()
            .flat_map(|(i, entry)| experience_rules(format!("{key}[{i}]"), entry))
            .collect(),
        Section::Skills => {
            let s = &resume.skills;
            vec![Rule::RequiredWhen {
                enabled: s.has_skills,
                path: join(key, "mainSkills"),
                value: &s.main_skills,
                message: "Main skills are required when you answer 'Yes'",
            }]
        }
        Section::Hobbies => {
            let h = &resume.hobbies;
            vec![Rule::RequiredWhen {
                enabled: h.has_hobbies,
                path: join(key, "hobbiesList"),
                value: &h.hobbies_list,
                message: "Hobbies are required when you answer 'Yes'",
            }]
        }
        Section::References => {
            let r = &resume.references;
            let entries_path = join(key, "entries");
            let mut rules = vec![Rule::EntriesWhen {
                enabled: r.has_references,
                path: entries_path.clone(),
                len: r.entries.len(),
                message: "At least one reference is required when you answer 'Yes'",
            }];
            if r.has_references {
                for (i, entry) in r.entries.iter().enumerate() {
                    rules.extend(reference_rules(format!("{entries_path}[{i}]"), entry));
                }
            }
            rules
        }
    }
}

fn education_rules<'a>(prefix: &str, e: &'a EducationEntry) -> Vec<Rule<'a>> {
    vec![
        Rule::Required {
            path: join(prefix, "level"),
            value: &e.level,
            message: "Education level is required",
        },
        Rule::Required {
            path: join(prefix, "institution"),
            value: &e.institution,
            message: "Institution name is required",
        },
        Rule::Required {
            path: join(prefix, "major"),
            value: &e.major,
            message: "Major / study program is required",
        },
        Rule::Required {
            path: join(prefix, "yearRange"),
            value: &e.year_range,
            message: "Start and graduation years are required",
        },
    ]
}

fn experience_rules(prefix: String, e: &ExperienceEntry) -> Vec<Rule<'_>> {
    vec![
        Rule::Required {
            path: join(&prefix, "company"),
            value: &e.company,
            message: "Company name is required",
        },
        Rule::Required {
            path: join(&prefix, "position"),
            value: &e.position,
            message: "Position / title is required",
        },
        Rule::Required {
            path: join(&prefix, "location"),
            value: &e.location,
            message: "Work location is required",
        },
        Rule::Required {
            path: join(&prefix, "period"),
            value: &e.period,
            message: "Work period is required",
        },
        Rule::Required {
            path: join(&prefix, "tasks"),
            value: &e.tasks,
            message: "Tasks and responsibilities are required",
        },
    ]
}

fn reference_rules(prefix: String, r: &ReferenceEntry) -> Vec<Rule<'_>> {
    vec![
        Rule::Required {
            path: join(&prefix, "fullName"),
            value: &r.full_name,
            message: "Full name is required",
        },
        Rule::Required {
            path: join(&prefix, "position"),
            value: &r.position,
            message: "Position / title is required",
        },
        Rule::Required {
            path: join(&prefix, "company"),
            value: &r.company,
            message: "Company / institution name is required",
        },
        Rule::Required {
            path: join(&prefix, "contactNumber"),
            value: &r.contact_number,
            message: "Phone number is required",
        },
        Rule::Matches {
            path: join(&prefix, "contactNumber"),
            value: &r.contact_number,
            pattern: Pattern::Phone,
            message: "Invalid phone number format",
        },
        Rule::Matches {
            path: join(&prefix, "email"),
            value: &r.email,
            pattern: Pattern::Email,
            message: "Invalid email format",
        },
        Rule::Required {
            path: join(&prefix, "relationship"),
            value: &r.relationship,
            message: "Professional relationship is required",
        },
    ]
}


#[cfg(test)]
mod tests {
    use super::fixtures::{complete_resume, reference};
    use super::*;
    use crate::models::resume::ExperienceEntry;

    fn errors_of(resume: &Resume) -> ValidationErrors {
        validate_resume(resume).unwrap_err()
    }

    #[test]
    fn test_complete_resume_is_valid() {
        assert!(validate_resume(&complete_resume()).is_ok());
    }

    #[test]
    fn test_blank_resume_reports_required_fields() {
        let errors = errors_of(&Resume::blank());
        assert!(errors.has("biodata.name"));
        assert!(errors.has("shortProfile.background"));
        assert!(errors.has("education[0].level"));
        assert!(!errors.has("targetPosition.positionName"));
    }

    #[test]
    fn test_applying_without_position_name_fails_on_position_name() {
        let mut r = complete_resume();
        r.target_position.applying_for_position = true;
        r.target_position.position_name = String::new();
        let errors = errors_of(&r);
        assert!(errors.has("targetPosition.positionName"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_disabled_flags_never_block_whatever_the_dependent_value() {
        for dependent in ["", "   ", "something"] {
            let mut r = complete_resume();
            r.target_position.applying_for_position = false;
            r.target_position.position_name = dependent.to_string();
            r.skills.has_skills = false;
            r.skills.main_skills = dependent.to_string();
            r.hobbies.has_hobbies = false;
            r.hobbies.hobbies_list = dependent.to_string();
            r.references.has_references = false;
            r.references.entries = vec![];
            assert!(validate_resume(&r).is_ok(), "dependent={dependent:?}");
        }
    }

    #[test]
    fn test_disabled_references_ignore_malformed_entries() {
        let mut r = complete_resume();
        r.references.has_references = false;
        r.references.entries = vec![ReferenceEntry {
            contact_number: "not a phone".into(),
            ..ReferenceEntry::default()
        }];
        assert!(validate_resume(&r).is_ok());
    }

    #[test]
    fn test_enabled_flags_require_dependents() {
        let mut r = complete_resume();
        r.skills.has_skills = true;
        r.skills.main_skills = " ".into();
        r.hobbies.has_hobbies = true;
        r.hobbies.hobbies_list = String::new();
        let errors = errors_of(&r);
        assert!(errors.has("skills.mainSkills"));
        assert!(errors.has("hobbies.hobbiesList"));

        r.skills.main_skills = "Rust".into();
        r.hobbies.hobbies_list = "Hiking".into();
        assert!(validate_resume(&r).is_ok());
    }

    #[test]
    fn test_references_enabled_with_no_entries_fails() {
        let mut r = complete_resume();
        r.references.has_references = true;
        r.references.entries = vec![];
        assert!(errors_of(&r).has("references.entries"));

        r.references.entries = vec![reference()];
        assert!(validate_resume(&r).is_ok());
    }

    #[test]
    fn test_reference_entry_fields() {
        let mut r = complete_resume();
        r.references.entries = vec![ReferenceEntry {
            email: "nope".into(),
            contact_number: "abc".into(),
            ..reference()
        }];
        let errors = errors_of(&r);
        assert!(errors.has("references.entries[0].email"));
        assert!(errors.has("references.entries[0].contactNumber"));
    }

    #[test]
    fn test_reference_email_optional() {
        let mut r = complete_resume();
        r.references.entries = vec![ReferenceEntry {
            email: String::new(),
            ..reference()
        }];
        assert!(validate_resume(&r).is_ok());
    }

    #[test]
    fn test_education_requires_at_least_one_entry() {
        let mut r = complete_resume();
        r.education.clear();
        assert!(errors_of(&r).has("education"));
    }

    #[test]
    fn test_experience_may_be_empty_but_entries_are_checked() {
        let mut r = complete_resume();
        r.experience.clear();
        assert!(validate_resume(&r).is_ok());

        r.experience.push(ExperienceEntry {
            company: "X".into(),
            ..ExperienceEntry::default()
        });
        let errors = errors_of(&r);
        assert!(errors.has("experience[0].position"));
        assert!(!errors.has("experience[0].company"));
        assert!(!errors.has("experience[0].achievements"));
    }

    #[test]
    fn test_contact_number_format() {
        let mut r = complete_resume();
        r.biodata.contact_number = "0812-abc".into();
        let errors = errors_of(&r);
        assert!(errors.has("biodata.contactNumber"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_photo_url_empty_or_valid() {
        let mut r = complete_resume();
        r.biodata.photo_url = "https://example.com/me.jpg".into();
        assert!(validate_resume(&r).is_ok());
        r.biodata.photo_url = "me.jpg".into();
        assert!(errors_of(&r).has("biodata.photoUrl"));
    }

    #[test]
    fn test_scoped_validation_ignores_other_sections() {
        let mut r = Resume::blank();
        r.target_position.applying_for_position = false;
        assert!(validate_sections(&r, &[Section::TargetPosition]).is_ok());
        assert!(validate_sections(&r, &[Section::Experience]).is_ok());
        assert!(validate_sections(&r, &[Section::Biodata]).is_err());
    }

    #[test]
    fn test_scoped_errors_stay_in_scope() {
        let errors = validate_sections(&Resume::blank(), &[Section::ShortProfile]).unwrap_err();
        assert!(errors.iter().all(|e| e.path.starts_with("shortProfile.")));
    }
}
