//! Tone calibration: maps the selected resume type to what the writer should
//! emphasise and the voice it should use.

use crate::models::template::ResumeType;

#[derive(Debug, Clone, PartialEq)]
pub struct ToneGuide {
    pub emphasis: &'static str,
    pub voice: &'static str,
    pub strong_verbs: &'static [&'static str],
}

pub fn tone_for(resume_type: ResumeType) -> ToneGuide {
    match resume_type {
        ResumeType::FreshGraduate => ToneGuide {
            emphasis: "education, skills, relevant projects and potential",
            voice: "enthusiastic and proactive",
            strong_verbs: &["Completed", "Organized", "Developed", "Volunteered", "Learned"],
        },
        ResumeType::Professional => ToneGuide {
            emphasis: "achievements, quantifiable results and career progression",
            voice: "confident and experienced",
            strong_verbs: &["Led", "Delivered", "Increased", "Reduced", "Managed"],
        },
        ResumeType::CareerChanger => ToneGuide {
            emphasis: "transferable skills, adaptability and how past experience relates to the new path",
            voice: "motivated and forward-looking",
            strong_verbs: &["Adapted", "Applied", "Transitioned", "Bridged", "Retrained"],
        },
    }
}

/// One bullet line per resume type, in the order of [`ResumeType::ALL`].
pub fn tone_guidance() -> String {
    ResumeType::ALL
        .iter()
        .map(|t| {
            let guide = tone_for(*t);
            format!(
                "- For '{}': emphasise {}. Use a {} tone. Favour verbs such as {}.",
                t.label(),
                guide.emphasis,
                guide.voice,
                guide.strong_verbs.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
