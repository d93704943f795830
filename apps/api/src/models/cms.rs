use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// A site-wide content document stored under a fixed key.
pub trait CmsDocument: Serialize + DeserializeOwned + Default + Clone + Send + Sync {
    const KEY: &'static str;

    /// Starting content stored the first time an admin opens the page.
    /// `None` means the page starts out empty.
    fn initial() -> Option<Self> {
        None
    }

    /// What visitors see while nothing is stored. Never persisted.
    fn fallback() -> Self {
        Self::initial().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Logo {
    /// Image URL or `data:image/...` URI; empty means "no logo".
    pub url: String,
}

impl CmsDocument for Logo {
    const KEY: &'static str = "logo";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutUs {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub image_alt: String,
    pub data_ai_hint: String,
}

impl CmsDocument for AboutUs {
    const KEY: &'static str = "aboutUs";

    fn initial() -> Option<Self> {
        Some(AboutUs {
            title: "About ResumeForge".to_string(),
            content: "ResumeForge is a platform that helps you build a professional resume quickly and easily. \
                We believe everyone deserves the best shot at their career, and a strong resume is the first step.\n\n\
                Our mission is to give job seekers tools that are powerful yet intuitive, combining modern design \
                with current AI technology to produce resumes that stand out.\n\n\
                Our team brings together professionals from HR, design and technology to give our users the best experience."
                .to_string(),
            image_url: "https://placehold.co/800x400.png".to_string(),
            image_alt: "Our Team".to_string(),
            data_ai_hint: "team collaboration".to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HelpContent {
    pub main_title: String,
    pub intro_text: String,
    pub faq_title: String,
    pub faqs: Vec<FaqItem>,
    pub contact_title: String,
    pub contact_intro_text: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_hours: String,
}

impl CmsDocument for HelpContent {
    const KEY: &'static str = "help";

    fn initial() -> Option<Self> {
        Some(HelpContent {
            main_title: "ResumeForge Help Center".to_string(),
            intro_text: "We are here to help! Find answers to common questions below, \
                or contact us if you need further assistance."
                .to_string(),
            faq_title: "Frequently Asked Questions".to_string(),
            faqs: vec![FaqItem {
                question: "How do I get started?".to_string(),
                answer: "Create an account, open the resume wizard and fill in each step. \
                    When you are done, pick a resume type and let the AI write a draft for you."
                    .to_string(),
            }],
            contact_title: "Contact Us".to_string(),
            contact_intro_text: "If you cannot find the answer you are looking for, \
                do not hesitate to reach our support team:"
                .to_string(),
            contact_email: "support@example.com".to_string(),
            contact_phone: "+62 21 000 0000".to_string(),
            contact_hours: "(Office hours)".to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Footer {
    pub text: String,
}

impl CmsDocument for Footer {
    const KEY: &'static str = "footer";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image_url: String,
    pub image_alt: String,
    pub data_ai_hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDocument {
    pub id: Uuid,
    #[serde(flatten)]
    pub post: BlogPost,
    /// Publication date, refreshed on every edit.
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
