use crate::models::cms::{AboutUs, BlogPost, Footer, HelpContent, Logo};
use crate::validation::{check, is_valid_url, FieldError, Pattern, Rule, ValidationErrors};

const IMAGE_DATA_URI_PREFIX: &str = "data:image/";

pub fn validate_logo(logo: &Logo) -> Result<(), ValidationErrors> {
    let url = logo.url.trim();
    if url.is_empty() || url.starts_with(IMAGE_DATA_URI_PREFIX) || is_valid_url(url) {
        return Ok(());
    }
    Err(vec![FieldError::new(
        "url",
        "Logo must be an image URL or an image data URI",
    )]
    .into())
}

pub fn validate_about(about: &AboutUs) -> Result<(), ValidationErrors> {
    check([
        Rule::Required {
            path: "title".into(),
            value: &about.title,
            message: "Title is required",
        },
        Rule::Required {
            path: "content".into(),
            value: &about.content,
            message: "Content is required",
        },
        Rule::OptionalUrl {
            path: "imageUrl".into(),
            value: &about.image_url,
            message: "Image URL is not valid",
        },
    ])
    .into_result()
}

pub fn validate_help(help: &HelpContent) -> Result<(), ValidationErrors> {
    let mut rules = vec![
        Rule::Required {
            path: "mainTitle".into(),
            value: &help.main_title,
            message: "Main title is required",
        },
        Rule::Required {
            path: "faqTitle".into(),
            value: &help.faq_title,
            message: "FAQ title is required",
        },
        Rule::Required {
            path: "contactTitle".into(),
            value: &help.contact_title,
            message: "Contact title is required",
        },
        Rule::Matches {
            path: "contactEmail".into(),
            value: help.contact_email.trim(),
            pattern: Pattern::Email,
            message: "Contact email is not valid",
        },
    ];
    for (i, faq) in help.faqs.iter().enumerate() {
        rules.push(Rule::Required {
            path: format!("faqs[{i}].question"),
            value: &faq.question,
            message: "Question is required",
        });
        rules.push(Rule::Required {
            path: format!("faqs[{i}].answer"),
            value: &faq.answer,
            message: "Answer is required",
        });
    }
    check(rules).into_result()
}

pub fn validate_footer(footer: &Footer) -> Result<(), ValidationErrors> {
    check([Rule::Required {
        path: "text".into(),
        value: &footer.text,
        message: "Footer text is required",
    }])
    .into_result()
}

pub fn validate_blog_post(post: &BlogPost) -> Result<(), ValidationErrors> {
    check([
        Rule::Required {
            path: "title".into(),
            value: &post.title,
            message: "Title is required",
        },
        Rule::Required {
            path: "slug".into(),
            value: &post.slug,
            message: "Slug is required",
        },
        Rule::Matches {
            path: "slug".into(),
            value: &post.slug,
            pattern: Pattern::Slug,
            message: "Slug may only contain lowercase letters, digits and single dashes",
        },
        Rule::Required {
            path: "content".into(),
            value: &post.content,
            message: "Content is required",
        },
        Rule::OptionalUrl {
            path: "imageUrl".into(),
            value: &post.image_url,
            message: "Image URL is not valid",
        },
    ])
    .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cms::{CmsDocument, FaqItem};

    #[test]
    fn test_logo_accepts_url_data_uri_or_empty() {
        for url in ["", "https://cdn.example.com/logo.png", "data:image/png;base64,iVBORw0"] {
            let logo = Logo { url: url.into() };
            assert!(validate_logo(&logo).is_ok(), "{url}");
        }
        let bad = Logo {
            url: "not a url".into(),
        };
        assert!(validate_logo(&bad).unwrap_err().has("url"));
    }

    #[test]
    fn test_about_requires_title_and_content() {
        let errors = validate_about(&AboutUs::default()).unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("content"));
        assert!(!errors.has("imageUrl"));
        assert!(validate_about(&AboutUs::initial().unwrap()).is_ok());
    }

    #[test]
    fn test_help_checks_each_faq_and_contact_email() {
        let mut help = HelpContent {
            main_title: "Help".into(),
            faq_title: "FAQ".into(),
            contact_title: "Contact".into(),
            contact_email: "support@".into(),
            faqs: vec![
                FaqItem {
                    question: "How?".into(),
                    answer: "Like this.".into(),
                },
                FaqItem {
                    question: "Why?".into(),
                    answer: String::new(),
                },
            ],
            ..HelpContent::default()
        };
        let errors = validate_help(&help).unwrap_err();
        assert!(errors.has("faqs[1].answer"));
        assert!(!errors.has("faqs[0].answer"));
        assert!(errors.has("contactEmail"));

        help.faqs[1].answer = "Because.".into();
        help.contact_email = "support@example.com".into();
        assert!(validate_help(&help).is_ok());
    }

    #[test]
    fn test_footer_requires_text() {
        assert!(validate_footer(&Footer::default()).is_err());
        assert!(validate_footer(&Footer {
            text: "© ResumeForge".into()
        })
        .is_ok());
    }

    #[test]
    fn test_blog_slug_format() {
        let mut post = BlogPost {
            title: "Tips".into(),
            slug: "Tips For CV".into(),
            content: "Body".into(),
            ..BlogPost::default()
        };
        assert!(validate_blog_post(&post).unwrap_err().has("slug"));
        post.slug = "tips-for-cv".into();
        assert!(validate_blog_post(&post).is_ok());
    }
}
