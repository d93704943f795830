//! Field rules shared by every document type.
//!
//! A section describes its constraints as a list of [`Rule`]s; [`check`] evaluates
//! them and collects one [`FieldError`] per failing field. Conditional requirements
//! are their own variants so a disabled flag never reaches the inner constraint.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Ordered list of field-path → message pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// True when some error is attributed to `path` exactly.
    pub fn has(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Phone,
    Slug,
    Email,
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        static PHONE: OnceLock<Regex> = OnceLock::new();
        static SLUG: OnceLock<Regex> = OnceLock::new();
        static EMAIL: OnceLock<Regex> = OnceLock::new();

        let (cell, source) = match self {
            Pattern::Phone => (&PHONE, r"^[0-9+ -]+$"),
            Pattern::Slug => (&SLUG, r"^[a-z0-9]+(?:-[a-z0-9]+)*$"),
            Pattern::Email => (&EMAIL, r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$"),
        };
        cell.get_or_init(|| Regex::new(source).expect("static pattern compiles"))
    }

    pub fn matches(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok()
}

/// One declarative constraint on one field.
#[derive(Debug, Clone)]
pub enum Rule<'a> {
    /// Non-empty after trimming.
    Required {
        path: String,
        value: &'a str,
        message: &'static str,
    },
    /// Checked only when the value is non-empty; pair with `Required` when mandatory.
    Matches {
        path: String,
        value: &'a str,
        pattern: Pattern,
        message: &'static str,
    },
    /// Empty, or a parseable URL.
    OptionalUrl {
        path: String,
        value: &'a str,
        message: &'static str,
    },
    /// Required only while `enabled` holds.
    RequiredWhen {
        enabled: bool,
        path: String,
        value: &'a str,
        message: &'static str,
    },
    /// At least one entry while `enabled` holds.
    EntriesWhen {
        enabled: bool,
        path: String,
        len: usize,
        message: &'static str,
    },
    MinEntries {
        path: String,
        len: usize,
        min: usize,
        message: &'static str,
    },
}

impl Rule<'_> {
    fn evaluate(self) -> Option<FieldError> {
        match self {
            Rule::Required {
                path,
                value,
                message,
            } => is_blank(value).then(|| FieldError::new(path, message)),
            Rule::Matches {
                path,
                value,
                pattern,
                message,
            } => (!value.is_empty() && !pattern.matches(value))
                .then(|| FieldError::new(path, message)),
            Rule::OptionalUrl {
                path,
                value,
                message,
            } => (!value.is_empty() && !is_valid_url(value)).then(|| FieldError::new(path, message)),
            Rule::RequiredWhen {
                enabled,
                path,
                value,
                message,
            } => (enabled && is_blank(value)).then(|| FieldError::new(path, message)),
            Rule::EntriesWhen {
                enabled,
                path,
                len,
                message,
            } => (enabled && len == 0).then(|| FieldError::new(path, message)),
            Rule::MinEntries {
                path,
                len,
                min,
                message,
            } => (len < min).then(|| FieldError::new(path, message)),
        }
    }
}

/// Evaluates every rule, keeping the first failure per path.
pub fn check<'a>(rules: impl IntoIterator<Item = Rule<'a>>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in rules {
        if let Some(err) = rule.evaluate() {
            if !errors.has(&err.path) {
                errors.push(err);
            }
        }
    }
    errors
}

/// Joins a parent path and a field name: `join("education[0]", "level")`.
pub fn join(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(Pattern::Phone.matches("+62 812-3456-7890"));
        assert!(!Pattern::Phone.matches("call me"));
        assert!(!Pattern::Phone.matches("0812x"));
    }

    #[test]
    fn test_slug_pattern() {
        assert!(Pattern::Slug.matches("tips-menulis-cv"));
        assert!(Pattern::Slug.matches("a1"));
        assert!(!Pattern::Slug.matches("Tips-CV"));
        assert!(!Pattern::Slug.matches("double--dash"));
        assert!(!Pattern::Slug.matches("-leading"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(Pattern::Email.matches("budi@example.co.id"));
        assert!(!Pattern::Email.matches("budi@"));
        assert!(!Pattern::Email.matches("no-at-sign.com"));
    }

    #[test]
    fn test_required_trims_whitespace() {
        let errors = check([Rule::Required {
            path: "a".into(),
            value: "   ",
            message: "A is required",
        }]);
        assert!(errors.has("a"));
    }

    #[test]
    fn test_matches_skips_empty_value() {
        let errors = check([Rule::Matches {
            path: "phone".into(),
            value: "",
            pattern: Pattern::Phone,
            message: "bad phone",
        }]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_when_disabled_never_fails() {
        let errors = check([Rule::RequiredWhen {
            enabled: false,
            path: "x".into(),
            value: "",
            message: "x required",
        }]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_first_error_per_path_wins() {
        let errors = check([
            Rule::Required {
                path: "phone".into(),
                value: "",
                message: "first",
            },
            Rule::Required {
                path: "phone".into(),
                value: "",
                message: "second",
            },
        ]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().message, "first");
    }

    #[test]
    fn test_optional_url() {
        let ok = check([Rule::OptionalUrl {
            path: "u".into(),
            value: "https://example.com/a.png",
            message: "bad",
        }]);
        assert!(ok.is_empty());
        let bad = check([Rule::OptionalUrl {
            path: "u".into(),
            value: "not a url",
            message: "bad",
        }]);
        assert!(bad.has("u"));
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join("", "name"), "name");
        assert_eq!(join("education[0]", "level"), "education[0].level");
    }
}
