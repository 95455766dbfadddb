//! Form field validation and sanitization.
//!
//! Rules are plain structs evaluated against raw string values, with no
//! knowledge of the web framework, so the same rules back both the create
//! and update handlers and stay unit-testable without a simulated request.
//! All rules for a form are applied before the result is inspected: the
//! re-rendered form carries one message per failed field.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// A single failed field with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Escape markup-significant characters so stored values are inert in HTML
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rule for a free-text field: trim, escape, optionally require non-empty
pub struct TextField {
    pub name: &'static str,
    pub message: &'static str,
    pub required: bool,
}

impl TextField {
    pub fn required(name: &'static str, message: &'static str) -> Self {
        Self {
            name,
            message,
            required: true,
        }
    }

    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            message: "",
            required: false,
        }
    }

    /// Sanitize the raw value; record an error when a required field is empty
    /// after trimming. The sanitized value is returned either way so failed
    /// forms re-render with the submitted input.
    pub fn apply(&self, raw: &str, errors: &mut Vec<FieldError>) -> String {
        let trimmed = raw.trim();
        if self.required && trimmed.is_empty() {
            errors.push(FieldError::new(self.name, self.message));
        }
        escape_markup(trimmed)
    }
}

/// Rule for an optional ISO-8601 date field: empty means absent
pub struct DateField {
    pub name: &'static str,
    pub message: &'static str,
}

impl DateField {
    pub fn new(name: &'static str, message: &'static str) -> Self {
        Self { name, message }
    }

    /// Parse `YYYY-MM-DD` (or a full RFC 3339 timestamp) when the raw value
    /// is non-empty; an empty value is absent, not an error.
    pub fn apply(&self, raw: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(ts.date_naive());
        }
        errors.push(FieldError::new(self.name, self.message));
        None
    }
}

/// Rule for a reference field: must carry the id of another record
pub struct ReferenceField {
    pub name: &'static str,
    pub message: &'static str,
}

impl ReferenceField {
    pub fn new(name: &'static str, message: &'static str) -> Self {
        Self { name, message }
    }

    pub fn apply(&self, raw: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
        match raw.trim().parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new(self.name, self.message));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_markup(r#"<b>Tom & "Jerry's"</b>"#),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#x27;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_markup("plain text"), "plain text");
    }

    #[test]
    fn required_text_trims_and_flags_empty() {
        let rule = TextField::required("name", "Genre name required");
        let mut errors = Vec::new();

        assert_eq!(rule.apply("  Fantasy  ", &mut errors), "Fantasy");
        assert!(errors.is_empty());

        assert_eq!(rule.apply("   ", &mut errors), "");
        assert_eq!(
            errors,
            vec![FieldError::new("name", "Genre name required")]
        );
    }

    #[test]
    fn optional_text_accepts_empty() {
        let rule = TextField::optional("status");
        let mut errors = Vec::new();
        assert_eq!(rule.apply("", &mut errors), "");
        assert!(errors.is_empty());
    }

    #[test]
    fn date_parses_iso_and_rfc3339() {
        let rule = DateField::new("due_back", "Invalid date");
        let mut errors = Vec::new();

        assert_eq!(
            rule.apply("2024-10-06", &mut errors),
            NaiveDate::from_ymd_opt(2024, 10, 6)
        );
        assert_eq!(
            rule.apply("2024-10-06T12:30:00Z", &mut errors),
            NaiveDate::from_ymd_opt(2024, 10, 6)
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_date_is_absent_not_invalid() {
        let rule = DateField::new("due_back", "Invalid date");
        let mut errors = Vec::new();
        assert_eq!(rule.apply("  ", &mut errors), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let rule = DateField::new("date_of_birth", "Invalid date of birth");
        let mut errors = Vec::new();
        assert_eq!(rule.apply("06/10/2024", &mut errors), None);
        assert_eq!(
            errors,
            vec![FieldError::new("date_of_birth", "Invalid date of birth")]
        );
    }

    #[test]
    fn reference_requires_integer_id() {
        let rule = ReferenceField::new("book", "Book must be specified");
        let mut errors = Vec::new();

        assert_eq!(rule.apply(" 42 ", &mut errors), Some(42));
        assert!(errors.is_empty());

        assert_eq!(rule.apply("", &mut errors), None);
        assert_eq!(
            errors,
            vec![FieldError::new("book", "Book must be specified")]
        );
    }

    #[test]
    fn all_rules_accumulate_errors() {
        let mut errors = Vec::new();
        TextField::required("imprint", "Imprint must be specified").apply("", &mut errors);
        ReferenceField::new("book", "Book must be specified").apply("", &mut errors);
        DateField::new("due_back", "Invalid date").apply("not-a-date", &mut errors);
        assert_eq!(errors.len(), 3);
    }
}
