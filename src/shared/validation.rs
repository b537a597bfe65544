//! Field validation and normalization shared by every feature.
//!
//! Structural checks (length, URL and email format) are declared with
//! `validator` derives on request DTOs. Normalization and checks that need the
//! database are plain functions returning `Result<T, String>` that services
//! chain per field and collect into [`FieldErrors`].

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

use validator::{ValidateEmail, ValidateUrl, ValidationError, ValidationErrors};

lazy_static! {
    /// Regex for phone numbers: optional leading `+`, then digits with optional
    /// single spaces or hyphens between them
    /// - Valid: "+2348012345678", "0801 234 5678", "080-1234"
    /// - Invalid: "phone", "++234", "080--1234", "+ 234"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]+(?:[ -][0-9]+)*$").unwrap();
}

/// Field-keyed validation errors, serialized as `{ "field": ["message", ...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for an error set with exactly one message
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the error of a field check and hand back its value on success
    pub fn capture<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Flattened "field: message" lines, used for the `errors` array of the envelope
    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

/// Python-style title casing: the first letter of every alphabetic run is
/// upper-cased, the rest lower-cased.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.chars() {
        if previous_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    out
}

/// Trimmed value of a required text field
pub fn required_text(value: &str, label: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty.", label));
    }
    Ok(trimmed.to_string())
}

/// Normalize a participant name: trimmed, at least two characters, title-cased.
pub fn normalize_person_name(value: &str) -> Result<String, String> {
    let trimmed = required_text(value, "Name field")?;
    if trimmed.chars().count() < 2 {
        return Err("Name must be at least 2 characters long.".to_string());
    }
    Ok(title_case(&trimmed))
}

/// Normalize an email address: trimmed, lower-cased and well formed.
pub fn normalize_email(value: &str) -> Result<String, String> {
    let normalized = required_text(value, "Email field")?.to_lowercase();
    if !normalized.validate_email() {
        return Err("Enter a valid email address.".to_string());
    }
    Ok(normalized)
}

/// Trimmed phone number; blank input is treated as absent.
pub fn normalize_phone(value: Option<&str>) -> Result<Option<String>, String> {
    let Some(phone) = value.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    if phone.chars().count() > 13 {
        return Err("Phone number must not exceed 13 characters.".to_string());
    }
    if !PHONE_REGEX.is_match(phone) {
        return Err("Enter a valid phone number.".to_string());
    }
    Ok(Some(phone.to_string()))
}

/// Blank optional strings become `None`, others are trimmed
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Derive hook for optional link fields. Checks the trimmed value; blank is allowed.
pub fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message(Cow::Borrowed("Enter a valid URL.")))
}

/// Derive hook for optional email fields. Checks the trimmed value; blank is allowed.
pub fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email")
        .with_message(Cow::Borrowed("Enter a valid email address.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane doe"), "Jane Doe");
        assert_eq!(title_case("JOHN o'neil"), "John O'Neil");
        assert_eq!(title_case("mary-jane"), "Mary-Jane");
    }

    #[test]
    fn test_normalize_person_name() {
        assert_eq!(normalize_person_name("  jane doe ").unwrap(), "Jane Doe");
        assert_eq!(
            normalize_person_name("   ").unwrap_err(),
            "Name field cannot be empty."
        );
        assert_eq!(
            normalize_person_name(" a ").unwrap_err(),
            "Name must be at least 2 characters long."
        );
        assert_eq!(normalize_person_name("al").unwrap(), "Al");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  User@Example.COM ").unwrap(),
            "user@example.com"
        );
        assert_eq!(
            normalize_email("").unwrap_err(),
            "Email field cannot be empty."
        );
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(None).unwrap(), None);
        assert_eq!(normalize_phone(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_phone(Some(" +2348012345 ")).unwrap(),
            Some("+2348012345".to_string())
        );
        assert!(normalize_phone(Some("+23480123456789")).is_err()); // too long
        assert!(normalize_phone(Some("call me")).is_err());
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+2348012345678"));
        assert!(PHONE_REGEX.is_match("0801 234 5678"));
        assert!(PHONE_REGEX.is_match("080-1234"));
        assert!(!PHONE_REGEX.is_match("++234"));
        assert!(!PHONE_REGEX.is_match("080--1234"));
        assert!(!PHONE_REGEX.is_match("+ 234"));
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_field_errors_collects_per_field() {
        let mut errors = FieldErrors::new();
        let name = errors.capture("user_name", normalize_person_name("x"));
        let email = errors.capture("user_email", normalize_email(" A@B.io "));

        assert!(name.is_none());
        assert_eq!(email.as_deref(), Some("a@b.io"));
        assert_eq!(
            errors.get("user_name"),
            Some(&["Name must be at least 2 characters long.".to_string()][..])
        );
        assert!(errors.get("user_email").is_none());
        assert_eq!(
            errors.messages(),
            vec!["user_name: Name must be at least 2 characters long.".to_string()]
        );
        assert!(errors.into_result().is_err());
    }

    #[derive(Validate)]
    struct CodeForm {
        #[validate(length(max = 3, message = "Too long"))]
        code: String,
    }

    #[test]
    fn test_field_errors_from_validator() {
        let form = CodeForm {
            code: "abcdef".to_string(),
        };
        let errors: FieldErrors = form.validate().unwrap_err().into();
        assert_eq!(errors.get("code"), Some(&["Too long".to_string()][..]));
    }

    #[derive(Validate)]
    struct LinkForm {
        #[validate(custom(function = "validate_optional_url"))]
        website: Option<String>,
        #[validate(custom(function = "validate_optional_email"))]
        email: Option<String>,
    }

    #[test]
    fn test_optional_links_accept_blank_and_padded_values() {
        let form = LinkForm {
            website: Some("".to_string()),
            email: Some("  Grace@Example.com ".to_string()),
        };
        assert!(form.validate().is_ok());

        let form = LinkForm {
            website: Some(" https://example.com ".to_string()),
            email: Some("   ".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_optional_links_reject_malformed_values() {
        let form = LinkForm {
            website: Some("not a url".to_string()),
            email: Some("grace@".to_string()),
        };
        let errors: FieldErrors = form.validate().unwrap_err().into();
        assert_eq!(
            errors.get("website"),
            Some(&["Enter a valid URL.".to_string()][..])
        );
        assert_eq!(
            errors.get("email"),
            Some(&["Enter a valid email address.".to_string()][..])
        );
    }

    #[test]
    fn test_field_errors_serializes_as_map() {
        let errors = FieldErrors::single("email", "taken");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "email": ["taken"] })
        );
    }
}
