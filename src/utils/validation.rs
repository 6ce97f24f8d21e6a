use crate::domain::model::SubmissionRequest;
use crate::utils::error::{IntakeError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Basic `local@domain.tld` shape check. Whitespace anywhere fails.
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Returns the trimmed value when it is non-empty.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the trimmed `(name, email, message)` or every field that is missing.
pub fn validate_required_fields(request: &SubmissionRequest) -> Result<(&str, &str, &str)> {
    let name = non_blank(request.name.as_deref());
    let email = non_blank(request.email.as_deref());
    let message = non_blank(request.message.as_deref());

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Ok((name, email, message)),
        _ => {
            let fields = [("name", name), ("email", email), ("message", message)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(field, _)| field)
                .collect();
            Err(IntakeError::MissingFields { fields })
        }
    }
}

pub fn validate_submission_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(IntakeError::InvalidEmail {
            email: email.to_string(),
        })
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| IntakeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email_address(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if !is_valid_email(value) {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a valid email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_table_name(field_name: &str, table_name: &str) -> Result<()> {
    if table_name.len() < 3 || table_name.len() > 255 {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: table_name.to_string(),
            reason: "Table name must be between 3 and 255 characters".to_string(),
        });
    }

    if !table_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: table_name.to_string(),
            reason: "Table name can only contain letters, numbers, underscores, hyphens, and dots"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, message: Option<&str>) -> SubmissionRequest {
        SubmissionRequest {
            name: name.map(String::from),
            email: email.map(String::from),
            message: message.map(String::from),
            phone: None,
            destination: None,
        }
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana maria@example.com"));
        assert!(!is_valid_email("ana@@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_required_fields_lists_missing() {
        let valid = request(Some(" Ana "), Some("a@b.co"), Some("Hi\n"));
        assert_eq!(validate_required_fields(&valid).unwrap(), ("Ana", "a@b.co", "Hi"));

        match validate_required_fields(&request(None, Some("a@b.co"), Some("   "))) {
            Err(IntakeError::MissingFields { fields }) => assert_eq!(fields, vec!["name", "message"]),
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Lisbon ")), Some("Lisbon"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("table_name", "contact-form-submissions").is_ok());
        assert!(validate_table_name("table_name", "ab").is_err());
        assert!(validate_table_name("table_name", "bad table").is_err());
    }

    #[test]
    fn test_validate_email_address() {
        assert!(validate_email_address("sender_address", "noreply@travelease.com").is_ok());
        assert!(validate_email_address("sender_address", "  ").is_err());
        assert!(validate_email_address("sender_address", "noreply").is_err());
    }
}
