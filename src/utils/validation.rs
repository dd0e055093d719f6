use crate::utils::error::{RecordsError, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.[A-Za-z]+$").expect("email pattern compiles"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(RecordsError::validation(
            field_name,
            email,
            "expected an address like name@example.edu",
        ))
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RecordsError::validation(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(RecordsError::validation(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(RecordsError::validation(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecordsError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(is_valid_email("jane.doe@uni.edu"));
        assert!(is_valid_email("j-doe_1@mail.cs.uni.org"));
        assert!(!is_valid_email("jane.doe"));
        assert!(!is_valid_email("jane@uni"));
        assert!(!is_valid_email("jane@uni.c0m"));
        assert!(!is_valid_email("jane doe@uni.edu"));
        assert!(validate_email("email", "").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("credits", 3, 1).is_ok());
        assert!(validate_positive_number("credits", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("paths.data_dir", "data").is_ok());
        assert!(validate_path("paths.data_dir", "").is_err());
        assert!(validate_path("paths.data_dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("title", "Algorithms").is_ok());
        assert!(validate_non_empty_string("title", "   ").is_err());
    }
}
