use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Course,
    Enrollment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Student => write!(f, "student"),
            EntityKind::Course => write!(f, "course"),
            EntityKind::Enrollment => write!(f, "enrollment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("{entity} with key '{key}' already exists")]
    DuplicateKey { entity: EntityKind, key: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },

    #[error("Student {reg_no} is already enrolled in {course_code}")]
    DuplicateEnrollment { reg_no: String, course_code: String },

    #[error(
        "Credit limit exceeded for {reg_no} in {semester}: {current} + {requested} > {limit}"
    )]
    CreditLimitExceeded {
        reg_no: String,
        semester: String,
        current: u32,
        requested: u32,
        limit: u32,
    },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// An institutional rule rejected the operation.
    Rule,
    /// Malformed input that never reached the core.
    Input,
    Storage,
    Config,
}

impl RecordsError {
    pub fn validation(field: &str, value: &str, reason: impl Into<String>) -> Self {
        RecordsError::Validation {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: EntityKind, key: &str) -> Self {
        RecordsError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RecordsError::DuplicateKey { .. }
            | RecordsError::NotFound { .. }
            | RecordsError::DuplicateEnrollment { .. }
            | RecordsError::CreditLimitExceeded { .. } => ErrorCategory::Rule,
            RecordsError::Validation { .. } => ErrorCategory::Input,
            RecordsError::Io(_) | RecordsError::Csv(_) | RecordsError::Zip(_) => {
                ErrorCategory::Storage
            }
            RecordsError::Config { .. } => ErrorCategory::Config,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RecordsError::DuplicateKey { entity, key } => {
                format!("A {} with key '{}' is already registered.", entity, key)
            }
            RecordsError::NotFound { entity, key } => {
                format!("No {} found for '{}'.", entity, key)
            }
            RecordsError::DuplicateEnrollment { .. } => {
                "Student already enrolled in this course.".to_string()
            }
            RecordsError::CreditLimitExceeded { limit, .. } => {
                format!("Max credit limit of {} exceeded for the semester.", limit)
            }
            RecordsError::Validation { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            RecordsError::Io(e) => format!("File operation failed: {}", e),
            RecordsError::Csv(e) => format!("Could not process CSV data: {}", e),
            RecordsError::Zip(e) => format!("Could not write archive: {}", e),
            RecordsError::Config { message } => format!("Configuration problem: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_errors_are_categorised() {
        let err = RecordsError::DuplicateEnrollment {
            reg_no: "S1".to_string(),
            course_code: "C1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Rule);

        let err = RecordsError::validation("grade", "Z", "unknown grade");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().contains("unknown grade"));
    }

    #[test]
    fn test_not_found_names_entity() {
        let err = RecordsError::not_found(EntityKind::Enrollment, "S1/C1");
        assert_eq!(err.to_string(), "enrollment not found: S1/C1");
    }
}
