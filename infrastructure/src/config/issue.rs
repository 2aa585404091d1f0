//! Structured configuration issues.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field holds a value outside its accepted set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A required string field is empty.
    EmptyValue { field: String },
    /// A numeric field is outside its usable range.
    OutOfRange { field: String, value: u64 },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn invalid_enum(field: &str, value: &str, valid: &[&str], fallback: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: ConfigIssueCode::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                valid_values: valid.iter().map(|v| v.to_string()).collect(),
            },
            message: format!(
                "{}: unknown value '{}', falling back to '{}'",
                field, value, fallback
            ),
        }
    }

    pub(crate) fn empty(field: &str, severity: Severity) -> Self {
        Self {
            severity,
            code: ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            message: format!("{}: must not be empty", field),
        }
    }

    pub(crate) fn out_of_range(field: &str, value: u64, hint: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
                value,
            },
            message: format!("{}: {} is out of range, {}", field, value, hint),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_message() {
        let issue = ConfigIssue::invalid_enum("output.markup", "rtf", &["plain", "html"], "plain");
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(
            issue.to_string(),
            "[warning] output.markup: unknown value 'rtf', falling back to 'plain'"
        );
        assert!(!issue.is_error());
    }

    #[test]
    fn test_empty_can_be_fatal() {
        let issue = ConfigIssue::empty("backend.direct.base_url", Severity::Error);
        assert!(issue.is_error());
        assert_eq!(
            issue.code,
            ConfigIssueCode::EmptyValue {
                field: "backend.direct.base_url".into()
            }
        );
    }
}
