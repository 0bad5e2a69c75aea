//! The shared validation carrier.
//!
//! Every analysis in the crate (the [`validation`](crate::validation)
//! pipeline, the [`detector`](crate::detector), and
//! [`PermissionsConfig::validate`](crate::config::PermissionsConfig::validate))
//! reports through a [`ValidationResult`]. Errors are structured
//! ([`FieldError`]) so callers can correlate them with an input; warnings are
//! plain strings and never affect validity.
//!
//! ```
//! use skillsync::result::{ErrorKind, ValidationResult};
//!
//! let mut result = ValidationResult::new();
//! result.add_warning("path not accessible");
//! assert!(result.is_valid());
//!
//! result.add_error("skills[0].name", ErrorKind::EmptyName, "skill name is empty");
//! assert!(!result.is_valid());
//! assert_eq!(result.summary(), "Validation failed (1 warning(s))");
//! ```

use std::fmt;

use crate::error::ValidationError;

/// Category of a collected error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    EmptyName,
    EmptyPath,
    BadExtension,
    DuplicateName,
    EmptyContentStrict,
    PathNotAccessible,
    PathMissing,
    PathNotDirectory,
    PathUnreadable,
    WritePermissionDenied,
    PlatformUnresolved,
    SensitiveContent,
    ConfigInvalid,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyName => "empty-name",
            ErrorKind::EmptyPath => "empty-path",
            ErrorKind::BadExtension => "bad-extension",
            ErrorKind::DuplicateName => "duplicate-name",
            ErrorKind::EmptyContentStrict => "empty-content-strict",
            ErrorKind::PathNotAccessible => "path-not-accessible",
            ErrorKind::PathMissing => "path-missing",
            ErrorKind::PathNotDirectory => "path-not-directory",
            ErrorKind::PathUnreadable => "path-unreadable",
            ErrorKind::WritePermissionDenied => "write-permission-denied",
            ErrorKind::PlatformUnresolved => "platform-unresolved",
            ErrorKind::SensitiveContent => "sensitive-content",
            ErrorKind::ConfigInvalid => "config-invalid",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single error tied to an input by a dotted field selector such as
/// `skills[0].name` or `skill:<name>:content`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
    /// Rendered underlying cause, if the error wraps one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}

/// Aggregated outcome of a validation run.
///
/// Validity is derived: a result is valid exactly when it carries no errors.
/// The type is a plain value; clone it freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_error(
        &mut self,
        field: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            kind,
            message: message.into(),
            cause: None,
        });
    }

    /// Records an error caused by another error; the cause is rendered to text
    /// so the result stays cloneable.
    pub fn add_error_with_cause(
        &mut self,
        field: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
        cause: &dyn std::error::Error,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            kind,
            message: message.into(),
            cause: Some(cause.to_string()),
        });
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Appends `other`'s errors and warnings after this result's own.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Collapses all errors into one [`ValidationError`], or `None` when valid.
    pub fn to_error(&self) -> Option<ValidationError> {
        if self.errors.is_empty() {
            return None;
        }
        Some(ValidationError {
            errors: self.errors.clone(),
        })
    }

    pub fn summary(&self) -> String {
        if self.has_errors() {
            format!("Validation failed ({} warning(s))", self.warnings.len())
        } else if self.has_warnings() {
            format!(
                "Validation passed with warnings ({} warning(s))",
                self.warnings.len()
            )
        } else {
            "All validations passed".to_string()
        }
    }
}

impl serde::Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}
