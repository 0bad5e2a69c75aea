use std::path::PathBuf;

use crate::detector::{Detection, Severity};
use crate::result::ValidationResult;

/// Overall outcome of a report, derived from its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Warning,
    Failed,
}

/// A detection together with the file it was found in.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LocatedDetection {
    pub file: Option<PathBuf>,
    #[serde(flatten)]
    pub detection: Detection,
}

/// What the CLI renders: a validation result plus context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    /// What was checked, e.g. `claude-code -> cursor` or a file path.
    pub subject: String,
    pub generated_at: String,
    pub status: Status,
    pub result: ValidationResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detections: Vec<LocatedDetection>,
}

impl Report {
    pub fn new(subject: impl Into<String>, result: ValidationResult) -> Self {
        Report {
            subject: subject.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            status: compute_status(&result),
            result,
            detections: Vec::new(),
        }
    }

    pub fn with_detections(mut self, detections: Vec<LocatedDetection>) -> Self {
        self.detections = detections;
        self
    }

    pub fn passed(&self) -> bool {
        self.status != Status::Failed
    }

    /// Error and warning counts of the underlying result.
    pub fn counts(&self) -> (usize, usize) {
        (self.result.errors.len(), self.result.warnings.len())
    }

    /// Detections per severity, `(errors, warnings)`.
    pub fn detection_counts(&self) -> (usize, usize) {
        self.detections
            .iter()
            .fold((0, 0), |(e, w), d| match d.detection.severity {
                Severity::Error => (e + 1, w),
                Severity::Warning => (e, w + 1),
            })
    }
}

fn compute_status(result: &ValidationResult) -> Status {
    if result.has_errors() {
        Status::Failed
    } else if result.has_warnings() {
        Status::Warning
    } else {
        Status::Passed
    }
}
