//! Sensitive-data detection for skill content.
//!
//! A [`Detector`] holds an ordered list of [`Pattern`]s and scans text line
//! by line. Each line first goes through the false-positive filter
//! ([`is_false_positive`]); surviving lines are tested against every pattern
//! in catalogue order. Matches become [`Detection`]s, and detections become
//! entries in a [`ValidationResult`]: `error` patterns add errors,
//! `warning` patterns add warnings.
//!
//! # Default catalogue
//!
//! | Name | Severity |
//! |------|----------|
//! | API Key | warning |
//! | Token | warning |
//! | Password | warning |
//! | AWS Access Key | error |
//! | AWS Secret Key | error |
//! | GitHub Token | error |
//! | Private Key | error |
//! | Generic Secret | warning |
//! | Bearer Token | warning |
//! | DB Connection String | error |
//!
//! A detector is immutable after construction and can be shared across
//! threads; [`Detector::scan_skills`] scans many skills in parallel.

mod filter;
mod patterns;

pub use filter::is_false_positive;
pub use patterns::default_patterns;

use std::fmt;

use rayon::prelude::*;
use regex::Regex;

use crate::result::{ErrorKind, ValidationResult};
use crate::skill::Skill;

/// Longest snippet kept from a matching line, ellipsis included.
pub const MAX_SNIPPET_CHARS: usize = 80;

/// Field name detector errors are recorded under.
const CONTENT_FIELD: &str = "content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
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

/// A named, severity-tagged regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: String,
    pub regex: Regex,
    pub description: String,
    pub severity: Severity,
}

impl Pattern {
    /// Compiles `regex` into a pattern.
    pub fn new(
        name: impl Into<String>,
        regex: &str,
        description: impl Into<String>,
        severity: Severity,
    ) -> Result<Pattern, regex::Error> {
        Ok(Pattern {
            name: name.into(),
            regex: Regex::new(regex)?,
            description: description.into(),
            severity,
        })
    }
}

/// One occurrence of a sensitive pattern. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Detection {
    pub pattern: String,
    pub line: usize,
    pub column: usize,
    pub snippet: String,
    pub severity: Severity,
    pub description: String,
}

impl Detection {
    /// `"<description> at line <N>: <snippet>"`.
    pub fn message(&self) -> String {
        format!(
            "{} at line {}: {}",
            self.description, self.line, self.snippet
        )
    }
}

#[derive(Debug, Clone)]
pub struct Detector {
    patterns: Vec<Pattern>,
}

impl Default for Detector {
    fn default() -> Self {
        Detector {
            patterns: default_patterns(),
        }
    }
}

impl Detector {
    /// A detector over `patterns`, or over the default catalogue when
    /// `patterns` is empty.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        if patterns.is_empty() {
            Detector::default()
        } else {
            Detector { patterns }
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Every detection in `content`, ordered by line, then catalogue order.
    pub fn detect(&self, content: &str) -> Vec<Detection> {
        let mut detections = Vec::new();

        for (idx, line) in content.split('\n').enumerate() {
            if is_false_positive(line) {
                continue;
            }

            for pattern in &self.patterns {
                let Some(m) = pattern.regex.find(line) else {
                    continue;
                };
                detections.push(Detection {
                    pattern: pattern.name.clone(),
                    line: idx + 1,
                    column: line[..m.start()].chars().count() + 1,
                    snippet: snippet(line),
                    severity: pattern.severity,
                    description: pattern.description.clone(),
                });
            }
        }

        detections
    }

    /// Scans `content` and records detections in a [`ValidationResult`].
    ///
    /// ```
    /// use skillsync::detector::Detector;
    ///
    /// let detector = Detector::default();
    /// let result = detector.scan("intro\n\napi_key: sk_test_1234567890123456");
    /// assert!(result.is_valid());
    /// assert!(result.warnings[0].contains("API key at line 3"));
    /// ```
    pub fn scan(&self, content: &str) -> ValidationResult {
        result_from(&self.detect(content))
    }

    /// Scans a skill's content; error fields become
    /// `skill:<name>:<field>`.
    pub fn scan_skill(&self, skill: &Skill) -> ValidationResult {
        self.scan_named(&skill.name, &skill.content)
    }

    /// Scans `content` under a display name; error fields become
    /// `skill:<name>:<field>`.
    pub fn scan_named(&self, name: &str, content: &str) -> ValidationResult {
        named_result(name, &self.detect(content))
    }

    /// Scans many skills in parallel and merges the results in input order.
    pub fn scan_skills(&self, skills: &[Skill]) -> ValidationResult {
        let results: Vec<ValidationResult> =
            skills.par_iter().map(|s| self.scan_skill(s)).collect();

        results
            .into_iter()
            .fold(ValidationResult::new(), |mut acc, r| {
                acc.merge(r);
                acc
            })
    }
}

/// Scans `content` with the default catalogue.
pub fn scan(content: &str) -> ValidationResult {
    Detector::default().scan(content)
}

/// Scans a skill with the default catalogue.
pub fn scan_skill(skill: &Skill) -> ValidationResult {
    Detector::default().scan_skill(skill)
}

/// Builds the result [`Detector::scan_named`] would return from detections
/// already in hand.
pub fn named_result(name: &str, detections: &[Detection]) -> ValidationResult {
    let mut result = result_from(detections);
    for error in &mut result.errors {
        error.field = format!("skill:{name}:{}", error.field);
    }
    result
}

fn result_from(detections: &[Detection]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for detection in detections {
        match detection.severity {
            Severity::Error => result.add_error(
                CONTENT_FIELD,
                ErrorKind::SensitiveContent,
                detection.message(),
            ),
            Severity::Warning => result.add_warning(detection.message()),
        }
    }
    result
}

/// Trimmed line, cut to [`MAX_SNIPPET_CHARS`] characters with a `...` tail.
fn snippet(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= MAX_SNIPPET_CHARS {
        return trimmed.to_string();
    }

    // Cut on a char boundary; byte slicing could split a multi-byte char.
    let cut = trimmed
        .char_indices()
        .nth(MAX_SNIPPET_CHARS - 3)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    format!("{}...", &trimmed[..cut])
}
