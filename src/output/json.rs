//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document with the report subject, status,
//! a count summary, the validation result, and any located detections.

use std::path::Path;

use crate::platform::Platform;
use crate::report::{LocatedDetection, Report, Status};
use crate::result::ValidationResult;
use crate::similarity::{Algorithm, ContentMatch, SimilarityConfig};
use crate::skill::Skill;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    subject: &'a str,
    generated_at: &'a str,
    status: Status,
    passed: bool,
    summary: Summary,
    result: &'a ValidationResult,
    detections: &'a [LocatedDetection],
}

#[derive(serde::Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    message: String,
}

/// Formats a [`Report`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &Report) -> String {
    let (errors, warnings) = report.counts();
    let output = JsonOutput {
        subject: &report.subject,
        generated_at: &report.generated_at,
        status: report.status,
        passed: report.passed(),
        summary: Summary {
            errors,
            warnings,
            message: report.result.summary(),
        },
        result: &report.result,
        detections: &report.detections,
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}

#[derive(serde::Serialize)]
struct MatchesOutput<'a> {
    threshold: f64,
    algorithm: Algorithm,
    line_mode: bool,
    pairs: Vec<Pair<'a>>,
}

#[derive(serde::Serialize)]
struct Pair<'a> {
    a: SkillRef<'a>,
    b: SkillRef<'a>,
    score: f64,
}

#[derive(serde::Serialize)]
struct SkillRef<'a> {
    name: &'a str,
    platform: Platform,
    path: &'a Path,
}

fn skill_ref(skill: &Skill) -> SkillRef<'_> {
    SkillRef {
        name: &skill.name,
        platform: skill.platform,
        path: &skill.path,
    }
}

/// Formats near-duplicate pairs as pretty-printed JSON. Skill content is
/// left out; each side is identified by name, platform, and path.
pub fn format_matches(matches: &[ContentMatch], config: &SimilarityConfig) -> String {
    let output = MatchesOutput {
        threshold: config.threshold,
        algorithm: config.algorithm,
        line_mode: config.line_mode,
        pairs: matches
            .iter()
            .map(|m| Pair {
                a: skill_ref(&m.skill_a),
                b: skill_ref(&m.skill_b),
                score: m.score,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
