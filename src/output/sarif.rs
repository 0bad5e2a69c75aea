//! SARIF 2.1.0 formatter.
//!
//! Errors become results whose rule id is their [`ErrorKind`](crate::result::ErrorKind)
//! (`skillsync/<kind>`). When the report carries located detections, they
//! become `secrets/<pattern>` results with a physical location in place of
//! the result's detector errors and warnings. Every other warning is
//! reported under `skillsync/warning`.
//!
//! Similarity matches become `skillsync/near-duplicate` notes.

use std::collections::{BTreeMap, HashSet};

use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation, Region,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};

use crate::detector::Severity;
use crate::report::Report;
use crate::result::ErrorKind;
use crate::similarity::ContentMatch;

#[derive(Clone, Copy)]
enum Level {
    Error,
    Warning,
    Note,
}

struct Entry {
    rule_id: String,
    level: Level,
    message: String,
    location: Option<(String, usize, usize)>,
}

pub fn format(report: &Report) -> String {
    let has_detections = !report.detections.is_empty();
    let mut entries = Vec::new();

    for error in &report.result.errors {
        // Located detections replace their location-less result errors.
        if has_detections && error.kind == ErrorKind::SensitiveContent {
            continue;
        }
        entries.push(Entry {
            rule_id: format!("skillsync/{}", error.kind),
            level: Level::Error,
            message: format!("{}: {}", error.field, error.message),
            location: None,
        });
    }

    let mut located_warnings = HashSet::new();
    if has_detections {
        for located in &report.detections {
            let d = &located.detection;
            if d.severity == Severity::Warning {
                located_warnings.insert(d.message());
            }
            entries.push(Entry {
                rule_id: rule_id_for_pattern(&d.pattern),
                level: match d.severity {
                    Severity::Error => Level::Error,
                    Severity::Warning => Level::Warning,
                },
                message: d.message(),
                location: located
                    .file
                    .as_ref()
                    .map(|f| (f.to_string_lossy().replace('\\', "/"), d.line, d.column)),
            });
        }
    }

    for warning in &report.result.warnings {
        if located_warnings.contains(warning) {
            continue;
        }
        entries.push(Entry {
            rule_id: "skillsync/warning".to_string(),
            level: Level::Warning,
            message: warning.clone(),
            location: None,
        });
    }

    render(&entries)
}

/// One note per pair, located at the second skill's file.
pub fn format_matches(matches: &[ContentMatch]) -> String {
    let entries: Vec<Entry> = matches
        .iter()
        .map(|m| Entry {
            rule_id: "skillsync/near-duplicate".to_string(),
            level: Level::Note,
            message: format!(
                "skill '{}' ({}) is {:.0}% similar to '{}' ({})",
                m.skill_b.name,
                m.skill_b.platform,
                m.score * 100.0,
                m.skill_a.name,
                m.skill_a.platform
            ),
            location: Some((m.skill_b.path.to_string_lossy().replace('\\', "/"), 1, 1)),
        })
        .collect();
    render(&entries)
}

fn render(entries: &[Entry]) -> String {
    // Unique rules, sorted by id.
    let mut rule_descriptions: BTreeMap<String, String> = BTreeMap::new();
    for entry in entries {
        rule_descriptions
            .entry(entry.rule_id.clone())
            .or_insert_with(|| entry.message.clone());
    }
    let rule_index: BTreeMap<&str, i64> = rule_descriptions
        .keys()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i as i64))
        .collect();

    let rules: Vec<ReportingDescriptor> = rule_descriptions
        .iter()
        .map(|(id, description)| {
            let mut rule = ReportingDescriptor::builder().id(id.clone()).build();
            rule.short_description = Some(
                MultiformatMessageString::builder()
                    .text(description.clone())
                    .build(),
            );
            rule
        })
        .collect();

    let results: Vec<SarifResult> = entries
        .iter()
        .map(|entry| {
            let mut result = SarifResult::builder()
                .message(Message::builder().text(entry.message.clone()).build())
                .build();

            result.rule_id = Some(entry.rule_id.clone());
            result.level = Some(match entry.level {
                Level::Error => ResultLevel::Error,
                Level::Warning => ResultLevel::Warning,
                Level::Note => ResultLevel::Note,
            });
            result.rule_index = rule_index.get(entry.rule_id.as_str()).copied();

            if let Some((ref uri, line, column)) = entry.location {
                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();
                physical.artifact_location =
                    Some(ArtifactLocation::builder().uri(uri.clone()).build());
                let mut region = Region::builder().start_line(line as i64).build();
                region.start_column = Some(column as i64);
                physical.region = Some(region);
                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("skillsync")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed")
}

/// `"AWS Access Key"` → `"secrets/aws-access-key"`.
fn rule_id_for_pattern(pattern: &str) -> String {
    let slug: String = pattern
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("secrets/{slug}")
}
