//! Human-readable colored text formatter.
//!
//! Produces a terminal-friendly report with ANSI color codes: a header, the
//! errors with their field selectors, the warnings, any located detections,
//! and a one-line summary.

use colored::Colorize;

use crate::detector::Severity;
use crate::report::{Report, Status};
use crate::similarity::{ContentMatch, SimilarityConfig};

/// Formats a [`Report`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header**: subject and timestamp.
/// 2. **Errors**: kind, field, and message.
/// 3. **Warnings**
/// 4. **Detections**: file, line, column, and snippet.
/// 5. **Summary**: overall status and counts.
pub fn format(report: &Report) -> String {
    let mut out = String::new();

    // Header
    out.push_str(&format!(
        "\n{}\n",
        format!("  skillsync: {}  ", report.subject)
            .bold()
            .on_blue()
            .white()
    ));
    out.push_str(&format!("  Timestamp: {}\n\n", report.generated_at));

    if !report.result.errors.is_empty() {
        out.push_str(&format!("{}\n", "Errors".bold().underline()));
        for error in &report.result.errors {
            out.push_str(&format!(
                "  [{}] {:<28} {}\n",
                "ERROR".red().bold(),
                error.field.dimmed(),
                error.message,
            ));
            if let Some(ref cause) = error.cause {
                out.push_str(&format!("         {}\n", format!("caused by: {cause}").dimmed()));
            }
        }
        out.push('\n');
    }

    if !report.result.warnings.is_empty() {
        out.push_str(&format!("{}\n", "Warnings".bold().underline()));
        for warning in &report.result.warnings {
            out.push_str(&format!("  [{}] {warning}\n", " WARN".yellow().bold()));
        }
        out.push('\n');
    }

    if !report.detections.is_empty() {
        out.push_str(&format!("{}\n", "Detections".bold().underline()));
        for located in &report.detections {
            let d = &located.detection;
            let severity = match d.severity {
                Severity::Error => "ERROR".red().bold().to_string(),
                Severity::Warning => " WARN".yellow().bold().to_string(),
            };
            let location = match located.file {
                Some(ref f) => format!("{}:{}:{}", f.display(), d.line, d.column),
                None => format!("line {}, column {}", d.line, d.column),
            };
            out.push_str(&format!(
                "  [{severity}] {:<22} {}\n",
                d.pattern.dimmed(),
                d.description
            ));
            out.push_str(&format!("         {}\n", location.dimmed()));
            out.push_str(&format!("         > {}\n", d.snippet.dimmed()));
        }
        out.push('\n');
    }

    let status_str = match report.status {
        Status::Passed => "PASSED".green().bold().to_string(),
        Status::Warning => "WARNING".yellow().bold().to_string(),
        Status::Failed => "FAILED".red().bold().to_string(),
    };
    let (errors, warnings) = report.counts();
    out.push_str(&format!(
        "Result: {status_str}  |  {errors} errors, {warnings} warnings  |  {}\n",
        report.result.summary()
    ));

    out
}

/// Formats near-duplicate pairs in the order the matcher found them. Scores
/// of 90% and above are highlighted.
pub fn format_matches(matches: &[ContentMatch], config: &SimilarityConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Similar Skills".bold().underline()));

    if matches.is_empty() {
        out.push_str(&format!(
            "  No pairs at or above {:.0}%.\n",
            config.threshold * 100.0
        ));
    }

    for m in matches {
        let score = format!("{:>5.1}%", m.score * 100.0);
        let score = if m.score >= 0.9 {
            score.red().bold()
        } else {
            score.yellow()
        };
        out.push_str(&format!(
            "  {score}  {} ({})  <->  {} ({})\n",
            m.skill_a.name.bold(),
            m.skill_a.platform,
            m.skill_b.name.bold(),
            m.skill_b.platform,
        ));
    }

    out.push_str(&format!(
        "\n  Total: {} pair(s), algorithm {}, {} mode\n",
        matches.len(),
        config.algorithm,
        if config.line_mode { "line" } else { "character" }
    ));
    out
}
