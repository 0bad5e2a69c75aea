//! Rendering of reports and similarity matches.
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//! | [`Sarif`](OutputFormat::Sarif)   | [`sarif`]  | CI/CD integration       |
//!
//! [`format_report`] renders a validation or scan [`Report`];
//! [`format_matches`] renders the near-duplicate pairs found by a
//! [`Matcher`](crate::similarity::Matcher).

pub mod json;
pub mod pretty;
pub mod sarif;

use crate::report::Report;
use crate::similarity::{ContentMatch, SimilarityConfig};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text with a summary line.
    #[default]
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for CI/CD tool integration.
    Sarif,
}

/// Formats a [`Report`] in the requested [`OutputFormat`].
///
/// # Examples
///
/// ```
/// use skillsync::output::{format_report, OutputFormat};
/// use skillsync::report::Report;
/// use skillsync::result::ValidationResult;
///
/// let report = Report::new("claude-code -> cursor", ValidationResult::new());
/// let json = format_report(&report, &OutputFormat::Json);
/// assert!(json.contains("\"valid\": true"));
/// ```
pub fn format_report(report: &Report, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report),
        OutputFormat::Sarif => sarif::format(report),
    }
}

/// Formats near-duplicate pairs found under `config`.
///
/// In SARIF each pair is a `skillsync/near-duplicate` note located at the
/// second skill's file.
pub fn format_matches(
    matches: &[ContentMatch],
    config: &SimilarityConfig,
    format: &OutputFormat,
) -> String {
    match format {
        OutputFormat::Pretty => pretty::format_matches(matches, config),
        OutputFormat::Json => json::format_matches(matches, config),
        OutputFormat::Sarif => sarif::format_matches(matches),
    }
}
