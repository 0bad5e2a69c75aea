//! The default sensitive-pattern catalogue.

use regex::Regex;
use std::sync::LazyLock;

use crate::detector::{Pattern, Severity};

// Separator between a label and its value: optional spaces, `:` or `=`,
// optional spaces, optional opening quote.
const SEP: &str = r#"\s*[:=]\s*["']?"#;

static RE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(api[_-]?key|apikey){SEP}[a-z0-9_\-]{{16,}}")).unwrap()
});

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(token|access[_-]?token|auth[_-]?token){SEP}[a-z0-9_.\-]{{16,}}"
    ))
    .unwrap()
});

static RE_PASSWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(password|passwd|pwd){SEP}[a-z0-9_\-@!#$%^&*()]{{8,}}"
    ))
    .unwrap()
});

// The key id itself is case-sensitive: AKIA followed by 16 uppercase
// alphanumerics and nothing more.
static RE_AWS_ACCESS_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)aws[_-]?[a-z_\-]*key[a-z_\-]*{SEP}(?-i:AKIA[A-Z0-9]{{16}})(?:[^A-Za-z0-9]|$)"
    ))
    .unwrap()
});

static RE_AWS_SECRET_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)aws[_-]?secret[a-z_\-]*{SEP}(?-i:[A-Za-z0-9/+]{{40}})(?:[^A-Za-z0-9/+]|$)"
    ))
    .unwrap()
});

static RE_GITHUB_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(github[_-]?token|gh[_-]?token){SEP}(?-i:ghp_[A-Za-z0-9]{{36,}})"
    ))
    .unwrap()
});

static RE_PRIVATE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-----BEGIN (RSA )?PRIVATE KEY-----").unwrap());

static RE_GENERIC_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)secret([_-]?key)?{SEP}[a-z0-9_\-]{{16,}}")).unwrap()
});

static RE_BEARER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bearer [a-z0-9_.\-]{20,}").unwrap());

static RE_DB_CONNECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(postgres|postgresql|mysql|mongodb|redis)://[^:/\s@]+:[^@\s]+@").unwrap()
});

struct CatalogueEntry {
    name: &'static str,
    regex: &'static LazyLock<Regex>,
    description: &'static str,
    severity: Severity,
}

static CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        name: "API Key",
        regex: &RE_API_KEY,
        description: "Possible API key",
        severity: Severity::Warning,
    },
    CatalogueEntry {
        name: "Token",
        regex: &RE_TOKEN,
        description: "Possible access token",
        severity: Severity::Warning,
    },
    CatalogueEntry {
        name: "Password",
        regex: &RE_PASSWORD,
        description: "Possible hardcoded password",
        severity: Severity::Warning,
    },
    CatalogueEntry {
        name: "AWS Access Key",
        regex: &RE_AWS_ACCESS_KEY,
        description: "AWS access key ID",
        severity: Severity::Error,
    },
    CatalogueEntry {
        name: "AWS Secret Key",
        regex: &RE_AWS_SECRET_KEY,
        description: "AWS secret access key",
        severity: Severity::Error,
    },
    CatalogueEntry {
        name: "GitHub Token",
        regex: &RE_GITHUB_TOKEN,
        description: "GitHub personal access token",
        severity: Severity::Error,
    },
    CatalogueEntry {
        name: "Private Key",
        regex: &RE_PRIVATE_KEY,
        description: "Private key block",
        severity: Severity::Error,
    },
    CatalogueEntry {
        name: "Generic Secret",
        regex: &RE_GENERIC_SECRET,
        description: "Possible secret value",
        severity: Severity::Warning,
    },
    CatalogueEntry {
        name: "Bearer Token",
        regex: &RE_BEARER_TOKEN,
        description: "Possible bearer token",
        severity: Severity::Warning,
    },
    CatalogueEntry {
        name: "DB Connection String",
        regex: &RE_DB_CONNECTION,
        description: "Database connection string with embedded credentials",
        severity: Severity::Error,
    },
];

/// The ten built-in patterns, in catalogue order.
///
/// ```
/// use skillsync::detector::default_patterns;
///
/// let names: Vec<_> = default_patterns().into_iter().map(|p| p.name).collect();
/// assert_eq!(names.first().map(String::as_str), Some("API Key"));
/// assert_eq!(names.len(), 10);
/// ```
pub fn default_patterns() -> Vec<Pattern> {
    CATALOGUE
        .iter()
        .map(|entry| Pattern {
            name: entry.name.to_string(),
            regex: Regex::clone(entry.regex),
            description: entry.description.to_string(),
            severity: entry.severity,
        })
        .collect()
}
