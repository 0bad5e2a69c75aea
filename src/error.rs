//! Error types for skillsync.
//!
//! Validation-family functions never return these: they collect findings
//! into a [`ValidationResult`](crate::result::ValidationResult). The enums
//! below are for boundaries that cannot produce a partial result.

use std::path::PathBuf;

use thiserror::Error;

use crate::permissions::{OperationType, PermissionLevel};
use crate::platform::{Platform, Scope};
use crate::result::FieldError;

/// Errors raised while loading or saving the permissions config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid permission level '{0}' (expected read-only, write, or destructive)")]
    InvalidLevel(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither `SKILLSYNC_CONFIG_DIR`, `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("Cannot determine config directory: HOME is not set")]
    NoConfigDir,
}

/// Reasons the permission gate refuses an operation.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Operation '{0}' is disabled by configuration")]
    OperationDisabled(OperationType),

    #[error("Operation '{operation}' requires '{required}' permission, but the configured level is '{current}'")]
    InsufficientLevel {
        operation: OperationType,
        required: PermissionLevel,
        current: PermissionLevel,
    },

    #[error("Writes to the {0} scope are disabled by configuration")]
    ScopeWriteDisabled(Scope),

    #[error("The {0} scope is read-only")]
    ScopeAlwaysReadOnly(Scope),

    #[error("Unknown scope '{0}'")]
    UnknownScope(String),

    #[error("Failed to read confirmation: {0}")]
    ConfirmationIo(#[source] std::io::Error),

    #[error("Operation '{0}' cancelled by user")]
    Cancelled(OperationType),
}

/// Errors raised while resolving platform directories.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Unknown platform '{0}' (expected one of: claude-code, cursor, codex)")]
    UnknownPlatform(String),

    #[error("Unknown scope '{0}' (expected one of: user, repo, system, admin, builtin, plugin)")]
    UnknownScope(String),

    #[error("{platform} has no skills directory for the {scope} scope")]
    UnsupportedScope { platform: Platform, scope: Scope },

    #[error("Cannot resolve user scope: HOME is not set")]
    HomeNotSet,

    #[error("No git repository found above {0}")]
    NotInRepository(PathBuf),

    #[error("Failed to resolve {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading skill files from disk.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Failed to read skill {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// All errors of a failed [`ValidationResult`](crate::result::ValidationResult),
/// collapsed into one value.
#[derive(Debug, Clone, Error)]
#[error("{}", join_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
