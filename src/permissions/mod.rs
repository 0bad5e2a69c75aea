//! Permission levels, operation types, and the permission gate.
//!
//! Every filesystem-mutating operation passes through a [`Checker`] built
//! from a [`PermissionsConfig`](crate::config::PermissionsConfig):
//!
//! 1. [`Checker::check_operation`]: is the operation enabled, and does the
//!    configured [`PermissionLevel`] allow it?
//! 2. [`Checker::check_scope`]: may the target [`Scope`](crate::platform::Scope)
//!    be written?
//! 3. [`Checker::request_confirmation`]: does the user agree?
//!
//! [`Checker::check_and_confirm`] and [`Checker::authorize`] compose them.

mod checker;
mod prompt;

pub use checker::Checker;
pub use prompt::render_prompt;

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Coarse permission tier. Ordered: `ReadOnly < Write < Destructive`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionLevel {
    ReadOnly,
    Write,
    Destructive,
}

impl PermissionLevel {
    pub fn value(&self) -> u8 {
        match self {
            PermissionLevel::ReadOnly => 1,
            PermissionLevel::Write => 2,
            PermissionLevel::Destructive => 3,
        }
    }

    /// Returns `true` if this level is at least `required`.
    ///
    /// ```
    /// use skillsync::permissions::PermissionLevel;
    ///
    /// assert!(PermissionLevel::Destructive.allows(PermissionLevel::Write));
    /// assert!(!PermissionLevel::ReadOnly.allows(PermissionLevel::Write));
    /// ```
    pub fn allows(&self, required: PermissionLevel) -> bool {
        self.value() >= required.value()
    }

    pub fn name(&self) -> &'static str {
        match self {
            PermissionLevel::ReadOnly => "read-only",
            PermissionLevel::Write => "write",
            PermissionLevel::Destructive => "destructive",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PermissionLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read-only" | "readonly" | "read_only" => Ok(PermissionLevel::ReadOnly),
            "write" => Ok(PermissionLevel::Write),
            "destructive" => Ok(PermissionLevel::Destructive),
            _ => Err(ConfigError::InvalidLevel(s.to_string())),
        }
    }
}

/// The verbs skillsync may perform on skill files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Read,
    Write,
    Delete,
    Overwrite,
    Backup,
    BackupDelete,
}

impl OperationType {
    pub const ALL: [OperationType; 6] = [
        OperationType::Read,
        OperationType::Write,
        OperationType::Delete,
        OperationType::Overwrite,
        OperationType::Backup,
        OperationType::BackupDelete,
    ];

    /// Key used in the `operations` map of `permissions.yaml`.
    pub fn key(&self) -> &'static str {
        match self {
            OperationType::Read => "read",
            OperationType::Write => "write",
            OperationType::Delete => "delete",
            OperationType::Overwrite => "overwrite",
            OperationType::Backup => "backup",
            OperationType::BackupDelete => "backup_delete",
        }
    }

    pub fn from_key(key: &str) -> Option<OperationType> {
        let normalized = key.trim().to_lowercase().replace('-', "_");
        OperationType::ALL
            .into_iter()
            .find(|op| op.key() == normalized)
    }

    pub fn required_level(&self) -> PermissionLevel {
        match self {
            OperationType::Read => PermissionLevel::ReadOnly,
            OperationType::Write | OperationType::Backup => PermissionLevel::Write,
            OperationType::Delete | OperationType::Overwrite | OperationType::BackupDelete => {
                PermissionLevel::Destructive
            }
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.required_level() == PermissionLevel::Destructive
    }

    /// Intrinsic confirmation default, before any configuration applies.
    pub fn requires_confirmation(&self) -> bool {
        matches!(
            self,
            OperationType::Delete | OperationType::Overwrite | OperationType::BackupDelete
        )
    }

    /// Returns `true` for operations that change the filesystem.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, OperationType::Read)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
