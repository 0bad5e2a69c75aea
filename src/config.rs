//! Permissions configuration.
//!
//! The permissions config is a YAML document stored at
//! `<config-dir>/permissions.yaml` (see
//! [`Environment::config_dir`](crate::platform::Environment::config_dir)).
//! Every key except `default_level` is optional, and a missing file means
//! the built-in defaults apply.
//!
//! ```yaml
//! default_level: destructive
//! operations:
//!   delete: { enabled: true, require_confirmation: true }
//! require_confirmation:
//!   delete: true
//!   overwrite: false
//!   backup_delete: true
//!   promote_with_removal: true
//! scope_permissions:
//!   allow_user_scope: true
//!   allow_repo_scope: true
//!   allow_system_scope: false
//! ```
//!
//! Use [`PermissionsConfig::load`] to read it:
//!
//! ```rust,no_run
//! use skillsync::config::PermissionsConfig;
//! use skillsync::permissions::PermissionLevel;
//!
//! let config = PermissionsConfig::load(None).expect("failed to load config");
//! assert!(config.default_level.allows(PermissionLevel::ReadOnly));
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::permissions::{OperationType, PermissionLevel};
use crate::platform::Environment;
use crate::result::{ErrorKind, ValidationResult};

/// File name of the permissions config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "permissions.yaml";

/// Root of `permissions.yaml`.
///
/// Operation keys are kept as strings so that unknown keys survive loading
/// and can be reported by [`validate`](PermissionsConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PermissionsConfig {
    #[serde(deserialize_with = "deserialize_level")]
    pub default_level: PermissionLevel,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, OperationConfig>,
    #[serde(default)]
    pub require_confirmation: ConfirmationDefaults,
    #[serde(default)]
    pub scope_permissions: ScopePermissions,
}

/// Per-operation override.
///
/// `require_confirmation` is tri-state: `None` defers to
/// [`ConfirmationDefaults`] and the operation's intrinsic default.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_confirmation: Option<bool>,
}

/// Confirmation defaults for the confirmable operations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConfirmationDefaults {
    pub delete: bool,
    /// Off by default: overwrites are preceded by an automatic backup.
    pub overwrite: bool,
    pub backup_delete: bool,
    pub promote_with_removal: bool,
}

/// Which scopes may be written.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScopePermissions {
    pub allow_user_scope: bool,
    pub allow_repo_scope: bool,
    /// Governs both the system and admin scopes.
    pub allow_system_scope: bool,
}

fn default_true() -> bool {
    true
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<PermissionLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl Default for OperationConfig {
    fn default() -> Self {
        OperationConfig {
            enabled: true,
            require_confirmation: None,
        }
    }
}

impl Default for ConfirmationDefaults {
    fn default() -> Self {
        ConfirmationDefaults {
            delete: true,
            overwrite: false,
            backup_delete: true,
            promote_with_removal: true,
        }
    }
}

impl Default for ScopePermissions {
    fn default() -> Self {
        ScopePermissions {
            allow_user_scope: true,
            allow_repo_scope: true,
            allow_system_scope: false,
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        PermissionsConfig {
            default_level: PermissionLevel::Destructive,
            operations: BTreeMap::new(),
            require_confirmation: ConfirmationDefaults::default(),
            scope_permissions: ScopePermissions::default(),
        }
    }
}

impl PermissionsConfig {
    /// Default location of `permissions.yaml` for the live process.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(Environment::from_process()
            .config_dir()?
            .join(CONFIG_FILE_NAME))
    }

    /// Loads the permissions config.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try [`default_path`](Self::default_path).
    /// 3. If that file does not exist either, return the defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] when the explicit path does not exist.
    /// - [`ConfigError::Read`] when the file cannot be read.
    /// - [`ConfigError::Parse`] for malformed YAML or an unknown
    ///   `default_level`.
    pub fn load(path: Option<&Path>) -> Result<PermissionsConfig, ConfigError> {
        let config_path = match path {
            Some(p) if p.exists() => p.to_path_buf(),
            Some(p) => return Err(ConfigError::NotFound(p.to_path_buf())),
            None => {
                let default_path = Self::default_path()?;
                if !default_path.exists() {
                    tracing::debug!(path = %default_path.display(), "no permissions config, using defaults");
                    return Ok(PermissionsConfig::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
            path: config_path.clone(),
            source: e,
        })?;
        Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<PermissionsConfig, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(PermissionsConfig::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the config to `path`, creating the parent directory.
    ///
    /// On Unix the directory is created with mode `0750` and the file is
    /// written with mode `0644`. No locking is performed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self.to_yaml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_config_dir(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        write_config_file(path, yaml.as_bytes()).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), "saved permissions config");
        Ok(())
    }

    /// Checks the config for suspicious or ineffective settings.
    ///
    /// Unknown operation keys, confirmation overrides on disabled operations,
    /// an enabled system scope, and having neither user nor repo scope
    /// writable are all warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        let mut seen: BTreeMap<OperationType, &str> = BTreeMap::new();
        for (key, op) in &self.operations {
            let Some(kind) = OperationType::from_key(key) else {
                result.add_warning(format!(
                    "unknown operation '{key}' in operations (known: read, write, delete, overwrite, backup, backup_delete)"
                ));
                continue;
            };
            if let Some(first) = seen.insert(kind, key.as_str()) {
                result.add_warning(format!(
                    "operations '{first}' and '{key}' both configure '{}'; '{}' takes effect",
                    kind.key(),
                    self.operation_key(kind).unwrap_or(key.as_str()),
                ));
            }
            if !op.enabled && op.require_confirmation.is_some() {
                result.add_warning(format!(
                    "operation '{key}' is disabled but sets require_confirmation; the override has no effect"
                ));
            }
        }

        if self.scope_permissions.allow_system_scope {
            result.add_warning(
                "allow_system_scope is enabled: writes to system and admin skill directories are permitted",
            );
        }

        if !self.scope_permissions.allow_user_scope && !self.scope_permissions.allow_repo_scope {
            result.add_warning(
                "neither user nor repo scope is writable: sync operations will be refused",
            );
        }

        result
    }

    /// Validates a raw YAML document, reporting parse failures (including an
    /// unknown `default_level`) as a `config-invalid` error.
    pub fn validate_yaml(content: &str) -> ValidationResult {
        match Self::from_yaml(content) {
            Ok(config) => config.validate(),
            Err(e) => {
                let mut result = ValidationResult::new();
                let field = if e.to_string().contains("default_level") {
                    "default_level"
                } else {
                    "config"
                };
                result.add_error_with_cause(
                    field,
                    ErrorKind::ConfigInvalid,
                    "permissions config is invalid",
                    &e,
                );
                result
            }
        }
    }

    /// The per-operation override for `op`, if configured.
    ///
    /// Keys match the way [`OperationType::from_key`] parses them, so
    /// `backup-delete` and `Delete` configure `backup_delete` and `delete`.
    /// The canonical spelling wins when several keys name the same operation.
    pub fn operation(&self, op: OperationType) -> Option<&OperationConfig> {
        self.operation_key(op).and_then(|key| self.operations.get(key))
    }

    fn operation_key(&self, op: OperationType) -> Option<&str> {
        if self.operations.contains_key(op.key()) {
            return Some(op.key());
        }
        self.operations
            .keys()
            .find(|key| OperationType::from_key(key) == Some(op))
            .map(String::as_str)
    }

    /// Sets the override for `op`.
    pub fn set_operation(&mut self, op: OperationType, config: OperationConfig) {
        self.operations.insert(op.key().to_string(), config);
    }
}

#[cfg(unix)]
fn create_config_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o750)
        .create(dir)
}

#[cfg(not(unix))]
fn create_config_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

#[cfg(unix)]
fn write_config_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)?;
    file.write_all(bytes)
}

#[cfg(not(unix))]
fn write_config_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}
