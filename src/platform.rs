//! Platform and scope taxonomy.
//!
//! A [`Platform`] is one assistant's convention for where skill files live
//! and which extensions it accepts. A [`Scope`] is the filesystem sphere a
//! skill belongs to. Path resolution goes through an [`Environment`]: a
//! snapshot of `HOME`, the working directory, and every `SKILLSYNC_*`
//! variable, so resolution is deterministic and testable.
//!
//! # Resolution order
//!
//! 1. `SKILLSYNC_<PLATFORM>_PATH`, if set and non-empty, verbatim.
//! 2. [`Scope::User`]: `$HOME/.<dir>/skills`.
//! 3. [`Scope::Repo`]: `<repo>/.<dir>/skills`, where `<repo>` is the nearest
//!    ancestor of the working directory containing `.git` (symlinks resolved).
//! 4. Any other scope is an error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, PlatformError};

/// A supported assistant platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    ClaudeCode,
    Cursor,
    Codex,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::ClaudeCode, Platform::Cursor, Platform::Codex];

    /// Canonical lowercase name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::ClaudeCode => "claude-code",
            Platform::Cursor => "cursor",
            Platform::Codex => "codex",
        }
    }

    /// Name of the platform's dot-directory (`.claude`, `.cursor`, `.codex`).
    pub fn dir_name(&self) -> &'static str {
        match self {
            Platform::ClaudeCode => ".claude",
            Platform::Cursor => ".cursor",
            Platform::Codex => ".codex",
        }
    }

    /// Accepted file extensions, each with its leading dot. An empty entry
    /// means extensionless files are accepted.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Platform::ClaudeCode => &[".md", ".txt", ""],
            Platform::Cursor => &[".md", ".mdc"],
            Platform::Codex => &[".json"],
        }
    }

    /// Returns `true` if `ext` (with leading dot, or empty) is acceptable.
    ///
    /// An empty extension is always accepted.
    ///
    /// ```
    /// use skillsync::platform::Platform;
    ///
    /// assert!(Platform::Cursor.accepts_extension(".mdc"));
    /// assert!(Platform::Cursor.accepts_extension(""));
    /// assert!(!Platform::Codex.accepts_extension(".md"));
    /// ```
    pub fn accepts_extension(&self, ext: &str) -> bool {
        ext.is_empty()
            || self
                .allowed_extensions()
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    /// Environment variable that overrides this platform's skills directory.
    pub fn env_var(&self) -> String {
        let sanitized: String = self
            .name()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("SKILLSYNC_{sanitized}_PATH")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "claude-code" | "claude" | "claudecode" => Ok(Platform::ClaudeCode),
            "cursor" => Ok(Platform::Cursor),
            "codex" => Ok(Platform::Codex),
            _ => Err(PlatformError::UnknownPlatform(s.to_string())),
        }
    }
}

/// The filesystem sphere a skill belongs to.
///
/// [`User`](Scope::User) and [`Repo`](Scope::Repo) are the normal writable
/// scopes. [`System`](Scope::System) and [`Admin`](Scope::Admin) are disabled
/// by default. [`Builtin`](Scope::Builtin) and [`Plugin`](Scope::Plugin) are
/// never writable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    User,
    Repo,
    System,
    Admin,
    Builtin,
    Plugin,
}

impl Scope {
    pub fn name(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::Repo => "repo",
            Scope::System => "system",
            Scope::Admin => "admin",
            Scope::Builtin => "builtin",
            Scope::Plugin => "plugin",
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Scope::Builtin | Scope::Plugin)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scope {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Scope::User),
            "repo" => Ok(Scope::Repo),
            "system" => Ok(Scope::System),
            "admin" => Ok(Scope::Admin),
            "builtin" => Ok(Scope::Builtin),
            "plugin" => Ok(Scope::Plugin),
            _ => Err(PlatformError::UnknownScope(s.to_string())),
        }
    }
}

/// Snapshot of the process environment relevant to path resolution.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// An empty environment: no HOME, no working directory, no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures `HOME`, `XDG_CONFIG_HOME`, every `SKILLSYNC_*` variable, and
    /// the current working directory.
    pub fn from_process() -> Self {
        let vars = std::env::vars()
            .filter(|(k, _)| k.starts_with("SKILLSYNC_") || k == "XDG_CONFIG_HOME")
            .collect();
        Environment {
            home: std::env::var_os("HOME")
                .filter(|h| !h.is_empty())
                .map(PathBuf::from),
            cwd: std::env::current_dir().ok(),
            vars,
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Returns a variable's value, treating empty values as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The platform's user-scope skills directory.
    pub fn platform_path(&self, platform: Platform) -> Result<PathBuf, PlatformError> {
        self.platform_path_for_scope(platform, Scope::User)
    }

    /// The platform's skills directory for `scope`.
    ///
    /// ```
    /// use skillsync::platform::{Environment, Platform, Scope};
    ///
    /// let env = Environment::new().with_home("/home/dev");
    /// let path = env.platform_path_for_scope(Platform::ClaudeCode, Scope::User).unwrap();
    /// assert_eq!(path, std::path::PathBuf::from("/home/dev/.claude/skills"));
    ///
    /// let env = env.with_var("SKILLSYNC_CLAUDE_CODE_PATH", "/opt/skills");
    /// let path = env.platform_path(Platform::ClaudeCode).unwrap();
    /// assert_eq!(path, std::path::PathBuf::from("/opt/skills"));
    /// ```
    pub fn platform_path_for_scope(
        &self,
        platform: Platform,
        scope: Scope,
    ) -> Result<PathBuf, PlatformError> {
        if let Some(overridden) = self.var(&platform.env_var()) {
            tracing::debug!(%platform, path = overridden, "using environment override");
            return Ok(PathBuf::from(overridden));
        }

        match scope {
            Scope::User => {
                let home = self.home.as_ref().ok_or(PlatformError::HomeNotSet)?;
                Ok(home.join(platform.dir_name()).join("skills"))
            }
            Scope::Repo => {
                let cwd = match self.cwd {
                    Some(ref cwd) => cwd.clone(),
                    None => std::env::current_dir().map_err(|e| PlatformError::Io {
                        path: PathBuf::from("."),
                        source: e,
                    })?,
                };
                let root = find_repo_root(&cwd)?;
                Ok(root.join(platform.dir_name()).join("skills"))
            }
            other => Err(PlatformError::UnsupportedScope {
                platform,
                scope: other,
            }),
        }
    }

    /// Directory holding `permissions.yaml`.
    ///
    /// `$SKILLSYNC_CONFIG_DIR`, else `$XDG_CONFIG_HOME/skillsync`, else
    /// `$HOME/.config/skillsync`.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = self.var("SKILLSYNC_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }
        if let Some(xdg) = self.var("XDG_CONFIG_HOME") {
            return Ok(Path::new(xdg).join("skillsync"));
        }
        self.home
            .as_ref()
            .map(|h| h.join(".config").join("skillsync"))
            .ok_or(ConfigError::NoConfigDir)
    }
}

/// Walks upward from `start` to the nearest directory containing `.git`
/// and returns it with symlinks resolved.
pub fn find_repo_root(start: &Path) -> Result<PathBuf, PlatformError> {
    let start = start.canonicalize().map_err(|e| PlatformError::Io {
        path: start.to_path_buf(),
        source: e,
    })?;

    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
        .ok_or(PlatformError::NotInRepository(start.clone()))
}

/// The platform's user-scope directory, resolved against the live process
/// environment.
pub fn get_platform_path(platform: Platform) -> Result<PathBuf, PlatformError> {
    Environment::from_process().platform_path(platform)
}

/// The platform's directory for `scope`, resolved against the live process
/// environment.
pub fn get_platform_path_for_scope(
    platform: Platform,
    scope: Scope,
) -> Result<PathBuf, PlatformError> {
    Environment::from_process().platform_path_for_scope(platform, scope)
}

/// Extension of `path` with its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
