//! Skill records and discovery.
//!
//! A [`Skill`] is addressed by name and platform and carries its on-disk
//! path, content, and a flat string metadata map. Markdown skills may open
//! with a YAML frontmatter block whose scalar keys become metadata; a
//! frontmatter `name` takes precedence over the file-derived name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SkillError;
use crate::platform::{extension_of, Platform};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Skill {
    pub name: String,
    pub platform: Platform,
    pub path: PathBuf,
    pub content: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Skill {
    /// An in-memory skill with no metadata.
    pub fn new(
        name: impl Into<String>,
        platform: Platform,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Skill {
            name: name.into(),
            platform,
            path: path.into(),
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Extension of the skill's path with a leading dot, or empty.
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }

    /// Final component of the skill's path, if any.
    pub fn basename(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }

    /// Reads a skill file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::NotAFile`] for directories and
    /// [`SkillError::Read`] when the file cannot be read as UTF-8.
    pub fn load(path: &Path, platform: Platform) -> Result<Skill, SkillError> {
        if !path.is_file() {
            return Err(SkillError::NotAFile(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| SkillError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let metadata = if extension_of(path).eq_ignore_ascii_case(".json") {
            json_metadata(&content)
        } else {
            frontmatter_metadata(&content)
        };

        let name = metadata
            .get("name")
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| name_from_path(path));

        Ok(Skill {
            name,
            platform,
            path: path.to_path_buf(),
            content,
            metadata,
        })
    }
}

/// `SKILL.md` takes its directory's name; anything else its file stem.
fn name_from_path(path: &Path) -> String {
    let is_skill_md = path
        .file_name()
        .map(|n| n.eq_ignore_ascii_case("SKILL.md"))
        .unwrap_or(false);

    let component = if is_skill_md {
        path.parent().and_then(|p| p.file_name())
    } else {
        path.file_stem()
    };

    component
        .map(|c| c.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn frontmatter_metadata(content: &str) -> BTreeMap<String, String> {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return BTreeMap::new();
    }

    let mut block = String::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        block.push_str(line);
        block.push('\n');
    }
    if !closed {
        return BTreeMap::new();
    }

    match serde_yaml::from_str::<serde_yaml::Mapping>(&block) {
        Ok(mapping) => mapping
            .into_iter()
            .filter_map(|(k, v)| Some((k.as_str()?.to_string(), yaml_scalar(&v)?)))
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed frontmatter");
            BTreeMap::new()
        }
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_metadata(content: &str) -> BTreeMap<String, String> {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(content)
    else {
        return BTreeMap::new();
    };

    map.into_iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::String(s) => Some((k, s)),
            serde_json::Value::Bool(b) => Some((k, b.to_string())),
            serde_json::Value::Number(n) => Some((k, n.to_string())),
            _ => None,
        })
        .collect()
}

/// Loads every skill file under `dir` that `platform` accepts.
///
/// Files are visited in file-name order. Dot-files and dot-directories are
/// skipped. Extensionless files are only picked up on platforms whose
/// allow-list contains the empty extension. Files that cannot be read are
/// logged and skipped.
///
/// # Errors
///
/// Returns [`SkillError::Walk`] when `dir` itself cannot be traversed.
///
/// ```rust,no_run
/// use std::path::Path;
/// use skillsync::platform::Platform;
/// use skillsync::skill::discover;
///
/// let skills = discover(Path::new("/home/dev/.claude/skills"), Platform::ClaudeCode)?;
/// for skill in &skills {
///     println!("{} ({})", skill.name, skill.path.display());
/// }
/// # Ok::<(), skillsync::error::SkillError>(())
/// ```
pub fn discover(dir: &Path, platform: Platform) -> Result<Vec<Skill>, SkillError> {
    let mut skills = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(SkillError::Walk {
                    path: dir.to_path_buf(),
                    source: e,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let ext = extension_of(entry.path());
        let accepted = platform
            .allowed_extensions()
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext));
        if !accepted {
            continue;
        }

        match Skill::load(entry.path(), platform) {
            Ok(skill) => skills.push(skill),
            Err(e) => tracing::warn!(error = %e, "skipping skill"),
        }
    }

    Ok(skills)
}
