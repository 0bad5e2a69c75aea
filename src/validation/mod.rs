//! Pre-sync validation pipeline.
//!
//! [`Validator::validate_source_target`] is the main entry-point for checking
//! a sync from one platform to another. It walks a fixed sequence of steps
//! and never stops early; every step adds its findings to one
//! [`ValidationResult`]:
//!
//! 1. **Source**: the source platform's directory must exist, be a
//!    directory, and be readable.
//! 2. **Target**: the target directory may be missing (it is created on
//!    write), but if present it must be a directory.
//! 3. **Skills**: per-skill checks for each skill in order (name, path,
//!    extension, content), then name uniqueness across the set. Extensions
//!    are checked against the source platform: the files are still in
//!    source format until a converter writes them out.
//! 4. **Content** (optional): secret detection on each skill, and
//!    near-duplicate warnings.
//! 5. **Conflicts** (optional): skills whose file already exists in the
//!    target directory.
//! 6. **Write permission**: a temporary file is created and removed in an
//!    existing target directory.
//!
//! # Examples
//!
//! ```rust,no_run
//! use skillsync::platform::Platform;
//! use skillsync::skill::discover;
//! use skillsync::validation::{ValidationOptions, Validator};
//!
//! let validator = Validator::default();
//! let source = validator.environment().platform_path(Platform::ClaudeCode)?;
//! let skills = discover(&source, Platform::ClaudeCode)?;
//! let options = ValidationOptions { check_conflicts: true, ..Default::default() };
//!
//! let result = validator.validate_source_target(Platform::ClaudeCode, Platform::Cursor, &skills, &options);
//! println!("{}", result.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod paths;
mod skills;

use std::path::Path;

use crate::detector::Detector;
use crate::platform::{Environment, Platform, Scope};
use crate::result::{ErrorKind, ValidationResult};
use crate::similarity::{Matcher, SimilarityConfig};
use crate::skill::Skill;

/// Knobs for [`Validator::validate_source_target`].
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Empty content and inaccessible paths become errors instead of warnings.
    pub strict_mode: bool,
    /// Warn about skills whose file already exists in the target directory.
    pub check_conflicts: bool,
    /// Run the secret detector over every skill's content.
    pub scan_content: bool,
    /// Warn about near-duplicate skills.
    pub similarity: Option<SimilarityConfig>,
    /// Scope whose directories are resolved for source and target.
    pub scope: Scope,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            strict_mode: false,
            check_conflicts: false,
            scan_content: false,
            similarity: None,
            scope: Scope::User,
        }
    }
}

/// Runs validation against a captured [`Environment`].
#[derive(Debug, Clone)]
pub struct Validator {
    env: Environment,
    detector: Detector,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(Environment::from_process())
    }
}

impl Validator {
    pub fn new(env: Environment) -> Self {
        Validator {
            env,
            detector: Detector::default(),
        }
    }

    /// Replaces the detector used when [`ValidationOptions::scan_content`] is on.
    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detector = detector;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// End-to-end pre-flight for syncing `skills` from `source` to `target`.
    pub fn validate_source_target(
        &self,
        source: Platform,
        target: Platform,
        skills: &[Skill],
        options: &ValidationOptions,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        tracing::debug!(%source, "validating source");
        match self.env.platform_path_for_scope(source, options.scope) {
            Ok(path) => paths::check_directory(&mut result, "source", &path, source),
            Err(e) => result.add_error_with_cause(
                "source",
                ErrorKind::PlatformUnresolved,
                format!("cannot resolve {source} directory"),
                &e,
            ),
        }

        tracing::debug!(%target, "validating target");
        let target_dir = match self.env.platform_path_for_scope(target, options.scope) {
            Ok(path) => {
                if path.exists() && !path.is_dir() {
                    result.add_error(
                        "target",
                        ErrorKind::PathNotDirectory,
                        format!("{target} path is not a directory: {}", path.display()),
                    );
                    None
                } else {
                    Some(path)
                }
            }
            Err(e) => {
                result.add_error_with_cause(
                    "target",
                    ErrorKind::PlatformUnresolved,
                    format!("cannot resolve {target} directory"),
                    &e,
                );
                None
            }
        };

        tracing::debug!(count = skills.len(), "validating skills");
        for (index, skill) in skills.iter().enumerate() {
            skills::check_skill(
                &mut result,
                index,
                skill,
                source,
                options.strict_mode,
                true,
            );
        }
        skills::check_unique_names(&mut result, skills);

        if options.scan_content {
            result.merge(self.detector.scan_skills(skills));
        }

        if let Some(config) = options.similarity {
            let matcher = Matcher::new(config);
            for m in matcher.find_similar(skills) {
                result.add_warning(format!(
                    "skills '{}' and '{}' are {:.0}% similar ({})",
                    m.skill_a.name,
                    m.skill_b.name,
                    m.score * 100.0,
                    m.algorithm
                ));
            }
        }

        if let Some(ref dir) = target_dir {
            if options.check_conflicts {
                tracing::debug!(dir = %dir.display(), "checking conflicts");
                check_conflicts(&mut result, dir, skills);
            }
            if dir.is_dir() {
                paths::probe_writable(&mut result, "target", dir);
            } else {
                tracing::debug!(dir = %dir.display(), "target does not exist yet, skipping write probe");
            }
        }

        result
    }

    /// Structural checks only; the filesystem is not touched.
    pub fn validate_skills_format(&self, skills: &[Skill], platform: Platform) -> ValidationResult {
        validate_skills_format(skills, platform)
    }

    /// Checks that `path` is an existing, readable directory.
    pub fn validate_path(&self, path: &Path, platform: Platform) -> ValidationResult {
        validate_path(path, platform)
    }
}

/// Structural checks on `skills` for `platform`, without filesystem access.
///
/// ```
/// use skillsync::platform::Platform;
/// use skillsync::skill::Skill;
/// use skillsync::validation::validate_skills_format;
///
/// let skills = vec![
///     Skill::new("test", Platform::ClaudeCode, "a/test.md", "one"),
///     Skill::new("test", Platform::ClaudeCode, "b/test.md", "two"),
/// ];
/// let result = validate_skills_format(&skills, Platform::ClaudeCode);
/// assert!(!result.is_valid());
/// assert_eq!(result.errors.len(), 1);
/// assert_eq!(result.errors[0].field, "skills[1].name");
/// ```
pub fn validate_skills_format(skills: &[Skill], platform: Platform) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (index, skill) in skills.iter().enumerate() {
        skills::check_skill(&mut result, index, skill, platform, false, false);
    }
    skills::check_unique_names(&mut result, skills);
    result
}

/// Checks that `path` exists, is a directory, and can be read.
pub fn validate_path(path: &Path, platform: Platform) -> ValidationResult {
    let mut result = ValidationResult::new();
    paths::check_directory(&mut result, "path", path, platform);
    result
}

/// End-to-end pre-flight against the live process environment.
pub fn validate_source_target(
    source: Platform,
    target: Platform,
    skills: &[Skill],
    options: &ValidationOptions,
) -> ValidationResult {
    Validator::default().validate_source_target(source, target, skills, options)
}

fn check_conflicts(result: &mut ValidationResult, target_dir: &Path, skills: &[Skill]) {
    for skill in skills {
        let Some(basename) = skill.basename() else {
            continue;
        };
        let candidate = target_dir.join(basename);
        if candidate.exists() {
            result.add_warning(format!(
                "target file exists: skill '{}' would overwrite {}",
                skill.name,
                candidate.display()
            ));
        }
    }
}
