//! Per-skill and cross-skill checks.

use std::collections::HashMap;

use crate::platform::Platform;
use crate::result::{ErrorKind, ValidationResult};
use crate::skill::Skill;

/// Structural checks on one skill, in declared order: name, path,
/// extension, content. With `check_access`, the path must also open.
pub(crate) fn check_skill(
    result: &mut ValidationResult,
    index: usize,
    skill: &Skill,
    platform: Platform,
    strict: bool,
    check_access: bool,
) {
    let field = |name: &str| format!("skills[{index}].{name}");

    if skill.name.trim().is_empty() {
        result.add_error(field("name"), ErrorKind::EmptyName, "skill name is empty");
    }

    if skill.path.as_os_str().is_empty() {
        result.add_error(field("path"), ErrorKind::EmptyPath, "skill path is empty");
    } else if check_access {
        if let Err(e) = std::fs::File::open(&skill.path) {
            let message = format!(
                "path not accessible: {} ({e})",
                skill.path.display()
            );
            if strict {
                result.add_error(field("path"), ErrorKind::PathNotAccessible, message);
            } else {
                result.add_warning(format!("{}: {message}", field("path")));
            }
        }
    }

    let ext = skill.extension();
    if !platform.accepts_extension(&ext) {
        let allowed: Vec<&str> = platform
            .allowed_extensions()
            .iter()
            .map(|e| if e.is_empty() { "(none)" } else { e })
            .collect();
        result.add_error(
            field("extension"),
            ErrorKind::BadExtension,
            format!(
                "extension '{ext}' is not valid for {platform} (allowed: {})",
                allowed.join(", ")
            ),
        );
    }

    if skill.content.is_empty() {
        if strict {
            result.add_error(
                field("content"),
                ErrorKind::EmptyContentStrict,
                format!("skill '{}' has empty content", skill.name),
            );
        } else {
            result.add_warning(format!(
                "{}: skill '{}' has empty content",
                field("content"),
                skill.name
            ));
        }
    }
}

/// Flags every repeat of a name after its first occurrence.
pub(crate) fn check_unique_names(result: &mut ValidationResult, skills: &[Skill]) {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, skill) in skills.iter().enumerate() {
        if skill.name.trim().is_empty() {
            continue;
        }
        match first_seen.get(skill.name.as_str()) {
            Some(&first) => result.add_error(
                format!("skills[{index}].name"),
                ErrorKind::DuplicateName,
                format!(
                    "duplicate skill name '{}' (first defined at skills[{first}])",
                    skill.name
                ),
            ),
            None => {
                first_seen.insert(&skill.name, index);
            }
        }
    }
}
