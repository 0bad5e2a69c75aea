//! # skillsync
//!
//! Safety and analysis core for keeping AI assistant skill files in sync
//! across platforms.
//!
//! Assistants such as Claude Code, Cursor, and Codex each expect skills
//! (short natural-language instruction files) in a different place and
//! format. `skillsync` checks a sync before anything is written, gates every
//! write behind a permission model, detects leaked secrets in skill content,
//! and finds near-duplicate skills.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use skillsync::platform::{get_platform_path, Platform};
//! use skillsync::skill::discover;
//! use skillsync::validation::{validate_source_target, ValidationOptions};
//!
//! let source = get_platform_path(Platform::ClaudeCode)?;
//! let skills = discover(&source, Platform::ClaudeCode)?;
//!
//! let options = ValidationOptions { scan_content: true, ..Default::default() };
//! let result = validate_source_target(Platform::ClaudeCode, Platform::Cursor, &skills, &options);
//! if let Some(err) = result.to_error() {
//!     eprintln!("{err}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! Checks compose in a fixed order: validation, then the permission check,
//! then confirmation, then the write.
//!
//! 1. **[`result`]**: the [`ValidationResult`](result::ValidationResult)
//!    carrier every analysis reports through.
//! 2. **[`platform`]**: platforms, scopes, and on-disk path resolution.
//! 3. **[`skill`]**: the skill record and directory discovery.
//! 4. **[`config`]** and **[`permissions`]**: the YAML permissions config
//!    and the [`Checker`](permissions::Checker) gate.
//! 5. **[`detector`]**: regex-based secret detection.
//! 6. **[`similarity`]**: LCS and Jaccard similarity.
//! 7. **[`validation`]**: the pre-sync pipeline.
//! 8. **[`report`]** and **[`output`]**: rendering as pretty text, JSON, or
//!    [SARIF].
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod config;
pub mod detector;
pub mod error;
pub mod output;
pub mod permissions;
pub mod platform;
pub mod report;
pub mod result;
pub mod similarity;
pub mod skill;
pub mod validation;
