//! Filesystem checks on platform directories.

use std::path::Path;

use crate::platform::Platform;
use crate::result::{ErrorKind, ValidationResult};

/// Checks that `path` exists, is a directory, and can be listed.
pub(crate) fn check_directory(
    result: &mut ValidationResult,
    field: &str,
    path: &Path,
    platform: Platform,
) {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            result.add_error(
                field,
                ErrorKind::PathMissing,
                format!("{platform} directory does not exist: {}", path.display()),
            );
            return;
        }
        Err(e) => {
            result.add_error_with_cause(
                field,
                ErrorKind::PathUnreadable,
                format!("cannot access {platform} directory {}", path.display()),
                &e,
            );
            return;
        }
    };

    if !metadata.is_dir() {
        result.add_error(
            field,
            ErrorKind::PathNotDirectory,
            format!("{platform} path is not a directory: {}", path.display()),
        );
        return;
    }

    if let Err(e) = std::fs::read_dir(path) {
        result.add_error_with_cause(
            field,
            ErrorKind::PathUnreadable,
            format!("cannot read {platform} directory {}", path.display()),
            &e,
        );
    }
}

/// Creates and removes a temporary file in `dir` to prove it is writable.
pub(crate) fn probe_writable(result: &mut ValidationResult, field: &str, dir: &Path) {
    match tempfile::Builder::new()
        .prefix(".skillsync-probe-")
        .tempfile_in(dir)
    {
        Ok(probe) => {
            if let Err(e) = probe.close() {
                tracing::debug!(error = %e, dir = %dir.display(), "failed to remove write probe");
            }
        }
        Err(e) => result.add_error_with_cause(
            field,
            ErrorKind::WritePermissionDenied,
            format!("cannot write to {}", dir.display()),
            &e,
        ),
    }
}
