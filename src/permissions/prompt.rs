//! Confirmation prompt rendering and reading.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::error::PermissionError;
use crate::permissions::OperationType;

/// Renders the prompt text for `op`. `details` names the affected target.
///
/// ```
/// use skillsync::permissions::{render_prompt, OperationType};
///
/// colored::control::set_override(false);
/// let prompt = render_prompt(OperationType::Delete, "~/.claude/skills/review.md");
/// assert!(prompt.contains("Delete ~/.claude/skills/review.md?"));
/// assert!(prompt.ends_with("[y/N]: "));
/// ```
pub fn render_prompt(op: OperationType, details: &str) -> String {
    let glyph = if op.is_destructive() {
        "⚠".red().bold().to_string()
    } else {
        "?".yellow().bold().to_string()
    };

    let body = match op {
        OperationType::Delete => format!("Delete {details}? This cannot be undone."),
        OperationType::Overwrite => {
            format!("Overwrite {details}? The existing content will be replaced.")
        }
        OperationType::BackupDelete => {
            format!("Delete backup {details}? It cannot be restored afterwards.")
        }
        other => format!("Proceed with {other} operation on {details}?"),
    };

    format!("{glyph} {body} [y/N]: ")
}

/// Writes the prompt for `op` to `writer` and reads one answer line from
/// `reader`. Only `y` or `yes` (case-insensitive, trimmed) approve; EOF
/// declines.
pub(crate) fn ask<R: BufRead, W: Write>(
    op: OperationType,
    details: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<bool, PermissionError> {
    writer
        .write_all(render_prompt(op, details).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(PermissionError::ConfirmationIo)?;

    let mut answer = String::new();
    let read = reader
        .read_line(&mut answer)
        .map_err(PermissionError::ConfirmationIo)?;
    if read == 0 {
        tracing::debug!(%op, "confirmation stream closed, declining");
        return Ok(false);
    }

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
