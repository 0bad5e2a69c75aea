//! False-positive suppression.
//!
//! Matching is plain substring matching on the lowercased value portion of
//! a line; placeholders such as `your_api_key_here` or `<your-token>` never
//! count as secrets.

const COMMENT_PREFIXES: &[&str] = &["#", "//", "/*", "*"];

const PLACEHOLDER_MARKERS: &[&str] = &["your_", "<your", "placeholder", "example_"];

const MASKED_VALUE: &str = "xxxxxxxxxxxxx";

/// Returns `true` if `line` should not be scanned.
///
/// ```
/// use skillsync::detector::is_false_positive;
///
/// assert!(is_false_positive("  # api_key: abcdefghijklmnopqrstu"));
/// assert!(is_false_positive("api_key: YOUR_API_KEY_HERE_1234567"));
/// assert!(!is_false_positive("api_key: sk_live_1234567890abcdef"));
/// ```
pub fn is_false_positive(line: &str) -> bool {
    let trimmed = line.trim_start();

    if COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        return true;
    }

    let Some((_, value)) = trimmed.split_once([':', '=']) else {
        return false;
    };
    let value = value.trim().to_lowercase();

    PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
        || value.starts_with("\"xxx")
        || value.starts_with("'xxx")
        || value == MASKED_VALUE
}
