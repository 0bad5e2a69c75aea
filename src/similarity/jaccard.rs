//! Jaccard index over token sets.

use std::collections::HashSet;
use std::hash::Hash;

/// `|A ∩ B| / |A ∪ B|`. Both empty scores 1.0; exactly one empty scores 0.0.
#[allow(clippy::cast_precision_loss)]
pub fn jaccard_score<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Trimmed, non-empty lines.
pub fn line_tokens(s: &str) -> HashSet<&str> {
    s.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Sliding character n-grams. A string shorter than `n` yields itself as a
/// single gram; an empty string yields nothing.
///
/// ```
/// use skillsync::similarity::char_ngrams;
///
/// let grams = char_ngrams("abcd", 3);
/// assert_eq!(grams.len(), 2);
/// assert!(grams.contains("abc") && grams.contains("bcd"));
/// assert_eq!(char_ngrams("ab", 3).len(), 1);
/// ```
pub fn char_ngrams(s: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return HashSet::new();
    }
    if chars.len() < n {
        return HashSet::from([s.to_string()]);
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}
