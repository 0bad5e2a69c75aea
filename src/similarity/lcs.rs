//! Longest Common Subsequence kernel.

/// Length of the longest common subsequence of `a` and `b`.
///
/// Keeps two rolling rows sized to the shorter input, so memory is
/// `min(|a|, |b|) + 1` counters per row.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for x in long {
        for (j, y) in short.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// `lcs_length / max(|a|, |b|)`; two empty inputs score 1.0.
///
/// ```
/// use skillsync::similarity::lcs_score;
///
/// let a = ["line1", "line2", "line3"];
/// let b = ["line1", "line2", "line4"];
/// assert!((lcs_score(&a, &b) - 2.0 / 3.0).abs() < 1e-9);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn lcs_score<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    lcs_length(a, b) as f64 / longest as f64
}
