//! Approximate title matching.
//!
//! The ratio is `2 * M / T`, where `M` is the length of the longest common
//! subsequence of the two normalized strings and `T` their combined length,
//! both counted in chars. Identical strings score 1.0, strings with nothing
//! in common 0.0.

use super::normalize::normalize;

/// Similarity of two titles in `[0, 1]`.
///
/// Symmetric. If either side normalizes to the empty string the result is
/// 0.0: an empty title carries no signal and must never trigger a merge.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let matches = lcs_length(&a, &b);
    2.0 * matches as f64 / (a.len() + b.len()) as f64
}

/// LCS length with two rolling rows over the shorter input.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for &lc in long {
        for (j, &sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}
