//! Exact-duplicate keys for raw articles.

use super::normalize::normalize;
use sha2::{Digest, Sha256};

/// Stable content digest of a (title, url) pair.
///
/// Hex-encoded SHA-256 of `normalize(title) + " " + normalize(url)`. Two
/// reports with the same digest are treated as one; hash collisions are
/// accepted as duplicates.
pub fn fingerprint(title: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(title).as_bytes());
    hasher.update(b" ");
    hasher.update(normalize(url).as_bytes());
    hex::encode(hasher.finalize())
}
