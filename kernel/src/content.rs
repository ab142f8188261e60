//! Content hashing for report artifacts.
//!
//! Colors use the 64-bit digest in [`crate::digest`]; artifacts produced by
//! the harness (report bundles, fixture snapshots) are content-addressed
//! with domain-separated SHA-256 in `"algorithm:hex_digest"` form. Each
//! domain prefix is null-terminated so no prefix is a prefix of another.

use sha2::{Digest, Sha256};

/// Domain prefix for report bundle hashing.
pub const DOMAIN_REPORT: &[u8] = b"VEIL::REPORT::V1\0";

/// Domain prefix for graph fixture snapshot hashing.
pub const DOMAIN_GRAPH_FIXTURE: &[u8] = b"VEIL::GRAPH_FIXTURE::V1\0";

/// A content-addressed hash in `"algorithm:hex_digest"` form.
///
/// Invariant: `algorithm` is non-empty lowercase ASCII alphanumeric and
/// `digest` is non-empty lowercase hex. Enforced by [`ContentHash::parse`];
/// [`content_hash`] produces values that satisfy it by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex_digest"` form. Returns `None` on any
    /// deviation: missing or repeated `:`, empty parts, uppercase, non-hex.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (algorithm, digest) = s.split_once(':')?;
        if algorithm.is_empty() || digest.is_empty() || digest.contains(':') {
            return None;
        }
        let algo_ok = algorithm
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
        let digest_ok = digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !algo_ok || !digest_ok {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon: algorithm.len(),
        })
    }

    /// The algorithm portion (e.g., `"sha256"`).
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

/// Compute `sha256(domain_prefix || data)` as a [`ContentHash`].
///
/// The domain prefix must include its null terminator (the `DOMAIN_*`
/// constants in this module already do).
#[must_use]
pub fn content_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex = hex::encode(hasher.finalize());
    ContentHash {
        full: format!("sha256:{hex}"),
        colon: 6,
    }
}
