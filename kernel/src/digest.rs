//! The 64-bit color digest.
//!
//! **Exactly one place defines the color digest.** Every color value in the
//! system is `XXH64(seed = 0)` over a canonical little-endian buffer: the
//! feature buffer for initial colors, the word serialization of
//! [`hash_u64_words`] for refined colors.
//!
//! The digest is deterministic across runs and platforms. Swapping it for
//! another 64-bit digest would change every color value without changing
//! the induced partition.

use twox_hash::XxHash64;

/// Fixed seed for the color digest. Part of the stable output contract.
pub const COLOR_DIGEST_SEED: u64 = 0;

/// Hash an arbitrary byte buffer into a 64-bit color.
#[must_use]
pub fn fast_hash64(bytes: &[u8]) -> u64 {
    XxHash64::oneshot(COLOR_DIGEST_SEED, bytes)
}

/// Hash a sequence of `u64` words, serialized little-endian.
///
/// This is the refinement serialization: callers pass the node's own color
/// followed by its sorted `(direction, relation, neighbor_color)` triples,
/// flattened. A single-word input covers the empty-adjacency case.
#[must_use]
pub fn hash_u64_words(words: &[u64]) -> u64 {
    let mut buf = Vec::with_capacity(words.len() * 8);
    for w in words {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    fast_hash64(&buf)
}
