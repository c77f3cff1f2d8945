//! Hashing for layout reproducibility checks.
//!
//! Uses FNV-1a for fast, deterministic hashing of a finished layout.
//! Not cryptographically secure; intended for comparing runs.

use crate::layout::GridLayout;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash a layout's cells in placement order.
///
/// Each cell contributes its coordinates (as LE `i32`), the region id
/// bytes, and the id length, so both placement order and contents matter.
/// Two layouts hash equal iff they placed the same regions at the same
/// cells in the same order (barring collisions).
pub fn layout_hash(layout: &GridLayout) -> u64 {
    let mut hash = FNV_OFFSET;
    for (coord, id) in layout.iter() {
        hash = fnv1a_bytes(hash, &coord.x.to_le_bytes());
        hash = fnv1a_bytes(hash, &coord.y.to_le_bytes());
        hash = fnv1a_bytes(hash, id.as_str().as_bytes());
        hash = fnv1a_bytes(hash, &(id.as_str().len() as u32).to_le_bytes());
    }
    hash
}
