//! Region identifiers and jurisdiction prefixes.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Hierarchical identifier of a region, e.g. a census tract GEOID.
///
/// Successive prefixes name coarser jurisdictions: for an 11-character
/// tract GEOID the first 2 characters are the state and the first 5 the
/// county. Cloning is cheap (shared `Arc<str>`).
///
/// `RegionId` borrows as `str`, so maps keyed by `RegionId` can be queried
/// with a plain `&str`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(Arc<str>);

impl RegionId {
    /// Wrap a string as a region identifier.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading `precision` characters of the identifier.
    ///
    /// See [`jurisdiction_prefix`].
    pub fn prefix(&self, precision: usize) -> &str {
        jurisdiction_prefix(&self.0, precision)
    }

    /// Whether `self` and `other` share the same prefix of length `precision`.
    pub fn same_jurisdiction(&self, other: &RegionId, precision: usize) -> bool {
        self.prefix(precision) == other.prefix(precision)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(v: &str) -> Self {
        Self(Arc::from(v))
    }
}

impl From<String> for RegionId {
    fn from(v: String) -> Self {
        Self(Arc::from(v))
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RegionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Dense index of a region inside a topology.
///
/// `RegionIx(n)` is the n-th region in topology insertion order. Every
/// deterministic scan over regions iterates in ascending `RegionIx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionIx(pub u32);

impl RegionIx {
    /// The index as a `usize`, for slice access.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RegionIx {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// The leading `precision` characters of `id`.
///
/// Identifiers shorter than `precision` are returned whole, so a short id
/// only matches ids that start with it exactly. Precision 0 yields the
/// empty prefix, which every identifier shares. Slicing respects UTF-8
/// character boundaries.
pub fn jurisdiction_prefix(id: &str, precision: usize) -> &str {
    match id.char_indices().nth(precision) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn prefix_of_tract_geoid() {
        let id = RegionId::from("36061014500");
        assert_eq!(id.prefix(5), "36061");
        assert_eq!(id.prefix(2), "36");
        assert_eq!(id.prefix(0), "");
    }

    #[test]
    fn prefix_longer_than_id_returns_whole_id() {
        assert_eq!(jurisdiction_prefix("36", 5), "36");
        assert_eq!(jurisdiction_prefix("", 5), "");
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        assert_eq!(jurisdiction_prefix("éa", 1), "é");
    }

    #[test]
    fn same_jurisdiction_by_precision() {
        let a = RegionId::from("36061014500");
        let b = RegionId::from("36047000100");
        assert!(!a.same_jurisdiction(&b, 5));
        assert!(a.same_jurisdiction(&b, 2));
        assert!(a.same_jurisdiction(&b, 0));
    }

    #[test]
    fn map_lookup_by_str() {
        let mut m = HashMap::new();
        m.insert(RegionId::from("01001020100"), 7);
        assert_eq!(m.get("01001020100"), Some(&7));
    }

    proptest! {
        #[test]
        fn prefix_is_a_prefix(id in "[0-9]{0,12}", p in 0usize..15) {
            let pre = jurisdiction_prefix(&id, p);
            prop_assert!(id.starts_with(pre));
            prop_assert_eq!(pre.chars().count(), p.min(id.chars().count()));
        }
    }
}
