//! Layout configuration, validation, and error types.
//!
//! [`LayoutConfig`] is the builder-input for a [`LayoutEngine`](crate::LayoutEngine).
//! [`validate()`](LayoutConfig::validate) checks structural invariants
//! before any region is placed.

use cartogrid_core::RegionId;
use thiserror::Error;

// ── JurisdictionLevels ─────────────────────────────────────────────

/// Descending list of id-prefix lengths tried from most to least specific.
///
/// Guaranteed non-empty, strictly descending, and terminated by 0 (the
/// empty prefix every region shares). The trailing 0 is what makes both
/// traversal and placement always able to make progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JurisdictionLevels(Vec<usize>);

impl JurisdictionLevels {
    /// Census tract GEOIDs: county (5), then state (2), then anything.
    pub const CENSUS_TRACT: [usize; 3] = [5, 2, 0];

    /// Validate and wrap a precision list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the list is empty, not strictly
    /// descending, or does not end in 0.
    pub fn new(precisions: Vec<usize>) -> Result<Self, ConfigError> {
        let Some(&last) = precisions.last() else {
            return Err(ConfigError::NoPrecisions);
        };
        if let Some(w) = precisions.windows(2).find(|w| w[0] <= w[1]) {
            return Err(ConfigError::PrecisionsNotDescending {
                before: w[0],
                after: w[1],
            });
        }
        if last != 0 {
            return Err(ConfigError::MissingCatchAllPrecision { last });
        }
        Ok(Self(precisions))
    }

    /// The precisions, most specific first.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Iterate precisions, most specific first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl Default for JurisdictionLevels {
    fn default() -> Self {
        Self(Self::CENSUS_TRACT.to_vec())
    }
}

impl TryFrom<Vec<usize>> for JurisdictionLevels {
    type Error = ConfigError;

    fn try_from(v: Vec<usize>) -> Result<Self, ConfigError> {
        Self::new(v)
    }
}

// ── StartRegion ───────────────────────────────────────────────────

/// How the traversal picks its first region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartRegion {
    /// The region nearest the mean of all centroids.
    #[default]
    Centermost,
    /// A region drawn uniformly from the seeded RNG.
    Random,
    /// A specific region.
    Explicit(RegionId),
}

// ── DegenerateOrientation ─────────────────────────────────────────

/// What distortion scoring does when a vector has zero length.
///
/// The grid vector is never zero (a candidate cell is always free, a
/// reference region always placed); the geographic vector is zero when a
/// reference region's centroid coincides with the region being placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegenerateOrientation {
    /// Charge the perpendicular cost of 0.5, which favours no candidate.
    #[default]
    NeutralCost,
    /// Leave the reference region out of the sum.
    Exclude,
}

// ── LayoutConfig ──────────────────────────────────────────────────

/// Configuration for one layout run.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Jurisdiction precisions. Default: `[5, 2, 0]`.
    pub precisions: JurisdictionLevels,
    /// Seed for every random choice in the run. Default: 0.
    pub seed: u64,
    /// Start-region policy. Default: [`StartRegion::Centermost`].
    pub start: StartRegion,
    /// Size of the reference set used for distortion tie-breaks. Default: 5.
    pub reference_count: usize,
    /// Zero-length vector policy. Default: [`DegenerateOrientation::NeutralCost`].
    pub degenerate_orientation: DegenerateOrientation,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            precisions: JurisdictionLevels::default(),
            seed: 0,
            start: StartRegion::default(),
            reference_count: 5,
            degenerate_orientation: DegenerateOrientation::default(),
        }
    }
}

impl LayoutConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the start-region policy.
    pub fn with_start(mut self, start: StartRegion) -> Self {
        self.start = start;
        self
    }

    /// Start from a specific region.
    pub fn starting_at(self, id: impl Into<RegionId>) -> Self {
        self.with_start(StartRegion::Explicit(id.into()))
    }

    /// Set the jurisdiction precisions.
    pub fn with_precisions(mut self, precisions: JurisdictionLevels) -> Self {
        self.precisions = precisions;
        self
    }

    /// Set the reference set size.
    pub fn with_reference_count(mut self, count: usize) -> Self {
        self.reference_count = count;
        self
    }

    /// Set the zero-length vector policy.
    pub fn with_degenerate_orientation(mut self, policy: DegenerateOrientation) -> Self {
        self.degenerate_orientation = policy;
        self
    }

    /// Check structural invariants.
    ///
    /// Precision-list invariants are enforced by [`JurisdictionLevels`]
    /// itself; this checks the remaining fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_count == 0 {
            return Err(ConfigError::ZeroReferenceCount);
        }
        Ok(())
    }
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected while validating a [`LayoutConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The precision list is empty.
    #[error("jurisdiction precision list is empty")]
    NoPrecisions,
    /// Two adjacent precisions are not strictly descending.
    #[error("jurisdiction precisions must strictly descend, found {before} then {after}")]
    PrecisionsNotDescending {
        /// The earlier precision.
        before: usize,
        /// The later precision, which is not smaller.
        after: usize,
    },
    /// The precision list does not end with 0.
    #[error("jurisdiction precisions must end with 0, found {last}")]
    MissingCatchAllPrecision {
        /// The actual last precision.
        last: usize,
    },
    /// `reference_count` is zero.
    #[error("reference_count must be at least 1")]
    ZeroReferenceCount,
}
