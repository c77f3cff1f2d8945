//! Region visiting order.
//!
//! [`Traversal`] is a single-pass, non-restartable iterator that yields
//! every region of a topology exactly once. It is a breadth-first walk
//! that prefers staying inside the current jurisdiction: after yielding a
//! region it enqueues unvisited neighbours sharing the longest possible id
//! prefix, and when no neighbour qualifies it jumps to the geographically
//! nearest unvisited region in that jurisdiction instead.
//!
//! Scans over unvisited regions run in ascending [`RegionIx`], so the
//! order is fully determined by the start region.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use cartogrid_core::{RegionIx, TopologyError};
use cartogrid_topology::Topology;
use rand::Rng;
use tracing::debug;

use crate::config::JurisdictionLevels;

/// How a region entered the traversal queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Enqueued {
    Neighbours,
    Jump,
    Nothing,
}

/// Breadth-first, jurisdiction-aware region iterator.
pub struct Traversal<'t> {
    topology: &'t Topology,
    levels: &'t JurisdictionLevels,
    queue: VecDeque<RegionIx>,
    /// `remaining[i]`: region `i` has not been enqueued yet.
    remaining: Vec<bool>,
    remaining_count: usize,
    jumps: usize,
}

impl<'t> Traversal<'t> {
    /// Start a traversal at `start`.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::EmptyTopology`] if there is nothing to traverse.
    /// - [`TopologyError::RegionIndexOutOfRange`] if `start` is not an
    ///   index of `topology`.
    pub fn new(
        topology: &'t Topology,
        levels: &'t JurisdictionLevels,
        start: RegionIx,
    ) -> Result<Self, TopologyError> {
        let n = topology.len();
        if n == 0 {
            return Err(TopologyError::EmptyTopology);
        }
        if start.index() >= n {
            return Err(TopologyError::RegionIndexOutOfRange { index: start, len: n });
        }
        let mut t = Self {
            topology,
            levels,
            queue: VecDeque::with_capacity(16),
            remaining: vec![true; n],
            remaining_count: n,
            jumps: 0,
        };
        t.enqueue(start);
        Ok(t)
    }

    /// Start a traversal at a region drawn uniformly from `rng`.
    ///
    /// # Errors
    ///
    /// [`TopologyError::EmptyTopology`] if there is nothing to traverse.
    pub fn with_random_start<R: Rng>(
        topology: &'t Topology,
        levels: &'t JurisdictionLevels,
        rng: &mut R,
    ) -> Result<Self, TopologyError> {
        if topology.is_empty() {
            return Err(TopologyError::EmptyTopology);
        }
        let start = RegionIx(rng.random_range(0..topology.len() as u32));
        Self::new(topology, levels, start)
    }

    /// Whether another region will be produced.
    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Regions not yet produced (queued or never reached).
    pub fn remaining(&self) -> usize {
        self.queue.len() + self.remaining_count
    }

    /// How many times the traversal jumped to a non-adjacent region.
    pub fn jumps(&self) -> usize {
        self.jumps
    }

    fn enqueue(&mut self, ix: RegionIx) {
        self.remaining[ix.index()] = false;
        self.remaining_count -= 1;
        self.queue.push_back(ix);
    }

    /// Enqueue successors of `s`, trying precisions most specific first.
    fn refill(&mut self, s: RegionIx) {
        if self.remaining_count == 0 {
            return;
        }
        let levels = self.levels;
        for precision in levels.iter() {
            match self.expand(s, precision) {
                Enqueued::Nothing => continue,
                Enqueued::Neighbours => return,
                Enqueued::Jump => {
                    self.jumps += 1;
                    return;
                }
            }
        }
    }

    fn expand(&mut self, s: RegionIx, precision: usize) -> Enqueued {
        let topology = self.topology;
        let prefix = topology.id(s).prefix(precision);

        let mut found = false;
        for &n in topology.neighbors(s) {
            if self.remaining[n.index()] && topology.id(n).prefix(precision) == prefix {
                self.enqueue(n);
                found = true;
            }
        }
        if found {
            return Enqueued::Neighbours;
        }

        let origin = topology.centroid(s);
        let mut nearest: Option<(RegionIx, f64)> = None;
        for (i, _) in self.remaining.iter().enumerate().filter(|(_, r)| **r) {
            let ix = RegionIx(i as u32);
            if topology.id(ix).prefix(precision) != prefix {
                continue;
            }
            let d = origin.distance(topology.centroid(ix));
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((ix, d));
            }
        }
        match nearest {
            Some((ix, distance)) => {
                debug!(
                    from = %topology.id(s),
                    to = %topology.id(ix),
                    precision,
                    distance,
                    "traversal jump"
                );
                self.enqueue(ix);
                Enqueued::Jump
            }
            None => Enqueued::Nothing,
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = RegionIx;

    fn next(&mut self) -> Option<RegionIx> {
        let s = self.queue.pop_front()?;
        self.refill(s);
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Traversal<'_> {}

impl FusedIterator for Traversal<'_> {}
