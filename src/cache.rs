//! Negative cache for infeasible `(cover, component)` pairs.
//!
//! The recursion revisits the same `(cover, component)` pair through many
//! different paths; memoizing proven failures is the largest pruning win
//! of the whole search. Keys are canonical fingerprints, so a hit never
//! depends on the order in which the enumerator produced the edges.
//!
//! Entries are sound only for the width they were produced under; the
//! engine resets the cache whenever the target width changes.

use crate::fingerprint::{component_fingerprint, cover_fingerprint, HashValue};
use crate::hypergraph::{Edges, Hypergraph};
use dashmap::DashMap;

/// Composite key: canonical cover fingerprint plus canonical component
/// fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    cover: HashValue,
    component: HashValue,
}

/// Thread-safe set of `(cover, component)` pairs proven infeasible.
///
/// Concurrent `check`/`add` are linearizable; a double insert of the same
/// key is a no-op.
#[derive(Debug, Default)]
pub struct NegativeCache {
    entries: DashMap<CacheKey, ()>,
}

impl NegativeCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` iff any of `components` is recorded infeasible
    /// under `cover`; the branch is then dead and can be skipped.
    pub fn check(&self, cover: &Edges, components: &[Hypergraph]) -> bool {
        let cover = cover_fingerprint(cover);
        components.iter().any(|component| {
            self.entries.contains_key(&CacheKey {
                cover,
                component: component_fingerprint(component),
            })
        })
    }

    /// Records that `component` admits no decomposition under `cover` at
    /// the current width.
    pub fn add(&self, cover: &Edges, component: &Hypergraph) {
        self.entries.insert(
            CacheKey {
                cover: cover_fingerprint(cover),
                component: component_fingerprint(component),
            },
            (),
        );
    }

    /// Empties the cache. Called whenever the target width changes.
    pub fn reset(&self) {
        self.entries.clear();
    }

    /// Returns the number of recorded pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pair is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
