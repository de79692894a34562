//! Parallel predicate search over partitioned cover streams.
//!
//! `P` workers each advance one strided stream of the cover enumerator
//! and race to publish the first candidate a predicate accepts. The
//! shared slot is written under a single-writer discipline: whoever flips
//! the `found` flag first owns the slot for this round. A losing worker
//! leaves its candidate unconfirmed, so nothing is ever skipped: across
//! repeated calls every accepted cover is eventually published.
//!
//! Ordering across calls is non-deterministic; exhaustion is a normal
//! terminal state, not an error.

use crate::combin::{split_combinations, CombinationIterator};
use crate::hypergraph::{Edges, Hypergraph};
use crate::predicates::CoverPredicate;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Stateful racing search for covers satisfying a predicate.
///
/// Borrows the subgraph and the candidate pool for its lifetime; owns the
/// per-worker enumeration streams, which persist across `find_next` calls
/// so the search resumes where it left off.
pub struct ParallelSearch<'a> {
    graph: &'a Hypergraph,
    candidates: &'a Edges,
    generators: Vec<CombinationIterator>,
    result: Vec<usize>,
    exhausted: bool,
}

impl<'a> ParallelSearch<'a> {
    /// Creates a search over all subsets of `candidates` of size
    /// `1..=width`, partitioned into `workers` streams.
    pub fn new(graph: &'a Hypergraph, candidates: &'a Edges, width: usize, workers: usize) -> Self {
        Self {
            graph,
            candidates,
            generators: split_combinations(candidates.len(), width, workers),
            result: Vec::new(),
            exhausted: false,
        }
    }

    /// Advances the search to the next cover accepted by `predicate`.
    ///
    /// On success the published index vector is available through
    /// [`result`](Self::result); when every stream is spent without a hit
    /// the search becomes [`exhausted`](Self::is_exhausted) and the last
    /// result is left untouched.
    pub fn find_next<P: CoverPredicate>(&mut self, predicate: &P) {
        if self.exhausted {
            return;
        }

        let found = AtomicBool::new(false);
        let slot: Mutex<Option<Vec<usize>>> = Mutex::new(None);
        let graph = self.graph;
        let candidates = self.candidates;

        rayon::scope(|s| {
            for generator in self.generators.iter_mut() {
                let found = &found;
                let slot = &slot;
                s.spawn(move |_| {
                    while !found.load(Ordering::Acquire) {
                        if !generator.check_next() {
                            break;
                        }
                        let cover = candidates.subset(generator.current());
                        if predicate.accepts(graph, &cover) {
                            if !found.swap(true, Ordering::AcqRel) {
                                *slot.lock() = Some(generator.current().to_vec());
                                // Only the winner consumes its candidate;
                                // losers re-present theirs next round.
                                generator.confirm();
                            }
                            break;
                        }
                        generator.confirm();
                    }
                });
            }
        });

        match slot.into_inner() {
            Some(indices) => {
                trace!(cover = %candidates.subset(&indices), "search published a cover");
                self.result = indices;
            }
            None => {
                trace!("search space exhausted");
                self.exhausted = true;
            }
        }
    }

    /// Returns the last published index vector.
    #[inline]
    pub fn result(&self) -> &[usize] {
        &self.result
    }

    /// Resolves the last published index vector against the pool.
    #[inline]
    pub fn result_cover(&self) -> Edges {
        self.candidates.subset(&self.result)
    }

    /// Returns `true` once every stream has been spent.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergraph::{Edge, Vertex};
    use crate::predicates::BalancedCheck;
    use std::collections::BTreeSet;

    fn edge(id: u32, raw: &[u32]) -> Edge {
        Edge::new(id, raw.iter().map(|&r| Vertex::new(r)))
    }

    fn path() -> Hypergraph {
        Hypergraph::new(Edges::new(vec![
            edge(1, &[1, 2]),
            edge(2, &[2, 3]),
            edge(3, &[3, 4]),
        ]))
    }

    /// Canonical form of a cover for set comparison: sorted edge ids.
    fn key(cover: &Edges) -> Vec<u32> {
        let mut ids: Vec<u32> = cover.iter().map(Edge::id).collect();
        ids.sort();
        ids
    }

    fn collect_all(graph: &Hypergraph, width: usize, workers: usize) -> BTreeSet<Vec<u32>> {
        let candidates = graph.edges().clone();
        let mut search = ParallelSearch::new(graph, &candidates, width, workers);
        let predicate = BalancedCheck::new(2);
        let mut out = BTreeSet::new();
        loop {
            search.find_next(&predicate);
            if search.is_exhausted() {
                break;
            }
            assert!(out.insert(key(&search.result_cover())), "duplicate hit");
        }
        out
    }

    /// Every accepted cover is eventually published, for any worker
    /// count, and exactly once.
    #[test]
    fn racing_search_is_exhaustive() {
        let graph = path();
        let brute = collect_all(&graph, 2, 1);
        assert!(!brute.is_empty());
        for workers in [2, 3, 8] {
            assert_eq!(collect_all(&graph, 2, workers), brute);
        }
    }

    #[test]
    fn exhaustion_is_terminal() {
        let graph = path();
        let candidates = graph.edges().clone();
        let mut search = ParallelSearch::new(&graph, &candidates, 1, 2);
        let predicate = BalancedCheck::new(2);
        loop {
            search.find_next(&predicate);
            if search.is_exhausted() {
                break;
            }
        }
        search.find_next(&predicate);
        assert!(search.is_exhausted());
    }

    #[test]
    fn empty_pool_exhausts_without_result() {
        let graph = path();
        let empty = Edges::default();
        let mut search = ParallelSearch::new(&graph, &empty, 2, 4);
        search.find_next(&BalancedCheck::new(2));
        assert!(search.is_exhausted());
        assert!(search.result().is_empty());
    }
}
