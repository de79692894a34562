//! Hybrid cutoff selection.
//!
//! The hybrid variant of the engine runs the balanced split only while a
//! subproblem is large, and falls back to a direct sequential cover
//! search below a cutoff. The cutoff is a knob on the engine, not a
//! separate algorithm; each kind trades recursion depth against cover
//! breadth differently.

use crate::hypergraph::Hypergraph;

/// The size measure a cutoff compares against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffKind {
    /// Number of edges of the subproblem.
    NumberEdges,
    /// Sum of the edge arities of the subproblem.
    SumEdges,
    /// `|edges|·K` divided by the average edge arity.
    EdgesTimesKDivAvg,
    /// Fires for every proper subproblem: only the first level splits
    /// along a balanced separator.
    OneRound,
}

/// A configured cutoff: the measure plus its threshold.
#[derive(Debug, Clone, Copy)]
pub struct HybridCutoff {
    kind: CutoffKind,
    size: usize,
}

impl HybridCutoff {
    /// Creates a cutoff of the given kind and threshold.
    ///
    /// The threshold is ignored by [`CutoffKind::OneRound`].
    #[inline]
    pub fn new(kind: CutoffKind, size: usize) -> Self {
        Self { kind, size }
    }

    /// Returns the configured kind.
    #[inline]
    pub fn kind(&self) -> CutoffKind {
        self.kind
    }

    /// Decides whether `h` falls below the cutoff.
    ///
    /// `root_size` is the size (edges plus specials) of the graph the
    /// search was started on; only [`CutoffKind::OneRound`] consults it.
    pub fn fires(&self, h: &Hypergraph, k: usize, root_size: usize) -> bool {
        match self.kind {
            CutoffKind::NumberEdges => h.edge_count() <= self.size,
            CutoffKind::SumEdges => {
                h.edges().iter().map(|e| e.len()).sum::<usize>() <= self.size
            }
            CutoffKind::EdgesTimesKDivAvg => {
                let edges = h.edge_count();
                let total: usize = h.edges().iter().map(|e| e.len()).sum();
                if total == 0 {
                    return true;
                }
                // edges·k / (total/edges), kept in integer arithmetic.
                (edges * edges * k) / total <= self.size
            }
            CutoffKind::OneRound => h.size() < root_size,
        }
    }
}
