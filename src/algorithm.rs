//! The balanced-separator decomposition engine.
//!
//! Computes a generalized hypertree decomposition of width at most `K` by
//! always splitting the current subgraph along a *balanced* separator, so
//! the recursion depth stays logarithmic in the graph size. Each frame
//! runs two nested racing searches, one for a balanced *child* cover and
//! one for a *parent* cover that reconnects the child to the frame's
//! connector, and fans the resulting subproblems out onto the rayon
//! pool.
//!
//! Search failure is a normal outcome (`None`); violated internal
//! invariants indicate a logic error and abort with diagnostic context.
//!
//! # Citations
//! - Gottlob, Okulmus & Pichler, "Fast and parallel decomposition of
//!   constraint satisfaction problems" (2020)
//! - Akatov & Gottlob, "Balanced queries: divide and conquer" (2010)

use crate::cache::NegativeCache;
use crate::combin::split_combinations;
use crate::decomp::{Decomp, Node};
use crate::hybrid::HybridCutoff;
use crate::hypergraph::{
    filter_vertices, inter, is_subset, union_vertices, Edge, Edges, Hypergraph, Vertex,
};
use crate::predicates::{balance_threshold, BalancedCheck, ParentCheck};
use crate::search::ParallelSearch;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

/// Caller-facing failures, rejected before any recursion starts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecompError {
    /// The target width must be positive.
    #[error("target width must be positive")]
    InvalidWidth,
    /// The balance factor must be at least 2.
    #[error("balance factor must be at least 2, got {0}")]
    InvalidBalanceFactor(usize),
    /// No hypergraph has been bound to the engine.
    #[error("no hypergraph bound to the decomposer")]
    GraphUnbound,
}

/// The contract a decomposition algorithm offers to its orchestrator.
///
/// `Ok(None)` means the search space was exhausted without finding a
/// decomposition of the configured width, which is a normal terminal
/// state.
pub trait Decomposer {
    /// Stable identifier of the algorithm.
    fn name(&self) -> &'static str;

    /// Sets the target width and resets the negative cache, since
    /// entries from another width epoch would be unsound.
    fn set_width(&mut self, k: usize);

    /// Runs the search against the previously bound graph.
    fn find_decomp(&mut self) -> Result<Option<Decomp>, DecompError>;

    /// Binds `graph`, then runs the search.
    fn find_decomp_graph(&mut self, graph: Hypergraph) -> Result<Option<Decomp>, DecompError>;
}

/// The log-depth balanced-separator engine.
#[derive(Debug)]
pub struct LogDepthDecomp {
    graph: Option<Hypergraph>,
    k: usize,
    balance_factor: usize,
    workers: usize,
    hybrid: Option<HybridCutoff>,
    root_size: usize,
    cache: NegativeCache,
}

impl LogDepthDecomp {
    /// Creates an engine for target width `k`, with no graph bound yet.
    ///
    /// Defaults: balance factor 2, one enumeration stream per thread of
    /// the rayon pool, no hybrid cutoff.
    pub fn new(k: usize) -> Self {
        Self {
            graph: None,
            k,
            balance_factor: 2,
            workers: rayon::current_num_threads(),
            hybrid: None,
            root_size: 0,
            cache: NegativeCache::new(),
        }
    }

    /// Binds the graph to decompose.
    pub fn with_graph(mut self, graph: Hypergraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Sets the balance factor `β`; the balance threshold is
    /// `⌊n·(β−1)/β⌋`.
    pub fn with_balance_factor(mut self, balance_factor: usize) -> Self {
        self.balance_factor = balance_factor;
        self
    }

    /// Sets the number of parallel enumeration streams.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Enables the hybrid cutoff (§ hybrid module).
    pub fn with_hybrid(mut self, cutoff: HybridCutoff) -> Self {
        self.hybrid = Some(cutoff);
        self
    }

    /// Returns the configured target width.
    #[inline]
    pub fn width(&self) -> usize {
        self.k
    }

    /// Returns the number of memoized negative pairs (current epoch).
    #[inline]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Terminal frames.
    ///
    /// Returns `Some(outcome)` when the frame needs no recursion:
    /// 1. at most `K` edges and no specials: a single node covers it
    ///    (this includes the empty graph);
    /// 2. no edges and one special: a leaf over the special;
    /// 3. no edges and several specials: infeasible, nothing left to
    ///    cover them jointly;
    /// 4. an empty cover pool: infeasible.
    fn base_case(&self, h: &Hypergraph, allowed_len: usize) -> Option<Option<Decomp>> {
        let (len_e, len_sp) = (h.edge_count(), h.special().len());
        if len_e <= self.k && len_sp == 0 {
            let root = Node::leaf(h.vertices().to_vec(), h.edges().clone());
            return Some(Some(Decomp::new(h.clone(), root)));
        }
        if len_e == 0 && len_sp == 1 {
            let sp = h.special()[0].clone();
            let root = Node::leaf(sp.vertices().to_vec(), sp);
            return Some(Some(Decomp::new(h.clone(), root)));
        }
        if len_e == 0 {
            return Some(None);
        }
        if allowed_len == 0 {
            return Some(None);
        }
        None
    }

    /// One recursion frame: decomposes `h` so that the root's bag covers
    /// `conn`, drawing covers from `allowed_full` only.
    fn search(&self, h: &Hypergraph, conn: &[Vertex], allowed_full: &Edges) -> Option<Decomp> {
        assert!(
            is_subset(conn, h.vertices()),
            "connector escapes the subgraph: conn {:?} not within {:?}",
            conn,
            h
        );

        if let Some(outcome) = self.base_case(h, allowed_full.len()) {
            trace!(
                edges = h.edge_count(),
                specials = h.special().len(),
                feasible = outcome.is_some(),
                "base case"
            );
            return outcome;
        }

        if let Some(cutoff) = self.hybrid {
            if cutoff.fires(h, self.k, self.root_size) {
                return self.direct_search(h, conn, allowed_full);
            }
        }

        let allowed = filter_vertices(allowed_full, h.vertices());
        let balanced = BalancedCheck::new(self.balance_factor);
        let mut child_search = ParallelSearch::new(h, &allowed, self.k, self.workers);

        loop {
            child_search.find_next(&balanced);
            if child_search.is_exhausted() {
                debug!(
                    edges = h.edge_count(),
                    "child search exhausted, frame infeasible"
                );
                return None;
            }
            let child_cover = child_search.result_cover();
            let (child_comps, _, _) = h.components(&child_cover);

            // A child that already covers the connector roots this frame
            // itself; no parent is needed.
            if is_subset(conn, child_cover.vertices()) {
                if let Some(found) =
                    self.try_child_as_root(h, &child_cover, &child_comps, allowed_full)
                {
                    return Some(found);
                }
                continue;
            }

            if let Some(found) = self.parent_search(h, conn, &allowed, &child_cover, allowed_full)
            {
                return Some(found);
            }
        }
    }

    /// Roots the frame at `child_cover`, recursing on its components.
    ///
    /// The first failing component is memoized and the child abandoned.
    fn try_child_as_root(
        &self,
        h: &Hypergraph,
        child_cover: &Edges,
        child_comps: &[Hypergraph],
        allowed_full: &Edges,
    ) -> Option<Decomp> {
        if self.cache.check(child_cover, child_comps) {
            trace!(cover = %child_cover, "root cover rejected by cache");
            return None;
        }
        let child_bag = inter(child_cover.vertices(), h.vertices());

        let mut subtrees = Vec::with_capacity(child_comps.len());
        for comp in child_comps {
            let comp_conn = inter(comp.vertices(), &child_bag);
            match self.search(comp, &comp_conn, allowed_full) {
                Some(decomp) => subtrees.push(decomp.root),
                None => {
                    self.cache.add(child_cover, comp);
                    return None;
                }
            }
        }

        debug!(cover = %child_cover, "child-root cover chosen");
        let root = Node::new(child_bag, child_cover.clone(), subtrees);
        Some(Decomp::new(h.clone(), root))
    }

    /// Enumerates parent covers for a fixed child and tries to close the
    /// frame over each.
    fn parent_search(
        &self,
        h: &Hypergraph,
        conn: &[Vertex],
        allowed: &Edges,
        child_cover: &Edges,
        allowed_full: &Edges,
    ) -> Option<Decomp> {
        let reach = union_vertices(conn, child_cover.vertices());
        let allowed_parent = filter_vertices(allowed, &reach);
        let predicate = ParentCheck::new(
            conn.to_vec(),
            child_cover.vertices().to_vec(),
            self.balance_factor,
        );
        let mut parent_search = ParallelSearch::new(h, &allowed_parent, self.k, self.workers);
        let limit = balance_threshold(h.size(), self.balance_factor);

        loop {
            parent_search.find_next(&predicate);
            if parent_search.is_exhausted() {
                return None;
            }
            let parent_cover = parent_search.result_cover();
            let (parent_comps, _, isolated) = h.components(&parent_cover);

            // The parent predicate guarantees exactly one oversized
            // component; its absence is a logic error.
            let low_index = parent_comps
                .iter()
                .position(|c| c.size() > limit)
                .unwrap_or_else(|| {
                    panic!(
                        "parent cover {} left no oversized component \
                         (graph {:?}, conn {:?}, child {})",
                        parent_cover, h, conn, child_cover
                    )
                });
            let comp_low = &parent_comps[low_index];
            let child_bag = inter(child_cover.vertices(), comp_low.vertices());

            let (low_comps, _, _) = comp_low.components(child_cover);
            if self.cache.check(child_cover, &low_comps) {
                trace!(parent = %parent_cover, "pairing rejected by cache");
                continue;
            }

            // The upper side: isolated parent edges plus every component
            // other than the low one, spliced to the child through a
            // virtual edge over the child's interface.
            let connecting = Edges::new(vec![Edge::virtual_edge(child_bag.iter().copied())]);
            let mut upper_edges: Vec<Edge> = isolated.slice().to_vec();
            let mut upper_special: Vec<Edges> = Vec::new();
            for (i, comp) in parent_comps.iter().enumerate() {
                if i != low_index {
                    upper_edges.extend(comp.edges().iter().cloned());
                    upper_special.extend(comp.special().iter().cloned());
                }
            }
            let has_upper_edges = !upper_edges.is_empty();

            let (upper, lower) = if parent_comps.len() == 1 {
                // The parent leaves only the low component: the upper
                // side is the parent cover itself, and its two-node
                // decomposition needs no recursion.
                let upper_graph =
                    Hypergraph::with_special(parent_cover.clone(), vec![connecting.clone()]);
                let root = Node::new(
                    inter(parent_cover.vertices(), h.vertices()),
                    parent_cover.clone(),
                    vec![Node::leaf(child_bag.clone(), connecting.clone())],
                );
                (
                    Some(Decomp::new(upper_graph, root)),
                    self.solve_lower(&low_comps, &child_bag, allowed_full),
                )
            } else {
                upper_special.push(connecting.clone());
                let upper_graph =
                    Hypergraph::with_special(Edges::new(upper_edges), upper_special);
                // Edges already allocated to the low subtree must not be
                // reused above it; the low side keeps the full pool.
                let allowed_reduced = allowed_full.diff(comp_low.edges());
                rayon::join(
                    || self.search(&upper_graph, conn, &allowed_reduced),
                    || self.solve_lower(&low_comps, &child_bag, allowed_full),
                )
            };

            // All results are drained before deciding; every failed low
            // component is worth memoizing even when siblings failed too.
            let mut rejected = false;
            for (comp, result) in low_comps.iter().zip(&lower) {
                if result.is_none() {
                    self.cache.add(child_cover, comp);
                    rejected = true;
                }
            }
            let Some(upper) = upper else {
                trace!(parent = %parent_cover, "upper side infeasible");
                continue;
            };
            if rejected {
                trace!(parent = %parent_cover, "a low component is infeasible");
                continue;
            }

            assert!(
                is_subset(conn, &upper.root.bag),
                "upper decomposition fails to cover the connector: conn {:?}, root {}",
                conn,
                upper.root
            );

            let lower_roots: Vec<Node> = lower
                .into_iter()
                .map(|d| d.expect("checked above").root)
                .collect();
            let root_child = Node::new(child_bag, child_cover.clone(), lower_roots);
            let final_root = if has_upper_edges {
                attach(upper.root, root_child, &connecting)
            } else {
                root_child
            };

            debug!(parent = %parent_cover, child = %child_cover, "frame closed");
            return Some(Decomp::new(h.clone(), final_root));
        }
    }

    /// Decomposes the low-side components concurrently, each keeping the
    /// full cover pool.
    fn solve_lower(
        &self,
        low_comps: &[Hypergraph],
        child_bag: &[Vertex],
        allowed_full: &Edges,
    ) -> Vec<Option<Decomp>> {
        low_comps
            .par_iter()
            .map(|comp| {
                let comp_conn = inter(comp.vertices(), child_bag);
                self.search(comp, &comp_conn, allowed_full)
            })
            .collect()
    }

    /// Sequential cover search without the balance requirement, used
    /// below the hybrid cutoff.
    ///
    /// Each descent removes the chosen cover from the pool, which bounds
    /// the recursion depth by the pool size.
    fn direct_search(&self, h: &Hypergraph, conn: &[Vertex], allowed_full: &Edges) -> Option<Decomp> {
        let allowed = filter_vertices(allowed_full, h.vertices());
        let mut stream = split_combinations(allowed.len(), self.k, 1)
            .pop()
            .expect("split_combinations yields at least one stream");

        while stream.check_next() {
            let cover = allowed.subset(stream.current());
            stream.confirm();
            if !is_subset(conn, cover.vertices()) {
                continue;
            }
            let (comps, _, _) = h.components(&cover);
            if self.cache.check(&cover, &comps) {
                continue;
            }
            let bag = inter(cover.vertices(), h.vertices());
            let reduced = allowed_full.diff(&cover);

            let mut subtrees = Vec::with_capacity(comps.len());
            let mut feasible = true;
            for comp in &comps {
                let comp_conn = inter(comp.vertices(), &bag);
                match self.search(comp, &comp_conn, &reduced) {
                    Some(decomp) => subtrees.push(decomp.root),
                    None => {
                        self.cache.add(&cover, comp);
                        feasible = false;
                        break;
                    }
                }
            }
            if feasible {
                trace!(cover = %cover, "direct cover chosen");
                return Some(Decomp::new(h.clone(), Node::new(bag, cover, subtrees)));
            }
        }
        None
    }
}

impl Decomposer for LogDepthDecomp {
    fn name(&self) -> &'static str {
        if self.hybrid.is_some() {
            "LogDepthHybrid"
        } else {
            "LogDepthDecomp"
        }
    }

    fn set_width(&mut self, k: usize) {
        self.cache.reset();
        self.k = k;
    }

    fn find_decomp(&mut self) -> Result<Option<Decomp>, DecompError> {
        if self.k == 0 {
            return Err(DecompError::InvalidWidth);
        }
        if self.balance_factor < 2 {
            return Err(DecompError::InvalidBalanceFactor(self.balance_factor));
        }
        let graph = self.graph.clone().ok_or(DecompError::GraphUnbound)?;
        self.root_size = graph.size();
        debug!(
            name = self.name(),
            k = self.k,
            edges = graph.edge_count(),
            vertices = graph.vertex_count(),
            "decomposition search started"
        );
        Ok(self.search(&graph, &[], graph.edges()))
    }

    fn find_decomp_graph(&mut self, graph: Hypergraph) -> Result<Option<Decomp>, DecompError> {
        self.graph = Some(graph);
        self.find_decomp()
    }
}

/// Splices a child decomposition into a parent skeleton.
///
/// Replaces the unique leaf of `upper_root` whose cover spans exactly the
/// connecting virtual edge with `child_root`.
///
/// # Panics
/// Panics when no such leaf exists; the upper tree was then built
/// incorrectly and no retry can fix it.
fn attach(mut upper_root: Node, child_root: Node, connecting: &Edges) -> Node {
    match upper_root.replace_leaf(connecting.vertices(), child_root) {
        None => upper_root,
        Some(_) => panic!(
            "upper tree {} has no leaf covering the connecting edge {}",
            upper_root, connecting
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hybrid::CutoffKind;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn vs(raw: &[u32]) -> Vec<Vertex> {
        raw.iter().map(|&r| Vertex::new(r)).collect()
    }

    fn graph(edges: &[&[u32]]) -> Hypergraph {
        let edges = edges
            .iter()
            .enumerate()
            .map(|(i, raw)| Edge::new(i as u32 + 1, raw.iter().map(|&r| Vertex::new(r))))
            .collect();
        Hypergraph::new(Edges::new(edges))
    }

    /// A path of `n` vertices as binary edges.
    fn path(n: u32) -> Hypergraph {
        let edges = (1..n)
            .map(|i| Edge::new(i, [Vertex::new(i), Vertex::new(i + 1)]))
            .collect();
        Hypergraph::new(Edges::new(edges))
    }

    fn kite() -> Hypergraph {
        graph(&[&[1, 2, 3], &[3, 4, 5], &[1, 5]])
    }

    fn solve(g: &Hypergraph, k: usize) -> Option<Decomp> {
        LogDepthDecomp::new(k)
            .with_graph(g.clone())
            .find_decomp()
            .expect("valid configuration")
    }

    #[test]
    fn rejects_caller_misuse() {
        let mut unbound = LogDepthDecomp::new(2);
        assert_eq!(unbound.find_decomp(), Err(DecompError::GraphUnbound));

        let mut zero = LogDepthDecomp::new(0).with_graph(path(4));
        assert_eq!(zero.find_decomp(), Err(DecompError::InvalidWidth));

        let mut unbalanced = LogDepthDecomp::new(2)
            .with_graph(path(4))
            .with_balance_factor(1);
        assert_eq!(
            unbalanced.find_decomp(),
            Err(DecompError::InvalidBalanceFactor(1))
        );
    }

    #[test]
    fn empty_graph_yields_single_empty_node() {
        let g = Hypergraph::default();
        let d = solve(&g, 1).expect("empty graph is decomposable");
        assert!(d.root.bag.is_empty());
        assert!(d.root.cover.is_empty());
        assert!(d.root.children.is_empty());
    }

    #[test]
    fn small_graph_is_a_single_node() {
        let g = graph(&[&[1, 2], &[2, 3]]);
        let d = solve(&g, 3).expect("fits in one node");
        assert_eq!(d.root.nodes().len(), 1);
        assert_eq!(d.root.bag, vs(&[1, 2, 3]));
        assert!(d.verify(&g, 3));
    }

    #[test]
    fn leftover_specials_are_infeasible() {
        let sp = |raw: &[u32]| Edges::new(vec![Edge::virtual_edge(vs(raw))]);
        let g = Hypergraph::with_special(Edges::default(), vec![sp(&[1, 2]), sp(&[3, 4])]);
        assert!(solve(&g, 2).is_none());
    }

    /// Scenario: three edges `{1,2},{2,3},{3,4}` at width 1 give a path
    /// decomposition whose bags are exactly the edges.
    #[test]
    fn path_at_width_one() {
        let g = path(4);
        let d = solve(&g, 1).expect("paths have width 1");
        assert!(d.verify(&g, 1));
        assert_eq!(d.root.nodes().len(), 3);
    }

    /// A longer path forces the parent search: the only balanced child
    /// deep in the recursion does not cover its connector.
    #[test]
    fn long_path_exercises_parent_pairing() {
        for n in [7, 9, 12] {
            let g = path(n);
            let d = solve(&g, 1).expect("paths have width 1");
            assert!(d.verify(&g, 1));
        }
    }

    /// Scenario: a triangle of binary edges at width 2 collapses into a
    /// single node covered by two of the edges.
    #[test]
    fn triangle_at_width_two() {
        let g = graph(&[&[1, 2], &[2, 3], &[1, 3]]);
        let d = solve(&g, 2).expect("triangle has width 2");
        assert!(d.verify(&g, 2));
        assert_eq!(d.root.nodes().len(), 1);
        assert_eq!(d.root.bag, vs(&[1, 2, 3]));
    }

    /// Scenario: two vertex-disjoint triangles still satisfy
    /// connectedness through the shared tree.
    #[test]
    fn disjoint_triangles_stay_connected() {
        let g = graph(&[
            &[1, 2],
            &[2, 3],
            &[1, 3],
            &[4, 5],
            &[5, 6],
            &[4, 6],
        ]);
        let d = solve(&g, 2).expect("each triangle has width 2");
        assert!(d.verify(&g, 2));
    }

    /// Scenario: the kite is infeasible at width 1 and feasible at 2.
    #[test]
    fn kite_width_boundary() {
        let g = kite();
        assert!(solve(&g, 1).is_none());
        let d = solve(&g, 2).expect("kite has width 2");
        assert!(d.verify(&g, 2));
    }

    /// Monotonicity: success at `k` implies success for every larger
    /// width.
    #[test]
    fn success_is_monotone_in_width() {
        let g = kite();
        for k in 2..=4 {
            let d = solve(&g, k).expect("wider searches keep succeeding");
            assert!(d.verify(&g, k));
        }
    }

    /// Idempotence: repeated runs agree on feasibility (shapes may
    /// differ; invariants may not).
    #[test]
    fn repeated_runs_agree() {
        let g = kite();
        let mut engine = LogDepthDecomp::new(2).with_graph(g.clone());
        for _ in 0..3 {
            let d = engine.find_decomp().unwrap().expect("kite has width 2");
            assert!(d.verify(&g, 2));
        }

        let mut engine = LogDepthDecomp::new(1).with_graph(g);
        for _ in 0..3 {
            assert!(engine.find_decomp().unwrap().is_none());
        }
    }

    /// Raising the width after a failure must not be poisoned by stale
    /// negative entries: `set_width` starts a fresh cache epoch.
    #[test]
    fn width_change_resets_the_cache_epoch() {
        let g = kite();
        let mut engine = LogDepthDecomp::new(1).with_graph(g.clone());
        assert!(engine.find_decomp().unwrap().is_none());

        engine.set_width(2);
        assert_eq!(engine.cache_size(), 0);
        let d = engine.find_decomp().unwrap().expect("kite has width 2");
        assert!(d.verify(&g, 2));
    }

    #[test]
    fn reports_configured_name() {
        let mut plain = LogDepthDecomp::new(2).with_graph(kite());
        assert_eq!(plain.name(), "LogDepthDecomp");
        assert!(plain.find_decomp().unwrap().is_some());

        let hybrid = LogDepthDecomp::new(2)
            .with_hybrid(HybridCutoff::new(CutoffKind::NumberEdges, 4));
        assert_eq!(hybrid.name(), "LogDepthHybrid");
    }

    /// Every cutoff kind must preserve validity of the result.
    #[test]
    fn hybrid_cutoffs_preserve_validity() {
        let cases = [
            HybridCutoff::new(CutoffKind::NumberEdges, 2),
            HybridCutoff::new(CutoffKind::SumEdges, 6),
            HybridCutoff::new(CutoffKind::EdgesTimesKDivAvg, 2),
            HybridCutoff::new(CutoffKind::OneRound, 0),
        ];
        for cutoff in cases {
            for (g, k) in [(path(9), 1), (kite(), 2)] {
                let d = LogDepthDecomp::new(k)
                    .with_graph(g.clone())
                    .with_hybrid(cutoff)
                    .find_decomp()
                    .unwrap()
                    .expect("hybrid search stays complete on these inputs");
                assert!(d.verify(&g, k));
            }
        }
    }

    #[test]
    fn single_worker_matches_parallel_feasibility() {
        let g = kite();
        for workers in [1, 2, 8] {
            let d = LogDepthDecomp::new(2)
                .with_graph(g.clone())
                .with_workers(workers)
                .find_decomp()
                .unwrap()
                .expect("feasibility is independent of worker count");
            assert!(d.verify(&g, 2));
            assert!(LogDepthDecomp::new(1)
                .with_graph(g.clone())
                .with_workers(workers)
                .find_decomp()
                .unwrap()
                .is_none());
        }
    }

    #[test]
    fn looser_balance_factor_still_verifies() {
        let g = path(9);
        let d = LogDepthDecomp::new(2)
            .with_graph(g.clone())
            .with_balance_factor(3)
            .find_decomp()
            .unwrap()
            .expect("paths have width 1 ≤ 2");
        assert!(d.verify(&g, 2));
    }

    /// Seeded random hypergraphs: whatever width first succeeds must
    /// keep succeeding and verifying at every larger width.
    #[test]
    fn random_graphs_verify_across_widths() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..4 {
            let edges: Vec<Edge> = (1..=7u32)
                .map(|id| {
                    let arity = rng.gen_range(2..=3);
                    let vertices =
                        (0..arity).map(|_| Vertex::new(rng.gen_range(1..=9))).collect::<Vec<_>>();
                    Edge::new(id, vertices)
                })
                .collect();
            let g = Hypergraph::new(Edges::new(edges));

            let mut first_success = None;
            for k in 1..=4 {
                match solve(&g, k) {
                    Some(d) => {
                        assert!(d.verify(&g, k), "invalid decomposition at k={k}");
                        first_success.get_or_insert(k);
                    }
                    None => assert!(
                        first_success.is_none(),
                        "success at {:?} but failure at {k}",
                        first_success
                    ),
                }
            }
            assert!(first_success.is_some(), "k=4 must cover 7 edges");
        }
    }
}
