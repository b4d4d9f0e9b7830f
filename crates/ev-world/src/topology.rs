//! Travel-time topology: the trait the simulation core calls, and a dense
//! matrix implementation.
//!
//! # Data layout
//!
//! The worlds this model targets are *complete* graphs over tens of
//! locations (every home can reach every store), so adjacency lists would be
//! pure overhead.  `TravelMatrix` stores an `n × n` table of
//! `Option<f64>` durations; `edge_duration(a, b)` is a single indexed load.
//!
//! Durations are in **ticks** and may be fractional (e.g. a 22-minute
//! commute at 30 min/tick is 0.73 ticks).  `None` means the edge is
//! undefined — a vehicle routed over an undefined edge is rejected at
//! simulation build time, never mid-run.

use ev_core::NodeId;

// ── Topology trait ────────────────────────────────────────────────────────────

/// The one seam between the simulation core and any topology provider.
///
/// Implementations must be pure: for fixed `(from, to)` the result never
/// changes during a run.  Determinism of the whole simulation rests on that.
pub trait Topology {
    /// Travel duration in ticks from `from` to `to`, or `None` if no edge is
    /// defined between the two locations.
    fn edge_duration(&self, from: NodeId, to: NodeId) -> Option<f64>;
}

impl<T: Topology + ?Sized> Topology for &T {
    fn edge_duration(&self, from: NodeId, to: NodeId) -> Option<f64> {
        (**self).edge_duration(from, to)
    }
}

// ── TravelMatrix ──────────────────────────────────────────────────────────────

/// Dense symmetric travel-time matrix over `NodeId(0)..NodeId(n)`.
///
/// Do not construct directly; use [`TravelMatrixBuilder`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelMatrix {
    node_count: usize,
    /// Row-major `node_count × node_count` durations; `None` = no edge.
    durations: Vec<Option<f64>>,
}

impl TravelMatrix {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// `true` if `node` indexes a row of this matrix.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count
    }

    /// Iterator over all node ids in this matrix.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count as u32).map(NodeId)
    }
}

impl Topology for TravelMatrix {
    #[inline]
    fn edge_duration(&self, from: NodeId, to: NodeId) -> Option<f64> {
        if from.index() >= self.node_count || to.index() >= self.node_count {
            return None;
        }
        self.durations[from.index() * self.node_count + to.index()]
    }
}

// ── TravelMatrixBuilder ───────────────────────────────────────────────────────

/// Construct a [`TravelMatrix`] incrementally, then call [`build`](Self::build).
///
/// Nodes are added first (ids are sequential from 0), then durations.
/// Setting a duration twice overwrites the earlier value.
///
/// # Example
///
/// ```
/// use ev_core::NodeId;
/// use ev_world::{Topology, TravelMatrixBuilder};
///
/// let mut b = TravelMatrixBuilder::new();
/// let home = b.add_node();
/// let work = b.add_node();
/// b.set_duration(home, work, 1.5); // symmetric
/// let matrix = b.build();
/// assert_eq!(matrix.edge_duration(work, home), Some(1.5));
/// assert_eq!(matrix.edge_duration(home, home), None); // never set
/// ```
pub struct TravelMatrixBuilder {
    node_count: usize,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl TravelMatrixBuilder {
    pub fn new() -> Self {
        Self { node_count: 0, edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of directed edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self { node_count: 0, edges: Vec::with_capacity(edges) }
    }

    /// Add a location node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add `n` nodes at once, returning the id range as a `Vec`.
    pub fn add_nodes(&mut self, n: usize) -> Vec<NodeId> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Set the **symmetric** travel duration between `a` and `b`, in ticks.
    /// Also usable with `a == b` to define a zero-cost self loop.
    pub fn set_duration(&mut self, a: NodeId, b: NodeId, ticks: f64) {
        self.edges.push((a, b, ticks));
        if a != b {
            self.edges.push((b, a, ticks));
        }
    }

    /// Set a **directed** duration from `from` to `to` only.
    pub fn set_directed_duration(&mut self, from: NodeId, to: NodeId, ticks: f64) {
        self.edges.push((from, to, ticks));
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Consume the builder and produce a [`TravelMatrix`].
    ///
    /// Later `set_duration` calls win over earlier ones for the same pair.
    pub fn build(self) -> TravelMatrix {
        let n = self.node_count;
        let mut durations = vec![None; n * n];
        for (from, to, ticks) in self.edges {
            debug_assert!(from.index() < n && to.index() < n, "edge endpoint out of range");
            durations[from.index() * n + to.index()] = Some(ticks);
        }
        TravelMatrix { node_count: n, durations }
    }
}

impl Default for TravelMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}
