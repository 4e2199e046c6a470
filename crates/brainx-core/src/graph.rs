//! # Network Graph
//!
//! An undirected, optionally weighted graph over the node set `0..nodes`.
//! Thresholded connectivity matrices and synthetic reference lattices are
//! both expressed as a [`Graph`], so downstream comparisons work on one
//! representation.
//!
//! ## Invariants
//!
//! - Edges are unordered pairs; `(u, v)` and `(v, u)` are the same edge.
//! - No self-loops and no duplicate edges.
//! - Unweighted edges carry weight `1.0`.
//! - Adjacency is kept in `BTreeMap`s, so iteration order is deterministic.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayBase, Data, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::{BrainxError, GraphError, ShapeError};

/// Maximum number of distinct undirected edges among `nodes` nodes,
/// `nodes * (nodes - 1) / 2`.
pub fn possible_edges(nodes: usize) -> usize {
    nodes * nodes.saturating_sub(1) / 2
}

// ---------------------------------------------------------------------------
// WeightedEdge
// ---------------------------------------------------------------------------

/// An undirected edge with `source < target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// Lower-numbered endpoint.
    pub source: usize,
    /// Higher-numbered endpoint.
    pub target: usize,
    /// Edge weight (`1.0` for unweighted edges).
    pub weight: f64,
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Undirected graph stored as a per-node adjacency map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GraphRecord", try_from = "GraphRecord")]
pub struct Graph {
    /// Adjacency list: node → (neighbor → weight). Stored symmetrically.
    adjacency: Vec<BTreeMap<usize, f64>>,
}

impl Graph {
    /// Create a graph with `nodes` isolated nodes.
    pub fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); nodes],
        }
    }

    /// Build a weighted graph from the strictly-lower triangle of a square
    /// matrix. Every non-zero, non-NaN entry below the diagonal becomes an
    /// edge; the diagonal and upper triangle are ignored.
    ///
    /// This is the natural consumer of a cost-thresholded matrix.
    pub fn from_lower_triangle<S>(matrix: &ArrayBase<S, Ix2>) -> Result<Self, BrainxError>
    where
        S: Data<Elem = f64>,
    {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(ShapeError::NotSquare { rows, cols }.into());
        }

        let mut graph = Self::new(rows);
        for i in 1..rows {
            for j in 0..i {
                let w = matrix[[i, j]];
                if w != 0.0 && !w.is_nan() {
                    graph.add_weighted_edge(j, i, w)?;
                }
            }
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Add an unweighted edge. Returns `true` if the edge is new.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.add_weighted_edge(u, v, 1.0)
    }

    /// Add (or re-weight) an edge. Returns `true` if the edge is new.
    pub fn add_weighted_edge(
        &mut self,
        u: usize,
        v: usize,
        weight: f64,
    ) -> Result<bool, GraphError> {
        let nodes = self.node_count();
        for node in [u, v] {
            if node >= nodes {
                return Err(GraphError::NodeOutOfRange { node, nodes });
            }
        }
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }

        let inserted = self.adjacency[u].insert(v, weight).is_none();
        self.adjacency[v].insert(u, weight);
        Ok(inserted)
    }

    /// Whether `u` and `v` are adjacent.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.weight(u, v).is_some()
    }

    /// Weight of the edge between `u` and `v`, if present.
    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.adjacency.get(u).and_then(|n| n.get(&v)).copied()
    }

    /// Number of neighbors of `node` (0 for an unknown node).
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, BTreeMap::len)
    }

    /// Neighbors of `node` in ascending order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|n| n.keys().copied())
    }

    /// All edges with `source < target`, ordered by `(source, target)`.
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, n)| {
            n.range(u + 1..).map(move |(&v, &weight)| WeightedEdge {
                source: u,
                target: v,
                weight,
            })
        })
    }

    /// Symmetric dense weight matrix with a zero diagonal.
    pub fn to_adjacency(&self) -> Array2<f64> {
        let n = self.node_count();
        let mut out = Array2::zeros((n, n));
        for edge in self.edges() {
            out[[edge.source, edge.target]] = edge.weight;
            out[[edge.target, edge.source]] = edge.weight;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// Flat edge-list form used for serialization. Deserialization re-runs
/// every edge through [`Graph::add_weighted_edge`], so malformed input is
/// rejected instead of producing an asymmetric adjacency.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRecord {
    nodes: usize,
    edges: Vec<WeightedEdge>,
}

impl From<Graph> for GraphRecord {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edges().collect(),
        }
    }
}

impl TryFrom<GraphRecord> for Graph {
    type Error = GraphError;

    fn try_from(record: GraphRecord) -> Result<Self, Self::Error> {
        let mut graph = Graph::new(record.nodes);
        for edge in record.edges {
            graph.add_weighted_edge(edge.source, edge.target, edge.weight)?;
        }
        Ok(graph)
    }
}
