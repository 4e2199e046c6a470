//! # Legacy Cost Table
//!
//! The fixed-edge-count cost table predates [`crate::cost::apply_cost`] and
//! [`crate::cost::cost_lookup`]. It is kept so that existing analyses keep
//! running, and every call says so: at compile time through
//! `#[deprecated]`, at run time through a `tracing` warning and the
//! [`Deprecated`] wrapper around the returned value.

use serde::{Deserialize, Serialize};
use tracing::warn;

use brainx_core::possible_edges;

/// A value produced by a deprecated operation, with the notice attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "a deprecated result carries a notice the caller should surface"]
pub struct Deprecated<T> {
    /// The computed value.
    pub value: T,
    /// Human-readable deprecation notice naming the replacement.
    pub notice: String,
}

impl<T> Deprecated<T> {
    /// Discard the notice and take the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Every achievable cost on a full graph of a given size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    /// `nodes * (nodes - 1) / 2`.
    pub total_edges: usize,
    /// `costs[i] = i / total_edges` for `i in 0..=total_edges`.
    pub costs: Vec<f64>,
}

const COST_SIZE_NOTICE: &str = "cost_size is deprecated; use cost_lookup or apply_cost";

/// Cost of keeping `0, 1, …, total_edges` edges on a full graph of `nodes`
/// nodes. Graphs with fewer than two nodes have the single cost `0`.
#[deprecated(note = "use cost::cost_lookup or cost::apply_cost")]
pub fn cost_size(nodes: usize) -> Deprecated<CostTable> {
    warn!(nodes, "{COST_SIZE_NOTICE}");

    let total_edges = possible_edges(nodes);
    let costs = if total_edges == 0 {
        vec![0.0]
    } else {
        (0..=total_edges)
            .map(|edges| edges as f64 / total_edges as f64)
            .collect()
    };

    Deprecated {
        value: CostTable { total_edges, costs },
        notice: COST_SIZE_NOTICE.to_string(),
    }
}
