//! # Ring Lattice
//!
//! Deterministic k-regular ring lattices, the structured null model that
//! thresholded connectivity graphs are compared against.
//!
//! Nodes `0..n` sit on a ring and node `i` links to `i±1, …, i±⌊k/2⌋`
//! (mod `n`). Only the even part of `k` contributes: an odd `k` adds no
//! extra edge. The lattice therefore has exactly `n * ⌊k/2⌋` edges.

use tracing::debug;

use brainx_core::{BrainxError, Graph, Result};

/// Build the ring lattice on `n` nodes with degree `k`.
///
/// # Errors
///
/// Returns [`BrainxError::PreconditionViolation`] when `k >= n`. At that
/// connectivity neighbours on opposite sides of the ring coincide and the
/// `n * ⌊k/2⌋` edge count no longer holds.
pub fn regular_lattice(n: usize, k: usize) -> Result<Graph> {
    if k >= n {
        return Err(BrainxError::PreconditionViolation(format!(
            "lattice degree {k} must be smaller than node count {n}"
        )));
    }

    let half = k / 2;
    let mut graph = Graph::new(n);
    for i in 0..n {
        for offset in 1..=half {
            graph.add_edge(i, (i + offset) % n)?;
        }
    }

    debug!(nodes = n, degree = k, edges = graph.edge_count(), "built ring lattice");
    Ok(graph)
}
