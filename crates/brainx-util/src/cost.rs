//! # Cost Thresholding
//!
//! Converts a dense, symmetric weighted matrix into a sparse graph that
//! keeps a target fraction ("cost") of the possible edges.
//!
//! ## Selection Rule
//!
//! Let `K = round(cost * possible_edges)` (round half to even). The
//! strictly-lower triangle is ranked by weight, descending, and the weight
//! at rank `K-1` becomes the threshold. Every non-zero lower-triangle
//! entry whose weight is `>=` the threshold is kept.
//!
//! Selection is by value, not by rank: when several edges share the
//! boundary weight they are all kept, so the output may hold more than `K`
//! edges. A fixed-size top-K slice would keep an arbitrary subset of a
//! tied group and make the result depend on storage order.
//!
//! ## Output Convention
//!
//! Information lives only in the strictly-lower triangle. The diagonal and
//! the upper triangle of every output are zero, whatever the input held.

use ndarray::{Array2, ArrayBase, Data, Dimension, Ix2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use brainx_core::{possible_edges, BrainxError, Result, ShapeError};

// ---------------------------------------------------------------------------
// Thresholded
// ---------------------------------------------------------------------------

/// Result of [`apply_cost`].
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholded {
    /// Lower-triangular matrix holding the kept weights.
    pub matrix: Array2<f64>,
    /// Weight of the weakest kept edge. `None` when nothing was kept.
    pub threshold: Option<f64>,
    /// `K`, the edge count requested by the cost, clamped to the number of
    /// ranked lower-triangle entries.
    pub target_edges: usize,
    /// Non-zero entries left in `matrix`. Exceeds `target_edges` when ties
    /// span the boundary; falls short of it when the threshold is `0.0`.
    pub kept_edges: usize,
}

// ---------------------------------------------------------------------------
// apply_cost
// ---------------------------------------------------------------------------

/// Threshold `matrix` so that it keeps the strongest `cost` fraction of
/// `possible_edges`, keeping every edge tied with the boundary weight.
///
/// `possible_edges` is supplied by the caller rather than derived from the
/// matrix size, so callers working on a partial graph can pass their own
/// count. For a full graph use [`brainx_core::possible_edges`].
///
/// NaN weights are never ranked and are zero in the output.
///
/// # Errors
///
/// - [`ShapeError::NotSquare`] if `matrix` is not square.
/// - [`BrainxError::PreconditionViolation`] if `cost` is NaN or outside
///   `[0, 1]`, or `possible_edges` is zero.
pub fn apply_cost<S>(
    matrix: &ArrayBase<S, Ix2>,
    cost: f64,
    possible_edges: usize,
) -> Result<Thresholded>
where
    S: Data<Elem = f64>,
{
    let nodes = square_dim(matrix)?;
    check_cost(cost)?;
    if possible_edges == 0 {
        return Err(BrainxError::PreconditionViolation(
            "possible_edges must be positive".into(),
        ));
    }

    let mut weights = Vec::with_capacity(nodes * nodes.saturating_sub(1) / 2);
    let mut nan_count = 0usize;
    for (_, _, w) in lower_triangle(matrix) {
        if w.is_nan() {
            nan_count += 1;
        } else {
            weights.push(w);
        }
    }
    if nan_count > 0 {
        warn!(nan_count, nodes, "NaN weights excluded from cost thresholding");
    }
    weights.sort_by(|a, b| b.total_cmp(a));

    let target_edges = target_edge_count(cost, possible_edges).min(weights.len());
    let threshold = target_edges.checked_sub(1).map(|rank| weights[rank]);

    let mut out = Array2::zeros((nodes, nodes));
    let mut kept_edges = 0usize;
    if let Some(t) = threshold {
        for (i, j, w) in lower_triangle(matrix) {
            // A zero weight passes a zero threshold but is not an edge.
            if w >= t && w != 0.0 {
                out[[i, j]] = w;
                kept_edges += 1;
            }
        }
    }

    debug!(
        nodes,
        cost,
        possible_edges,
        target_edges,
        kept_edges,
        threshold = ?threshold,
        "applied cost threshold"
    );

    Ok(Thresholded {
        matrix: out,
        threshold,
        target_edges,
        kept_edges,
    })
}

/// `round(cost * possible_edges)`, rounding half to even.
pub fn target_edge_count(cost: f64, possible_edges: usize) -> usize {
    (cost * possible_edges as f64).round_ties_even() as usize
}

// ---------------------------------------------------------------------------
// Companions
// ---------------------------------------------------------------------------

/// True when no entry is negative. Zeros count as positive; NaN does not.
pub fn all_positive<S, D>(arr: &ArrayBase<S, D>) -> bool
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    arr.iter().all(|&v| v >= 0.0)
}

/// One ranked lower-triangle entry of a weighted matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostLookupEntry {
    /// Row (the larger node index).
    pub row: usize,
    /// Column (the smaller node index).
    pub col: usize,
    /// Edge weight.
    pub weight: f64,
    /// Cost reached by keeping this edge and every stronger one.
    pub cost: f64,
}

/// Rank every lower-triangle entry by weight, descending, alongside the
/// cost each rank corresponds to on a full graph of this size.
///
/// Equal weights keep row-major order. NaN entries are left out.
pub fn cost_lookup<S>(matrix: &ArrayBase<S, Ix2>) -> Result<Vec<CostLookupEntry>>
where
    S: Data<Elem = f64>,
{
    let nodes = square_dim(matrix)?;
    let total = possible_edges(nodes) as f64;

    let mut ranked: Vec<(usize, usize, f64)> = lower_triangle(matrix)
        .filter(|(_, _, w)| !w.is_nan())
        .collect();
    ranked.sort_by(|a, b| b.2.total_cmp(&a.2));

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (row, col, weight))| CostLookupEntry {
            row,
            col,
            weight,
            cost: (rank + 1) as f64 / total,
        })
        .collect())
}

/// Symmetric boolean adjacency of the non-zero lower-triangle entries of a
/// thresholded matrix.
pub fn binarize<S>(matrix: &ArrayBase<S, Ix2>) -> Result<Array2<bool>>
where
    S: Data<Elem = f64>,
{
    let nodes = square_dim(matrix)?;
    let mut out = Array2::from_elem((nodes, nodes), false);
    for (i, j, w) in lower_triangle(matrix) {
        if w != 0.0 && !w.is_nan() {
            out[[i, j]] = true;
            out[[j, i]] = true;
        }
    }
    Ok(out)
}

/// Fraction of possible edges present in a boolean adjacency matrix.
/// Only the strictly-lower triangle is counted.
pub fn true_cost<S>(adjacency: &ArrayBase<S, Ix2>) -> Result<f64>
where
    S: Data<Elem = bool>,
{
    let (rows, cols) = adjacency.dim();
    if rows != cols {
        return Err(ShapeError::NotSquare { rows, cols }.into());
    }
    let total = possible_edges(rows);
    if total == 0 {
        return Err(BrainxError::PreconditionViolation(format!(
            "a graph of {rows} nodes has no possible edges"
        )));
    }

    let present = (1..rows)
        .flat_map(|i| (0..i).map(move |j| (i, j)))
        .filter(|&(i, j)| adjacency[[i, j]])
        .count();
    Ok(present as f64 / total as f64)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

pub(crate) fn check_cost(cost: f64) -> Result<()> {
    if (0.0..=1.0).contains(&cost) {
        Ok(())
    } else {
        Err(BrainxError::PreconditionViolation(format!(
            "cost must lie in [0, 1], got {cost}"
        )))
    }
}

fn square_dim<S>(matrix: &ArrayBase<S, Ix2>) -> Result<usize>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(ShapeError::NotSquare { rows, cols }.into());
    }
    Ok(rows)
}

/// Strictly-lower entries as `(row, col, weight)` in row-major order.
fn lower_triangle<S>(matrix: &ArrayBase<S, Ix2>) -> impl Iterator<Item = (usize, usize, f64)> + '_
where
    S: Data<Elem = f64>,
{
    let nodes = matrix.nrows();
    (1..nodes).flat_map(move |i| (0..i).map(move |j| (i, j, matrix[[i, j]])))
}
