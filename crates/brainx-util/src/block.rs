//! # Block-Diagonal Stacking
//!
//! Places an ordered sequence of 2-D matrices along the diagonal of a
//! larger zero matrix, e.g. to analyse several subjects' or conditions'
//! matrices jointly. Blocks may be non-square and of differing sizes.

use ndarray::{s, Array2, ArrayBase, Data, Ix2};
use tracing::trace;

/// Stack `blocks` into one block-diagonal matrix.
///
/// The output has shape `(Σ rows_i, Σ cols_i)`. Block `i` is copied
/// verbatim at row offset `Σ_{j<i} rows_j` and column offset
/// `Σ_{j<i} cols_j`; every other cell is zero. An empty sequence yields a
/// `0×0` matrix.
pub fn diag_stack<S>(blocks: &[ArrayBase<S, Ix2>]) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let rows: usize = blocks.iter().map(|b| b.nrows()).sum();
    let cols: usize = blocks.iter().map(|b| b.ncols()).sum();
    let mut out = Array2::zeros((rows, cols));

    let (mut r, mut c) = (0, 0);
    for block in blocks {
        let (h, w) = block.dim();
        out.slice_mut(s![r..r + h, c..c + w]).assign(block);
        r += h;
        c += w;
    }

    trace!(blocks = blocks.len(), rows, cols, "stacked block-diagonal matrix");
    out
}
