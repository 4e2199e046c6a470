//! # Tensor Slicing
//!
//! Pulls a single `(nodes, nodes)` connectivity matrix out of a stacked
//! correlation tensor, and writes one back.
//!
//! ## Axis Layout
//!
//! | Rank | Shape | Index order |
//! |------|-------|-------------|
//! | 4 | `(blocks, subjects, nodes, nodes)` | `(subject, block)` |
//! | 5 | `(subcond, blocks, subjects, nodes, nodes)` | `(subject, block, subcond)` |
//!
//! Indices are bounds-checked against their axis; there is no wraparound.

use ndarray::{Array2, ArrayBase, ArrayD, Axis, Data, Ix2, IxDyn};
use serde::{Deserialize, Serialize};

use brainx_core::{BrainxError, Result, ShapeError};

// ---------------------------------------------------------------------------
// SliceIndex
// ---------------------------------------------------------------------------

/// Leading indices selecting one matrix from a stacked tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceIndex {
    /// Subject index.
    pub subject: usize,
    /// Block index.
    pub block: usize,
    /// Sub-condition index. Required for rank-5 tensors only.
    #[serde(default)]
    pub subcond: Option<usize>,
}

impl SliceIndex {
    /// Index into a rank-4 tensor.
    pub fn new(subject: usize, block: usize) -> Self {
        Self {
            subject,
            block,
            subcond: None,
        }
    }

    /// Add a sub-condition index, for rank-5 tensors.
    pub fn with_subcondition(self, subcond: usize) -> Self {
        Self {
            subcond: Some(subcond),
            ..self
        }
    }

    /// Validate against `shape` and return the leading indices in tensor
    /// axis order (outermost first).
    fn resolve(&self, shape: &[usize]) -> Result<Vec<usize>> {
        let rank = shape.len();
        let axes: Vec<(&'static str, usize)> = match (rank, self.subcond) {
            (4, None) => vec![("block", self.block), ("subject", self.subject)],
            (5, Some(subcond)) => vec![
                ("subcond", subcond),
                ("block", self.block),
                ("subject", self.subject),
            ],
            (4, Some(_)) => return Err(ShapeError::RankMismatch { rank, indices: 3 }.into()),
            (5, None) => return Err(ShapeError::RankMismatch { rank, indices: 2 }.into()),
            _ => return Err(ShapeError::UnsupportedRank { rank }.into()),
        };

        let (rows, cols) = (shape[rank - 2], shape[rank - 1]);
        if rows != cols {
            return Err(ShapeError::NotSquare { rows, cols }.into());
        }

        for (position, &(axis, index)) in axes.iter().enumerate() {
            let len = shape[position];
            if index >= len {
                return Err(BrainxError::IndexOutOfRange { axis, index, len });
            }
        }

        Ok(axes.into_iter().map(|(_, index)| index).collect())
    }
}

// ---------------------------------------------------------------------------
// slice_data / embed_slice
// ---------------------------------------------------------------------------

/// Return an owned copy of the `(nodes, nodes)` matrix at `index`.
///
/// # Errors
///
/// - [`BrainxError::IndexOutOfRange`] when any index is `>=` its axis length.
/// - [`ShapeError::UnsupportedRank`] for tensors that are not rank 4 or 5.
/// - [`ShapeError::RankMismatch`] when the presence of `subcond` does not
///   match the rank.
/// - [`ShapeError::NotSquare`] when the trailing axes differ.
pub fn slice_data<S>(tensor: &ArrayBase<S, IxDyn>, index: SliceIndex) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let leading = index.resolve(tensor.shape())?;

    let mut view = tensor.view();
    for i in leading {
        view = view.index_axis_move(Axis(0), i);
    }
    let matrix = view
        .into_dimensionality::<Ix2>()
        .map_err(|_| ShapeError::UnsupportedRank {
            rank: tensor.ndim(),
        })?;
    Ok(matrix.to_owned())
}

/// Return a copy of `tensor` with `slice` written at `index`.
///
/// The inverse of [`slice_data`]: slicing the result at the same index
/// yields `slice` exactly. The input tensor is left untouched.
pub fn embed_slice<S, T>(
    tensor: &ArrayBase<S, IxDyn>,
    index: SliceIndex,
    slice: &ArrayBase<T, Ix2>,
) -> Result<ArrayD<f64>>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    let leading = index.resolve(tensor.shape())?;
    let nodes = tensor.shape()[tensor.ndim() - 1];
    if slice.dim() != (nodes, nodes) {
        return Err(ShapeError::SliceShape {
            expected: (nodes, nodes),
            actual: slice.dim(),
        }
        .into());
    }

    let mut out = tensor.to_owned();
    {
        let mut view = out.view_mut();
        for i in leading {
            view = view.index_axis_move(Axis(0), i);
        }
        let mut target = view
            .into_dimensionality::<Ix2>()
            .map_err(|_| ShapeError::UnsupportedRank {
                rank: tensor.ndim(),
            })?;
        target.assign(slice);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array4, Array5};

    /// Tensor whose every element encodes its own position, so slices
    /// can be checked by value rather than only by shape.
    fn positional_4d(blocks: usize, subjects: usize, nodes: usize) -> ArrayD<f64> {
        Array4::from_shape_fn((blocks, subjects, nodes, nodes), |(b, s, i, j)| {
            (b * 1000 + s * 100 + i * 10 + j) as f64
        })
        .into_dyn()
    }

    #[test]
    fn slices_have_node_by_node_shape() {
        let (subcond, blocks, subjects, nodes) = (5, 10, 20, 4);
        let data_4d = Array4::<f64>::ones((blocks, subjects, nodes, nodes)).into_dyn();
        let data_5d = Array5::<f64>::ones((subcond, blocks, subjects, nodes, nodes)).into_dyn();

        let sym_4d = slice_data(&data_4d, SliceIndex::new(subjects - 1, blocks - 1)).unwrap();
        let sym_5d = slice_data(
            &data_5d,
            SliceIndex::new(subjects - 1, blocks - 1).with_subcondition(subcond - 1),
        )
        .unwrap();

        assert_eq!(sym_4d.dim(), (nodes, nodes));
        assert_eq!(sym_5d.dim(), (nodes, nodes));
    }

    #[test]
    fn rank_four_selects_block_then_subject() {
        let data = positional_4d(3, 2, 3);
        let m = slice_data(&data, SliceIndex::new(1, 2)).unwrap();
        assert_eq!(m[[0, 0]], 2100.0);
        assert_eq!(m[[2, 1]], 2121.0);
    }

    #[test]
    fn rank_five_selects_subcond_block_subject() {
        let data = Array5::from_shape_fn((2, 3, 4, 2, 2), |(c, b, s, i, j)| {
            (c * 10000 + b * 1000 + s * 100 + i * 10 + j) as f64
        })
        .into_dyn();
        let m = slice_data(&data, SliceIndex::new(3, 2).with_subcondition(1)).unwrap();
        assert_eq!(m[[0, 0]], 12300.0);
        assert_eq!(m[[1, 0]], 12310.0);
    }

    #[test]
    fn out_of_range_subject_fails() {
        let data = positional_4d(10, 20, 4);
        let err = slice_data(&data, SliceIndex::new(20, 0)).unwrap_err();
        assert_eq!(
            err,
            BrainxError::IndexOutOfRange {
                axis: "subject",
                index: 20,
                len: 20
            }
        );
    }

    #[test]
    fn out_of_range_block_fails() {
        let data = positional_4d(10, 20, 4);
        let err = slice_data(&data, SliceIndex::new(0, 10)).unwrap_err();
        assert!(matches!(
            err,
            BrainxError::IndexOutOfRange { axis: "block", index: 10, len: 10 }
        ));
    }

    #[test]
    fn out_of_range_subcond_fails() {
        let data = Array5::<f64>::zeros((5, 10, 20, 4, 4)).into_dyn();
        let err = slice_data(&data, SliceIndex::new(0, 0).with_subcondition(5)).unwrap_err();
        assert!(matches!(
            err,
            BrainxError::IndexOutOfRange { axis: "subcond", index: 5, len: 5 }
        ));
    }

    #[test]
    fn rank_five_without_subcond_is_rejected() {
        let data = Array5::<f64>::zeros((5, 10, 20, 4, 4)).into_dyn();
        let err = slice_data(&data, SliceIndex::new(20, 10)).unwrap_err();
        assert_eq!(
            err,
            BrainxError::Shape(ShapeError::RankMismatch { rank: 5, indices: 2 })
        );
    }

    #[test]
    fn rank_four_with_subcond_is_rejected() {
        let data = positional_4d(2, 2, 2);
        let err = slice_data(&data, SliceIndex::new(0, 0).with_subcondition(0)).unwrap_err();
        assert_eq!(
            err,
            BrainxError::Shape(ShapeError::RankMismatch { rank: 4, indices: 3 })
        );
    }

    #[test]
    fn unsupported_ranks_are_rejected() {
        let data = Array::<f64, _>::zeros((3, 4, 4)).into_dyn();
        let err = slice_data(&data, SliceIndex::new(0, 0)).unwrap_err();
        assert_eq!(err, BrainxError::Shape(ShapeError::UnsupportedRank { rank: 3 }));
    }

    #[test]
    fn non_square_trailing_axes_are_rejected() {
        let data = Array4::<f64>::zeros((2, 2, 3, 4)).into_dyn();
        let err = slice_data(&data, SliceIndex::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            BrainxError::Shape(ShapeError::NotSquare { rows: 3, cols: 4 })
        );
    }

    #[test]
    fn slicing_does_not_mutate_source() {
        let data = positional_4d(2, 2, 3);
        let before = data.clone();
        let _ = slice_data(&data, SliceIndex::new(1, 1)).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn embed_then_slice_round_trips() {
        let source = positional_4d(3, 4, 5);
        let index = SliceIndex::new(2, 1);
        let original = slice_data(&source, index).unwrap();

        let zeros = ArrayD::<f64>::zeros(source.raw_dim());
        let embedded = embed_slice(&zeros, index, &original).unwrap();

        assert_eq!(slice_data(&embedded, index).unwrap(), original);
        // Only the target slice was written.
        assert_eq!(embedded.sum(), original.sum());
        assert_eq!(zeros.sum(), 0.0);
    }

    #[test]
    fn embed_rejects_wrong_slice_shape() {
        let zeros = Array4::<f64>::zeros((2, 2, 3, 3)).into_dyn();
        let slice = Array2::<f64>::ones((2, 2));
        let err = embed_slice(&zeros, SliceIndex::new(0, 0), &slice).unwrap_err();
        assert_eq!(
            err,
            BrainxError::Shape(ShapeError::SliceShape {
                expected: (3, 3),
                actual: (2, 2)
            })
        );
    }

    #[test]
    fn slice_index_deserializes_without_subcond() {
        let index: SliceIndex = serde_yaml::from_str("subject: 3\nblock: 1\n").unwrap();
        assert_eq!(index, SliceIndex::new(3, 1));
    }
}
