//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout brainx. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Index errors carry the axis name, the offending index, and the axis
//!   length.
//! - Shape errors carry the observed shape so the caller can see which
//!   input was malformed.
//! - Precondition errors describe the violated bound in plain words.
//!
//! Every operation either returns its full result or one of these errors.
//! There is no partial output.

use thiserror::Error;

/// Convenience alias used by every fallible brainx operation.
pub type Result<T> = std::result::Result<T, BrainxError>;

/// Top-level error type for brainx.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrainxError {
    /// A leading tensor index was equal to or beyond its axis length.
    #[error("index {index} is out of range for {axis} axis of length {len}")]
    IndexOutOfRange {
        /// Axis name (`subject`, `block`, or `subcond`).
        axis: &'static str,
        /// The requested index.
        index: usize,
        /// Length of the axis.
        len: usize,
    },

    /// An enumerated argument (e.g. a normalize mode or its range) was not
    /// recognized or not usable.
    #[error("invalid range argument: {0}")]
    InvalidRangeArgument(String),

    /// A community partition contains a module with no members.
    #[error("invalid partition: module {module} is empty")]
    InvalidPartition {
        /// Key of the first empty module.
        module: String,
    },

    /// A documented precondition of an operation does not hold.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// Array shape does not match what the operation requires.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Graph construction rejected an edge.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration could not be parsed or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Error describing a malformed array shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Only rank-4 and rank-5 tensors carry slice indices.
    #[error("unsupported tensor rank {rank}; expected 4 or 5")]
    UnsupportedRank {
        /// Observed rank.
        rank: usize,
    },

    /// The supplied index does not match the tensor's rank (a sub-condition
    /// index is required for rank 5 and forbidden for rank 4).
    #[error("tensor of rank {rank} cannot be indexed with {indices} leading indices")]
    RankMismatch {
        /// Observed rank.
        rank: usize,
        /// Number of leading indices supplied.
        indices: usize,
    },

    /// The matrix (or the trailing two tensor axes) is not square.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// A slice being embedded does not match the tensor's trailing axes.
    #[error("slice of shape {actual:?} does not fit trailing axes {expected:?}")]
    SliceShape {
        /// Trailing `(nodes, nodes)` of the tensor.
        expected: (usize, usize),
        /// Shape of the supplied slice.
        actual: (usize, usize),
    },
}

/// Error raised while adding edges to a [`crate::Graph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An endpoint is not in `0..nodes`.
    #[error("node {node} is out of range for a graph of {nodes} nodes")]
    NodeOutOfRange {
        /// The offending endpoint.
        node: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },

    /// Self-loops carry no meaning in a connectivity graph.
    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_names_axis_and_bounds() {
        let err = BrainxError::IndexOutOfRange {
            axis: "subject",
            index: 20,
            len: 20,
        };
        assert_eq!(
            err.to_string(),
            "index 20 is out of range for subject axis of length 20"
        );
    }

    #[test]
    fn shape_error_converts_into_top_level() {
        let err: BrainxError = ShapeError::NotSquare { rows: 3, cols: 4 }.into();
        assert!(matches!(
            err,
            BrainxError::Shape(ShapeError::NotSquare { rows: 3, cols: 4 })
        ));
        assert!(err.to_string().contains("3x4"));
    }

    #[test]
    fn graph_error_converts_into_top_level() {
        let err: BrainxError = GraphError::SelfLoop(2).into();
        assert_eq!(err.to_string(), "graph error: self-loop on node 2 is not allowed");
    }
}
