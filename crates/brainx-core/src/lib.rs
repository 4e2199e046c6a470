//! # brainx-core — Foundational Types for brainx
//!
//! This crate defines the primitives shared by every brainx utility:
//!
//! - **Errors** (`error.rs`): `BrainxError`, the single error type returned
//!   by fallible operations, with `ShapeError` and `GraphError` sub-enums.
//!
//! - **Graph** (`graph.rs`): an undirected, optionally weighted graph over
//!   `0..nodes`. Both thresholded connectivity matrices and synthetic
//!   reference lattices are expressed as a `Graph`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `brainx-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod graph;

// Re-export primary types for ergonomic imports.
pub use error::{BrainxError, GraphError, Result, ShapeError};
pub use graph::{possible_edges, Graph, WeightedEdge};
