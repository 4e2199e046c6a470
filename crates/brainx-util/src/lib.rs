//! # brainx-util — Matrix and Graph Utilities for Connectivity Analysis
//!
//! Pure functions over dense connectivity data:
//!
//! - **Slicing** (`slice.rs`): extract one `(nodes, nodes)` matrix from a
//!   rank-4 `(blocks, subjects, n, n)` or rank-5
//!   `(subcond, blocks, subjects, n, n)` tensor, and embed one back.
//!
//! - **Cost thresholding** (`cost.rs`): keep the strongest fraction of
//!   possible edges of a symmetric weighted matrix. Edges tied with the
//!   boundary weight are always kept together.
//!
//! - **Ring lattices** (`lattice.rs`): deterministic k-regular reference
//!   graphs used as null models.
//!
//! - **Block-diagonal stacking** (`block.rs`): combine per-subject or
//!   per-condition matrices for joint analysis.
//!
//! - **Partitions** (`partition.rs`), **scaling** (`scale.rs`), the
//!   deprecated **legacy cost table** (`legacy.rs`), and YAML-loadable
//!   **cost schedules** (`config.rs`).
//!
//! ## Data Flow
//!
//! ```text
//! tensor ──slice_data──▶ matrix ──apply_cost──▶ thresholded
//!                                                   │
//!                                 Graph::from_lower_triangle
//!                                                   ▼
//!        regular_lattice(n, k) ──▶ reference ◀──compare──▶ graph
//! ```
//!
//! Every operation returns a fresh value and leaves its inputs untouched.
//! There is no shared state, so callers may run independent subjects or
//! blocks in parallel.

pub mod block;
pub mod config;
pub mod cost;
pub mod lattice;
pub mod legacy;
pub mod partition;
pub mod scale;
pub mod slice;

// Re-export primary types.
pub use block::diag_stack;
pub use config::{apply_cost_schedule, CostSchedule};
pub use cost::{
    all_positive, apply_cost, binarize, cost_lookup, target_edge_count, true_cost,
    CostLookupEntry, Thresholded,
};
pub use lattice::regular_lattice;
pub use legacy::{CostTable, Deprecated};
pub use partition::{assert_no_empty_modules, Partition};
pub use scale::{normalize, rescale, NormalizeMode};
pub use slice::{embed_slice, slice_data, SliceIndex};

pub use brainx_core::{possible_edges, BrainxError, Graph, Result};
