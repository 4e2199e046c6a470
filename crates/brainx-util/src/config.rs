//! # Cost Schedule Configuration
//!
//! Analyses usually threshold each matrix at a list of costs rather than
//! one. A [`CostSchedule`] records that list (and optionally the
//! possible-edge count) so it can live in a YAML file next to the rest of
//! an analysis configuration:
//!
//! ```yaml
//! costs: [0.05, 0.1, 0.2]
//! possible_edges: 4005   # optional
//! ```

use ndarray::{ArrayBase, Data, Ix2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use brainx_core::{possible_edges, BrainxError, Result};

use crate::cost::{apply_cost, check_cost, Thresholded};

/// Costs to sweep a weighted matrix through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostSchedule {
    /// Target cost fractions, each in `[0, 1]`.
    pub costs: Vec<f64>,
    /// Possible-edge count passed to [`apply_cost`]. When absent it is
    /// derived from the matrix as `n * (n - 1) / 2`, which assumes a full
    /// graph.
    #[serde(default)]
    pub possible_edges: Option<usize>,
}

impl CostSchedule {
    /// Parse and validate a schedule from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let schedule: Self =
            serde_yaml::from_str(yaml).map_err(|e| BrainxError::Config(e.to_string()))?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check that the schedule is non-empty, every cost lies in `[0, 1]`,
    /// and an explicit possible-edge count is positive.
    pub fn validate(&self) -> Result<()> {
        if self.costs.is_empty() {
            return Err(BrainxError::Config("cost schedule is empty".into()));
        }
        for &cost in &self.costs {
            check_cost(cost).map_err(|e| BrainxError::Config(e.to_string()))?;
        }
        if self.possible_edges == Some(0) {
            return Err(BrainxError::Config("possible_edges must be positive".into()));
        }
        Ok(())
    }
}

/// Threshold `matrix` at every cost in `schedule`, in schedule order.
pub fn apply_cost_schedule<S>(
    matrix: &ArrayBase<S, Ix2>,
    schedule: &CostSchedule,
) -> Result<Vec<Thresholded>>
where
    S: Data<Elem = f64>,
{
    schedule.validate()?;
    let edges = schedule
        .possible_edges
        .unwrap_or_else(|| possible_edges(matrix.nrows()));

    debug!(
        costs = schedule.costs.len(),
        possible_edges = edges,
        "applying cost schedule"
    );
    schedule
        .costs
        .iter()
        .map(|&cost| apply_cost(matrix, cost, edges))
        .collect()
}
