//! # Partition Validation
//!
//! A partition maps each module (community) key to its member nodes.
//! Modularity and related statistics are undefined for a partition with an
//! empty module, so one is reported as invalid data rather than skipped.

use std::collections::BTreeMap;

use brainx_core::{BrainxError, Result};

/// Module key → member nodes.
pub type Partition = BTreeMap<usize, Vec<usize>>;

/// Fail if any module of `partition` has no members.
///
/// # Errors
///
/// [`BrainxError::InvalidPartition`] naming the lowest-keyed empty module.
pub fn assert_no_empty_modules(partition: &Partition) -> Result<()> {
    match partition.iter().find(|(_, members)| members.is_empty()) {
        Some((module, _)) => Err(BrainxError::InvalidPartition {
            module: module.to_string(),
        }),
        None => Ok(()),
    }
}
