//! Period-over-Period Churn
//!
//! Counts items that vanish from the list between adjacent periods.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EvalError, Result};
use crate::table::ObservationTable;

/// Ordered churn counts, one entry per consecutive pair of distinct periods
/// present in the data. Length is always `distinct periods - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnSequence {
    counts: Vec<u32>,
}

impl ChurnSequence {
    /// Build directly from per-pair counts, e.g. produced by a simulation
    /// collaborator.
    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts as a scalar sequence for goodness-of-fit testing.
    pub fn as_f64(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }
}

/// Count items present in each period but absent from the next.
///
/// Periods are taken in ascending order; gaps between period identifiers do
/// not matter, only adjacency in the sorted distinct sequence.
///
/// # Errors
/// `InsufficientData` when the table holds fewer than two distinct periods.
/// An empty sequence is never returned for that case: silent emptiness would
/// be indistinguishable from a genuine zero-churn observation.
pub fn churn_sequence(table: &ObservationTable) -> Result<ChurnSequence> {
    let periods = table.distinct_periods();
    if periods.len() < 2 {
        return Err(EvalError::InsufficientData {
            what: "churn sequence",
            needed: 2,
            found: periods.len(),
        });
    }

    debug!(
        periods = periods.len(),
        rows = table.len(),
        "aggregating churn sequence"
    );

    let counts = periods
        .windows(2)
        .map(|pair| {
            let earlier = table.items_in_period(pair[0]);
            let later = table.items_in_period(pair[1]);
            earlier.difference(&later).count() as u32
        })
        .collect();

    Ok(ChurnSequence { counts })
}
