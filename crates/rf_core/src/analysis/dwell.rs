//! Dwell-Time Distribution
//!
//! How long items stay on the ranked list, measured in distinct periods.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EvalError, Result};
use crate::table::ObservationTable;

/// Mapping from dwell length (distinct periods an item appears in) to the
/// number of items with that dwell length. Keys ascend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellDistribution {
    counts: BTreeMap<u32, u32>,
}

impl DwellDistribution {
    /// Build directly from a dwell-length histogram, e.g. one produced by a
    /// simulation collaborator.
    pub fn from_counts(counts: BTreeMap<u32, u32>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &BTreeMap<u32, u32> {
        &self.counts
    }

    /// Number of items with the given dwell length.
    pub fn get(&self, dwell: u32) -> u32 {
        self.counts.get(&dwell).copied().unwrap_or(0)
    }

    /// Total items across all dwell lengths. Equals the number of distinct
    /// items in the table the distribution was built from.
    pub fn total_items(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outer-join alignment with another distribution: the union of dwell
    /// lengths in ascending order, count columns zero-filled where a length
    /// is present on one side only.
    pub fn aligned_counts(&self, other: &DwellDistribution) -> (Vec<f64>, Vec<f64>) {
        let keys: BTreeSet<u32> = self
            .counts
            .keys()
            .chain(other.counts.keys())
            .copied()
            .collect();

        let left = keys.iter().map(|k| self.get(*k) as f64).collect();
        let right = keys.iter().map(|k| other.get(*k) as f64).collect();
        (left, right)
    }
}

/// Tabulate how many items share each dwell length.
///
/// Duplicate rows for the same (item, period) pair count once. Input row
/// order does not matter.
///
/// # Errors
/// `InsufficientData` when the table holds zero distinct items; an empty
/// histogram would be indistinguishable from a real single-bucket one.
pub fn dwell_distribution(table: &ObservationTable) -> Result<DwellDistribution> {
    let mut periods_per_item: HashMap<&str, BTreeSet<i64>> = HashMap::new();
    for row in table.rows() {
        periods_per_item
            .entry(row.item.as_str())
            .or_default()
            .insert(row.period);
    }

    if periods_per_item.is_empty() {
        return Err(EvalError::InsufficientData {
            what: "dwell distribution",
            needed: 1,
            found: 0,
        });
    }

    debug!(
        items = periods_per_item.len(),
        rows = table.len(),
        "aggregating dwell distribution"
    );

    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for periods in periods_per_item.values() {
        *counts.entry(periods.len() as u32).or_insert(0) += 1;
    }

    Ok(DwellDistribution { counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Observation;

    fn table(rows: &[(&str, i64, u32)]) -> ObservationTable {
        ObservationTable::from_rows(
            rows.iter()
                .map(|&(item, period, rank)| Observation::new(item, period, rank))
                .collect(),
        )
    }

    #[test]
    fn test_dwell_counts_distinct_periods() {
        let t = table(&[
            ("A", 1, 1),
            ("A", 2, 2),
            ("A", 3, 3),
            ("B", 1, 2),
            ("B", 2, 1),
            ("C", 2, 3),
        ]);
        let dist = dwell_distribution(&t).unwrap();

        // A stays 3 periods, B stays 2, C stays 1
        assert_eq!(dist.get(3), 1);
        assert_eq!(dist.get(2), 1);
        assert_eq!(dist.get(1), 1);
        assert_eq!(dist.total_items(), 3);
    }

    #[test]
    fn test_dwell_duplicate_item_period_counts_once() {
        let t = table(&[("A", 1, 1), ("A", 1, 1), ("A", 2, 2)]);
        let dist = dwell_distribution(&t).unwrap();

        assert_eq!(dist.get(2), 1, "duplicate rows must not inflate dwell");
        assert_eq!(dist.get(1), 0);
    }

    #[test]
    fn test_dwell_sum_equals_distinct_items() {
        let t = table(&[("A", 1, 1), ("B", 1, 2), ("B", 5, 1), ("C", 5, 2)]);
        let dist = dwell_distribution(&t).unwrap();

        assert_eq!(dist.total_items() as usize, t.distinct_items().len());
    }

    #[test]
    fn test_dwell_empty_table_is_error() {
        let err = dwell_distribution(&table(&[])).unwrap_err();
        assert!(
            matches!(err, EvalError::InsufficientData { found: 0, .. }),
            "expected InsufficientData, got {err:?}"
        );
    }

    #[test]
    fn test_aligned_counts_disjoint_keys() {
        let a = DwellDistribution::from_counts([(1, 5)].into());
        let b = DwellDistribution::from_counts([(2, 3)].into());

        let (left, right) = a.aligned_counts(&b);
        assert_eq!(left, vec![5.0, 0.0]);
        assert_eq!(right, vec![0.0, 3.0]);
    }
}
