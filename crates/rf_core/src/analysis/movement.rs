//! Movement-Probability Matrix
//!
//! Per-starting-rank probability distribution over transition categories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::transition::Transition;
use crate::error::{EvalError, Result};
use crate::table::ObservationTable;

/// Mapping from starting rank to a probability row over the four transition
/// categories, in `Transition::ALL` order. Keys ascend.
///
/// Ranks with zero observed transitions are excluded rather than emitted as
/// NaN rows; comparison code must not treat a missing rank as zero
/// divergence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementMatrix {
    rows: BTreeMap<u32, [f64; Transition::COUNT]>,
}

impl MovementMatrix {
    /// Build from already-normalized probability rows, e.g. produced by a
    /// simulation collaborator.
    ///
    /// # Errors
    /// `InvalidValue` when a row does not sum to 1 within `tolerance`.
    pub fn from_probability_rows(
        rows: BTreeMap<u32, [f64; Transition::COUNT]>,
        tolerance: f64,
    ) -> Result<Self> {
        for (rank, row) in &rows {
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > tolerance {
                return Err(EvalError::InvalidValue {
                    column: "movement row".to_string(),
                    detail: format!("rank {rank} probabilities sum to {sum}, expected 1"),
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &BTreeMap<u32, [f64; Transition::COUNT]> {
        &self.rows
    }

    /// Probability row for one starting rank, if observed.
    pub fn row(&self, rank: u32) -> Option<&[f64; Transition::COUNT]> {
        self.rows.get(&rank)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ranks with at least one observed transition, ascending.
    pub fn ranks(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }
}

/// Estimate the movement-probability matrix from an observation table.
///
/// Observations are walked in (item, period) order; each one pairs with the
/// item's chronologically next rank (absent for the item's last
/// observation), classifies through [`Transition::classify`], and the label
/// counts per starting rank are normalized into probability rows.
///
/// # Errors
/// `InsufficientData` when the table is empty.
pub fn movement_matrix(table: &ObservationTable) -> Result<MovementMatrix> {
    if table.is_empty() {
        return Err(EvalError::InsufficientData {
            what: "movement matrix",
            needed: 1,
            found: 0,
        });
    }

    debug!(rows = table.len(), "estimating movement matrix");

    let sorted = table.rows_sorted_by_item_period();
    let mut counts: BTreeMap<u32, [u32; Transition::COUNT]> = BTreeMap::new();

    for (i, obs) in sorted.iter().enumerate() {
        let next_rank = sorted
            .get(i + 1)
            .filter(|next| next.item == obs.item)
            .map(|next| next.rank);
        let label = Transition::classify(obs.rank, next_rank);
        counts.entry(obs.rank).or_insert([0; Transition::COUNT])[label.index()] += 1;
    }

    let mut rows = BTreeMap::new();
    for (rank, row_counts) in counts {
        let total: u32 = row_counts.iter().sum();
        if total == 0 {
            // Normalizing would divide by zero; the rank carries no signal.
            warn!(rank, "excluding rank with zero observed transitions");
            continue;
        }
        let mut row = [0.0; Transition::COUNT];
        for (cell, &count) in row.iter_mut().zip(row_counts.iter()) {
            *cell = count as f64 / total as f64;
        }
        rows.insert(rank, row);
    }

    Ok(MovementMatrix { rows })
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
    fn test_rows_sum_to_one() {
        let t = table(&[
            ("A", 1, 1),
            ("A", 2, 2),
            ("A", 3, 1),
            ("B", 1, 2),
            ("B", 2, 1),
            ("C", 2, 3),
        ]);
        let matrix = movement_matrix(&t).unwrap();

        for (rank, row) in matrix.rows() {
            let sum: f64 = row.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "rank {rank} row sums to {sum}, expected 1"
            );
        }
    }

    #[test]
    fn test_known_transitions() {
        // A: rank 1 -> 2 (decrease), rank 2 -> exit
        // B: rank 2 -> 2 (same), rank 2 -> exit
        let t = table(&[("A", 1, 1), ("A", 2, 2), ("B", 1, 2), ("B", 2, 2)]);
        let matrix = movement_matrix(&t).unwrap();

        let rank1 = matrix.row(1).expect("rank 1 observed");
        assert_eq!(rank1[Transition::Decrease.index()], 1.0);

        // Rank 2 saw: same (B p1->p2), exit (A p2), exit (B p2)
        let rank2 = matrix.row(2).expect("rank 2 observed");
        assert!((rank2[Transition::Same.index()] - 1.0 / 3.0).abs() < 1e-9);
        assert!((rank2[Transition::Exit.index()] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_observation_is_exit() {
        let t = table(&[("A", 1, 4)]);
        let matrix = movement_matrix(&t).unwrap();

        let row = matrix.row(4).expect("rank 4 observed");
        assert_eq!(row[Transition::Exit.index()], 1.0);
    }

    #[test]
    fn test_unobserved_rank_absent() {
        let t = table(&[("A", 1, 1), ("A", 2, 1)]);
        let matrix = movement_matrix(&t).unwrap();

        assert!(matrix.row(5).is_none(), "rank 5 was never observed");
        assert_eq!(matrix.ranks().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = movement_matrix(&table(&[])).unwrap_err();
        assert!(matches!(err, EvalError::InsufficientData { .. }));
    }

    #[test]
    fn test_from_probability_rows_validates_sum() {
        let mut rows = BTreeMap::new();
        rows.insert(1, [0.5, 0.5, 0.0, 0.0]);
        assert!(MovementMatrix::from_probability_rows(rows.clone(), 1e-9).is_ok());

        rows.insert(2, [0.5, 0.5, 0.5, 0.0]);
        let err = MovementMatrix::from_probability_rows(rows, 1e-9).unwrap_err();
        assert!(matches!(err, EvalError::InvalidValue { .. }));
    }
}
