//! Observation Table - Immutable Snapshot of Ranked-List Observations
//!
//! The evaluation input: which item held which rank in which period.
//! Tables are built once from upstream records and never mutated; every
//! aggregator reads the same snapshot.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Field-name descriptor for incoming records.
///
/// Upstream ingestion delivers generic named records; the schema names which
/// fields carry the item identifier, the period identifier, and the rank.
/// Validation happens once, when the table is built, so aggregators never
/// look up column names dynamically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub item: String,
    pub period: String,
    pub rank: String,
}

impl TableSchema {
    pub fn new(item: &str, period: &str, rank: &str) -> Self {
        Self {
            item: item.to_string(),
            period: period.to_string(),
            rank: rank.to_string(),
        }
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::new("item", "period", "rank")
    }
}

/// One observation: `item` held `rank` during `period`.
///
/// Periods are totally ordered but need not be contiguous (e.g. ISO week
/// numbers with gaps). Smaller rank is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub item: String,
    pub period: i64,
    pub rank: u32,
}

impl Observation {
    pub fn new(item: &str, period: i64, rank: u32) -> Self {
        Self {
            item: item.to_string(),
            period,
            rank,
        }
    }
}

/// Immutable set of observations for one evaluation pass.
///
/// The contract assumes at most one rank per (item, period) pair; rank
/// uniqueness within a period is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Build from already-typed rows.
    pub fn from_rows(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Build from generic named records (parsed JSON objects), validating
    /// the schema up front.
    ///
    /// # Errors
    /// - `MissingColumn` if a record lacks one of the schema's fields
    /// - `InvalidValue` if a field is present but has the wrong type
    pub fn from_records(records: &[serde_json::Value], schema: &TableSchema) -> Result<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let item = required_field(record, &schema.item)?;
            let item = item
                .as_str()
                .ok_or_else(|| EvalError::InvalidValue {
                    column: schema.item.clone(),
                    detail: format!("expected string, got {item}"),
                })?
                .to_string();

            let period = required_field(record, &schema.period)?;
            let period = period.as_i64().ok_or_else(|| EvalError::InvalidValue {
                column: schema.period.clone(),
                detail: format!("expected integer, got {period}"),
            })?;

            let rank = required_field(record, &schema.rank)?;
            let rank = rank
                .as_u64()
                .filter(|&r| r >= 1 && r <= u32::MAX as u64)
                .ok_or_else(|| EvalError::InvalidValue {
                    column: schema.rank.clone(),
                    detail: format!("expected positive integer, got {rank}"),
                })? as u32;

            rows.push(Observation { item, period, rank });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct item identifiers, ascending.
    pub fn distinct_items(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.item.as_str()).collect()
    }

    /// Distinct period identifiers, ascending.
    pub fn distinct_periods(&self) -> Vec<i64> {
        let periods: BTreeSet<i64> = self.rows.iter().map(|r| r.period).collect();
        periods.into_iter().collect()
    }

    /// Items present in one period.
    pub fn items_in_period(&self, period: i64) -> HashSet<&str> {
        self.rows
            .iter()
            .filter(|r| r.period == period)
            .map(|r| r.item.as_str())
            .collect()
    }

    /// Row references sorted by (item, period), the order the movement
    /// estimator walks to pair each observation with its successor.
    pub fn rows_sorted_by_item_period(&self) -> Vec<&Observation> {
        let mut sorted: Vec<&Observation> = self.rows.iter().collect();
        sorted.sort_by(|a, b| a.item.cmp(&b.item).then(a.period.cmp(&b.period)));
        sorted
    }
}

fn required_field<'a>(record: &'a serde_json::Value, column: &str) -> Result<&'a serde_json::Value> {
    record.get(column).ok_or_else(|| EvalError::MissingColumn {
        column: column.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_records_valid() {
        let records = vec![
            json!({"item": "A", "period": 1, "rank": 3}),
            json!({"item": "B", "period": 1, "rank": 1}),
        ];
        let table = ObservationTable::from_records(&records, &TableSchema::default()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], Observation::new("A", 1, 3));
    }

    #[test]
    fn test_from_records_custom_schema() {
        let records = vec![json!({"track": "A", "week": 202401, "position": 5})];
        let schema = TableSchema::new("track", "week", "position");
        let table = ObservationTable::from_records(&records, &schema).unwrap();

        assert_eq!(table.rows()[0], Observation::new("A", 202401, 5));
    }

    #[test]
    fn test_from_records_missing_column() {
        let records = vec![json!({"item": "A", "rank": 3})];
        let err = ObservationTable::from_records(&records, &TableSchema::default()).unwrap_err();

        assert!(
            matches!(&err, EvalError::MissingColumn { column } if column == "period"),
            "expected MissingColumn(period), got {err:?}"
        );
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_from_records_rejects_rank_zero() {
        let records = vec![json!({"item": "A", "period": 1, "rank": 0})];
        let err = ObservationTable::from_records(&records, &TableSchema::default()).unwrap_err();

        assert!(matches!(err, EvalError::InvalidValue { .. }));
    }

    #[test]
    fn test_distinct_periods_sorted_with_gaps() {
        let table = ObservationTable::from_rows(vec![
            Observation::new("A", 7, 1),
            Observation::new("B", 3, 2),
            Observation::new("A", 3, 1),
        ]);

        assert_eq!(table.distinct_periods(), vec![3, 7]);
        assert_eq!(table.distinct_items().len(), 2);
    }

    #[test]
    fn test_items_in_period() {
        let table = ObservationTable::from_rows(vec![
            Observation::new("A", 1, 1),
            Observation::new("B", 1, 2),
            Observation::new("A", 2, 1),
        ]);

        let items = table.items_in_period(1);
        assert!(items.contains("A") && items.contains("B"));
        assert_eq!(table.items_in_period(2).len(), 1);
    }
}
