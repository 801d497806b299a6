//! # Analysis Module
//!
//! Aggregation of ranked-list dynamics into empirical distributions.
//!
//! - `transition` - Transition classification (increase/same/decrease/exit)
//! - `dwell` - Dwell-time distribution (periods spent on the list)
//! - `churn` - Period-over-period churn sequence
//! - `movement` - Per-rank movement-probability matrix
//!
//! Each aggregator is a pure function of an [`ObservationTable`] snapshot:
//! no shared state, no mutation of caller data, result keys in ascending
//! order.
//!
//! [`ObservationTable`]: crate::table::ObservationTable

pub mod churn;
pub mod dwell;
pub mod movement;
pub mod transition;

pub use churn::{churn_sequence, ChurnSequence};
pub use dwell::{dwell_distribution, DwellDistribution};
pub use movement::{movement_matrix, MovementMatrix};
pub use transition::Transition;
