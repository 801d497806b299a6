//! # rf_core - Ranked-List Dynamics Evaluation Core
//!
//! Evaluates how well a simulated model of a periodically-refreshed ranked
//! list (e.g. a weekly top-10 chart) reproduces the dynamics observed in
//! real data.
//!
//! The pipeline: an [`ObservationTable`] of (item, period, rank) rows feeds
//! one of three aggregators, producing an empirical distribution; two
//! distributions of the same shape (typically one real, one simulated) feed
//! the comparator, producing a [`FitScore`].
//!
//! ## Features
//! - Dwell-time, churn, and movement-probability aggregation
//! - Shape-tagged distribution comparison (two-sample KS, Jensen-Shannon)
//! - Pure, single-pass, deterministic; no state across calls

pub mod analysis;
pub mod compare;
pub mod error;
pub mod metrics;
pub mod table;

pub use analysis::{
    churn_sequence, dwell_distribution, movement_matrix, ChurnSequence, DwellDistribution,
    MovementMatrix, Transition,
};
pub use compare::{
    compare, compare_keyed, compare_movement, compare_sequences, Distribution, EvalConfig,
    FitScore,
};
pub use error::{EvalError, Result};
pub use metrics::{jensen_shannon, two_sample_ks, KsResult};
pub use table::{Observation, ObservationTable, TableSchema};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
