//! Distribution Comparator
//!
//! Scores how closely two distributions of the same shape agree. The three
//! supported shapes have fundamentally different supports, so each carries
//! its own statistical test:
//!
//! - ordered scalar sequences (churn): two-sample Kolmogorov-Smirnov
//! - rank x category movement matrices: mean Jensen-Shannon divergence
//!   across the full rank domain
//! - sparse keyed counts (dwell): outer join on the key, zero-fill, then
//!   two-sample Kolmogorov-Smirnov
//!
//! The shape is an explicit tag, never inferred from incidental structure;
//! mixed-shape comparisons fail with `ShapeMismatch`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{ChurnSequence, DwellDistribution, MovementMatrix};
use crate::error::{EvalError, Result};
use crate::metrics::{jensen_shannon, two_sample_ks};

/// Comparator configuration.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Size of the ranked list; movement comparison covers ranks
    /// `1..=list_size`.
    pub list_size: u32,
    /// Tolerance for probability-row validation.
    pub float_tolerance: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            list_size: 10,
            float_tolerance: 1e-9,
        }
    }
}

/// Tagged distribution shape accepted by the comparator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    /// Ordered scalar sequence, e.g. a churn sequence.
    Sequence(Vec<f64>),
    /// Rank x transition-category probability matrix.
    Movement(MovementMatrix),
    /// Sparse keyed count distribution, e.g. dwell lengths.
    Keyed(DwellDistribution),
}

impl Distribution {
    fn shape(&self) -> &'static str {
        match self {
            Distribution::Sequence(_) => "sequence",
            Distribution::Movement(_) => "movement",
            Distribution::Keyed(_) => "keyed",
        }
    }
}

impl From<ChurnSequence> for Distribution {
    fn from(churn: ChurnSequence) -> Self {
        Distribution::Sequence(churn.as_f64())
    }
}

impl From<MovementMatrix> for Distribution {
    fn from(matrix: MovementMatrix) -> Self {
        Distribution::Movement(matrix)
    }
}

impl From<DwellDistribution> for Distribution {
    fn from(dwell: DwellDistribution) -> Self {
        Distribution::Keyed(dwell)
    }
}

/// Goodness-of-fit score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FitScore {
    /// Two-sample KS statistic and p-value.
    Ks { statistic: f64, p_value: f64 },
    /// Mean Jensen-Shannon divergence across the rank domain.
    MeanDivergence(f64),
}

impl FitScore {
    /// The scalar a reporting collaborator would plot: KS statistic or mean
    /// divergence. Lower is a better fit for both.
    pub fn value(&self) -> f64 {
        match self {
            FitScore::Ks { statistic, .. } => *statistic,
            FitScore::MeanDivergence(d) => *d,
        }
    }
}

/// Compare two distributions, dispatching on their shape tags.
///
/// # Errors
/// `ShapeMismatch` when the tags differ; shape-specific errors otherwise.
pub fn compare(a: &Distribution, b: &Distribution, config: &EvalConfig) -> Result<FitScore> {
    match (a, b) {
        (Distribution::Sequence(x), Distribution::Sequence(y)) => compare_sequences(x, y),
        (Distribution::Movement(x), Distribution::Movement(y)) => {
            compare_movement(x, y, config.list_size)
        }
        (Distribution::Keyed(x), Distribution::Keyed(y)) => compare_keyed(x, y),
        _ => Err(EvalError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        }),
    }
}

/// Two-sample KS test over two scalar sequences.
///
/// # Errors
/// `InsufficientData` when either sequence is empty.
pub fn compare_sequences(a: &[f64], b: &[f64]) -> Result<FitScore> {
    let ks = two_sample_ks(a, b)?;
    debug!(statistic = ks.statistic, p_value = ks.p_value, "sequence fit");
    Ok(FitScore::Ks {
        statistic: ks.statistic,
        p_value: ks.p_value,
    })
}

/// Mean Jensen-Shannon divergence between two movement matrices across
/// ranks `1..=list_size`.
///
/// Policy: every rank in the domain must be present in both matrices. The
/// estimator excludes zero-transition ranks, so callers comparing sparse
/// data must densify first or accept the error; a missing row is never
/// scored as zero divergence.
///
/// # Errors
/// - `InsufficientData` when `list_size` is 0
/// - `MissingRank` when a rank in the domain is absent from either matrix
pub fn compare_movement(
    a: &MovementMatrix,
    b: &MovementMatrix,
    list_size: u32,
) -> Result<FitScore> {
    if list_size == 0 {
        return Err(EvalError::InsufficientData {
            what: "movement comparison",
            needed: 1,
            found: 0,
        });
    }

    let mut total = 0.0;
    for rank in 1..=list_size {
        let row_a = a.row(rank).ok_or(EvalError::MissingRank { rank })?;
        let row_b = b.row(rank).ok_or(EvalError::MissingRank { rank })?;
        total += jensen_shannon(row_a, row_b);
    }

    let mean = total / list_size as f64;
    debug!(list_size, mean_divergence = mean, "movement fit");
    Ok(FitScore::MeanDivergence(mean))
}

/// Two-sample KS test over two keyed count distributions after outer-join
/// alignment on the key, with unmatched cells zero-filled.
///
/// # Errors
/// `InsufficientData` when both distributions are empty.
pub fn compare_keyed(a: &DwellDistribution, b: &DwellDistribution) -> Result<FitScore> {
    let (left, right) = a.aligned_counts(b);
    if left.is_empty() {
        return Err(EvalError::InsufficientData {
            what: "keyed comparison",
            needed: 1,
            found: 0,
        });
    }

    let ks = two_sample_ks(&left, &right)?;
    debug!(
        keys = left.len(),
        statistic = ks.statistic,
        "keyed fit after outer join"
    );
    Ok(FitScore::Ks {
        statistic: ks.statistic,
        p_value: ks.p_value,
    })
}
