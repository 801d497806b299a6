//! Two-Sample Kolmogorov-Smirnov Test
//!
//! Sup-distance between the empirical CDFs of two scalar samples, with the
//! asymptotic p-value from the Kolmogorov distribution.

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Result of a two-sample KS test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsResult {
    /// Maximum absolute difference between the two empirical CDFs, in [0, 1].
    pub statistic: f64,
    /// Asymptotic probability of observing a statistic at least this large
    /// under the null hypothesis that both samples share a distribution.
    pub p_value: f64,
}

/// Run a two-sample Kolmogorov-Smirnov test.
///
/// Samples need not be sorted or of equal length.
///
/// # Errors
/// `InsufficientData` when either sample is empty; the test is undefined
/// for an empty empirical CDF.
pub fn two_sample_ks(sample_a: &[f64], sample_b: &[f64]) -> Result<KsResult> {
    if sample_a.is_empty() || sample_b.is_empty() {
        return Err(EvalError::InsufficientData {
            what: "two-sample KS test",
            needed: 1,
            found: sample_a.len().min(sample_b.len()),
        });
    }

    let mut a = sample_a.to_vec();
    let mut b = sample_b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    // Walk both sorted samples, tracking the CDF gap at every step value.
    let mut statistic = 0.0f64;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        let gap = (i as f64 / n_a - j as f64 / n_b).abs();
        if gap > statistic {
            statistic = gap;
        }
    }

    let effective_n = (n_a * n_b / (n_a + n_b)).sqrt();
    let lambda = (effective_n + 0.12 + 0.11 / effective_n) * statistic;

    Ok(KsResult {
        statistic,
        p_value: kolmogorov_survival(lambda),
    })
}

/// Survival function of the Kolmogorov distribution:
/// `Q(lambda) = 2 * sum_{k>=1} (-1)^(k-1) * exp(-2 k^2 lambda^2)`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda < 1e-9 {
        return 1.0;
    }

    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100u32 {
        let term = (-2.0 * (k as f64).powi(2) * lambda * lambda).exp();
        sum += sign * term;
        sign = -sign;
        if term < 1e-12 {
            break;
        }
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
