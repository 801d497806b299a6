//! Jensen-Shannon Divergence
//!
//! Symmetric, bounded difference measure between two discrete probability
//! distributions.

/// Jensen-Shannon distance between two discrete distributions of equal
/// length.
///
/// Inputs are normalized to sum 1 before comparison, so raw count vectors
/// are accepted. Returns the square root of the Jensen-Shannon divergence
/// (natural log), bounded by `sqrt(ln 2)`; identical distributions score
/// exactly 0. A distribution with zero mass contributes nothing.
pub fn jensen_shannon(p: &[f64], q: &[f64]) -> f64 {
    debug_assert_eq!(p.len(), q.len(), "distributions must share a support");

    let p_sum: f64 = p.iter().sum();
    let q_sum: f64 = q.iter().sum();
    if p_sum <= 0.0 || q_sum <= 0.0 {
        return 0.0;
    }

    let mut divergence = 0.0;
    for (&p_raw, &q_raw) in p.iter().zip(q.iter()) {
        let p_i = p_raw / p_sum;
        let q_i = q_raw / q_sum;
        let mid = 0.5 * (p_i + q_i);
        if p_i > 0.0 {
            divergence += 0.5 * p_i * (p_i / mid).ln();
        }
        if q_i > 0.0 {
            divergence += 0.5 * q_i * (q_i / mid).ln();
        }
    }

    // Floating error can push an identical-input divergence slightly negative.
    divergence.max(0.0).sqrt()
}
