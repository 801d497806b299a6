//! # Metrics Module
//!
//! Statistical distance measures used by the distribution comparator.
//!
//! - `ks` - Two-sample Kolmogorov-Smirnov test
//! - `divergence` - Jensen-Shannon divergence

pub mod divergence;
pub mod ks;

pub use divergence::jensen_shannon;
pub use ks::{two_sample_ks, KsResult};
