use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid value in column {column}: {detail}")]
    InvalidValue { column: String, detail: String },

    #[error("Insufficient data for {what}: needed {needed}, found {found}")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        found: usize,
    },

    #[error("Shape mismatch: cannot compare {left} distribution against {right} distribution")]
    ShapeMismatch {
        left: &'static str,
        right: &'static str,
    },

    #[error("Rank {rank} missing from movement matrix")]
    MissingRank { rank: u32 },
}

impl EvalError {
    /// True for errors caused by malformed input records (as opposed to
    /// tables that are well-formed but too small to evaluate).
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            EvalError::MissingColumn { .. } | EvalError::InvalidValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
