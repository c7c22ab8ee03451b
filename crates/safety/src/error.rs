use thiserror::Error;
use voltaic_cell::Variable;

/// The time series cannot be assessed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("series has no `{0}` channel")]
    MissingVariable(Variable),

    #[error("channel `{variable}` has {found} samples, expected {expected}")]
    LengthMismatch {
        variable: Variable,
        expected: usize,
        found: usize,
    },

    #[error("non-finite `{variable}` value at sample {index}")]
    NonFinite { variable: Variable, index: usize },

    #[error("non-finite time at sample {index}")]
    NonFiniteTime { index: usize },

    #[error("time must increase strictly (sample {index})")]
    NonMonotonicTime { index: usize },
}
