use std::path::PathBuf;

use thiserror::Error;
use voltaic_core::constraint::ConstraintError;

/// A parameter or window setting was rejected before any simulation ran.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read deck `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse deck: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` is out of range: {source}")]
    OutOfRange {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("`{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("unknown chemistry `{0}` (expected NMC, LFP, or LCO)")]
    UnknownChemistry(String),
}

impl ConfigError {
    /// Maps a constraint violation onto the named deck field.
    pub fn out_of_range(field: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::OutOfRange { field, source }
    }

    /// Returns the deck field this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { field, .. } | Self::Invalid { field, .. } => Some(field),
            Self::UnknownChemistry(_) => Some("chemistry"),
            Self::Io { .. } | Self::Parse(_) => None,
        }
    }
}

/// Which electrode reached a stoichiometric limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Electrode {
    Anode,
    Cathode,
    Electrolyte,
}

impl std::fmt::Display for Electrode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Electrode::Anode => "anode",
            Electrode::Cathode => "cathode",
            Electrode::Electrolyte => "electrolyte",
        })
    }
}

/// The simulation adapter failed to produce a time series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("parameter outside solver range: {0}")]
    ParameterOutOfRange(String),

    #[error("solver diverged at t = {time_s:.1} s")]
    Diverged { time_s: f64 },

    #[error("{electrode} saturated at t = {time_s:.1} s (mass transport or stoichiometric limit)")]
    Saturated { time_s: f64, electrode: Electrode },

    #[error("solver produced malformed output: {0}")]
    MalformedOutput(#[from] SeriesError),

    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// A time series violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("time axis must start at zero, found {0}")]
    NonZeroStart(f64),

    #[error("time axis must increase strictly (sample {index})")]
    NonMonotonicTime { index: usize },

    #[error("non-finite time at sample {index}")]
    NonFiniteTime { index: usize },

    #[error("channel `{variable}` has {found} samples, expected {expected}")]
    LengthMismatch {
        variable: crate::Variable,
        expected: usize,
        found: usize,
    },
}
