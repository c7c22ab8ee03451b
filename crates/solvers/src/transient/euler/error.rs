use std::error::Error as StdError;

/// Errors that can occur during Euler integration.
///
/// Each variant records the step at which the failure happened; step 0 is the
/// evaluation of the initial input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error at step {step}: {source}")]
    Model {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem error at step {step}: {source}")]
    Problem {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Model {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Problem {
            step,
            source: Box::new(err),
        }
    }

    /// Returns the step at which integration failed.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Model { step, .. } | Self::Problem { step, .. } => *step,
        }
    }

    /// Attempts to downcast the underlying model or problem error.
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Model { source, .. } | Self::Problem { source, .. } => source.downcast_ref(),
        }
    }
}
