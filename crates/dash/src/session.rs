use tracing::{info, warn};
use voltaic_cell::{CellSolver, Simulation};

use crate::{DeckFile, Run, SubmitError};

/// Holds the current run and replaces it as new decks are submitted.
///
/// A run is only ever replaced as a whole. A deck that fails validation
/// leaves the current run in place, since nothing was simulated; a
/// submission that fails after validation clears it, so the previous run's
/// verdict is never shown next to new parameters.
#[derive(Debug)]
pub struct Session<S> {
    solver: S,
    current: Option<Run>,
}

impl<S: CellSolver> Session<S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            current: None,
        }
    }

    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// The most recent successful run, unless a later submission failed.
    #[must_use]
    pub fn current(&self) -> Option<&Run> {
        self.current.as_ref()
    }

    /// Validates, simulates, and assesses a deck.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] describing the first stage that failed.
    pub fn submit(&mut self, deck: &DeckFile) -> Result<&Run, SubmitError> {
        let submission = deck.validate().inspect_err(|err| {
            warn!(%err, kept_previous = self.current.is_some(), "deck rejected");
        })?;

        let simulation = Simulation::new(&self.solver, submission.window);
        match Run::execute(&simulation, &submission.thresholds, submission.params) {
            Ok(run) => {
                info!(replaced = self.current.is_some(), "session run updated");
                Ok(self.current.insert(run))
            }
            Err(err) => {
                if self.current.take().is_some() {
                    warn!(%err, "submission failed, previous run discarded");
                } else {
                    warn!(%err, "submission failed");
                }
                Err(err)
            }
        }
    }

    /// Drops the current run.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
