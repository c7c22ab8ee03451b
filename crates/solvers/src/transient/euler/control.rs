use voltaic_core::Snapshot;

/// What an observer sees after each accepted step.
///
/// Step 0 carries the evaluated initial input.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,
    pub snapshot: Snapshot<I, O>,
}

/// A request an observer can make of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the integration. The observed step stays in the history.
    StopEarly,
}
