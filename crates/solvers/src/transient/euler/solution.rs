use voltaic_core::Snapshot;

/// How an integration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every requested step was taken.
    Finished,
    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    Stopped,
}

/// The accepted history of an Euler integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    /// One snapshot per accepted step, starting with the initial input.
    pub history: Vec<Snapshot<I, O>>,
    /// Number of steps taken after the initial snapshot.
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn new(status: Status, history: Vec<Snapshot<I, O>>) -> Self {
        let steps = history.len().saturating_sub(1);
        Self {
            status,
            history,
            steps,
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }

    #[must_use]
    pub fn stopped_early(&self) -> bool {
        self.status == Status::Stopped
    }
}
