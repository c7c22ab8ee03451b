/// Watches a running solver and may ask it to act.
///
/// After every accepted step the solver passes an event of type `E`; returning
/// `Some(action)` requests a solver-specific action such as stopping at a
/// voltage cut-off, and `None` lets the run continue.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. `()` observes nothing.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _: &E) -> Option<A> {
        None
    }
}
