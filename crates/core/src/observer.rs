/// Hook called by a solver at each reported point of a run.
///
/// A solver hands every event it reports to the observer and inspects the
/// reply: `Some(action)` asks for a solver-specific action such as stopping,
/// `None` means carry on.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. `()` is the observer
/// that never acts.
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
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
