/// Control actions supported by the adaptive solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the states produced so far.
    StopEarly,
}
