/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Produced a state for every requested output time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// Work counters accumulated over all integration segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of derivative evaluations.
    pub evaluations: u32,

    /// Number of accepted steps.
    pub accepted_steps: u32,

    /// Number of steps rejected by error control.
    pub rejected_steps: u32,
}

/// The result of an adaptive integration.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the solver terminated.
    pub status: Status,

    /// One state per output time reached, in order.
    pub states: Vec<S>,

    /// Solver work over the whole run.
    pub stats: Stats,
}
