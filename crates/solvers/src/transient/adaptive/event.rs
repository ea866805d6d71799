/// Event emitted by the adaptive solver for each output time.
///
/// Index 0 is the first requested output time, which is the initial state
/// when the first output time equals the initial time.
#[derive(Debug, Clone)]
pub struct Event<S> {
    /// Position of this output in the requested sequence of times.
    pub index: usize,

    /// The output time.
    pub time: f64,

    /// The decoded state at `time`.
    pub state: S,
}
