/// Defines an ODE (ordinary differential equation) problem to be solved.
///
/// An ODE problem owns the layout contract between a structured state and
/// the flat vector that a numerical integrator advances. Solvers only ever
/// see flat slices; the problem translates them back into its own state type
/// when reporting results.
///
/// Implementations must keep [`encode`](OdeProblem::encode) and
/// [`decode`](OdeProblem::decode) exact inverses of each other, and
/// [`derivative`](OdeProblem::derivative) must write a slice of the same
/// length as the one it reads.
pub trait OdeProblem {
    type State;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the time at which a state applies.
    fn time(&self, state: &Self::State) -> f64;

    /// Flattens a state into the vector layout used by the solver.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state does not fit the problem's layout.
    fn encode(&self, state: &Self::State) -> Result<Vec<f64>, Self::Error>;

    /// Rebuilds a state at `time` from a flat vector.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if `y` does not have the expected length.
    fn decode(&self, time: f64, y: &[f64]) -> Result<Self::State, Self::Error>;

    /// Evaluates the time derivative of `y` at `time` and writes it to `dy`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(&self, time: f64, y: &[f64], dy: &mut [f64]) -> Result<(), Self::Error>;
}
