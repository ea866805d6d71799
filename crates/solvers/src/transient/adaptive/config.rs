/// Supported embedded Runge–Kutta methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Adaptive Dormand–Prince 5(4) Runge–Kutta method.
    ///
    /// A general-purpose explicit method that estimates the local error from
    /// embedded 5th and 4th order solutions.
    #[default]
    Dopri5,

    /// Adaptive Dormand–Prince 8(5,3) Runge–Kutta method.
    ///
    /// Higher order and more expensive per step, but usually needs fewer steps
    /// when very tight tolerances are requested.
    Dop853,
}

/// Configuration for the adaptive solver.
///
/// The defaults match the tolerances of the classic LSODA-based `odeint`
/// driver (`1.49012e-8` absolute and relative).
///
/// `max_steps` bounds the attempted steps of each segment between two
/// output times. The stiffness heuristic of `ode_solvers` is off unless
/// `stiffness_check` names how many accepted steps pass between checks;
/// a stiff but stable problem still advances, only with smaller steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub method: Method,
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_steps: u32,
    pub stiffness_check: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::Dopri5,
            abs_tol: 1.490_12e-8,
            rel_tol: 1.490_12e-8,
            max_steps: 100_000,
            stiffness_check: None,
        }
    }
}

impl Config {
    /// Validates the tolerances and step limits.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is non-positive or non-finite,
    /// `max_steps` is zero, or `stiffness_check` is `Some(0)`.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.abs_tol.is_finite() || self.abs_tol <= 0.0 {
            return Err("abs_tol must be finite and positive");
        }
        if !self.rel_tol.is_finite() || self.rel_tol <= 0.0 {
            return Err("rel_tol must be finite and positive");
        }
        if self.max_steps == 0 {
            return Err("max_steps must be positive");
        }
        if self.stiffness_check == Some(0) {
            return Err("stiffness_check interval must be positive");
        }
        Ok(())
    }
}
