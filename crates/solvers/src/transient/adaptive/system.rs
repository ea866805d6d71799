use std::{cell::RefCell, rc::Rc};

use ode_solvers::{DVector, System};
use pke_core::OdeProblem;

/// Internal wrapper that adapts an [`OdeProblem`] into an `ode_solvers` system.
///
/// The solver cannot propagate errors from the right-hand side, so the first
/// failure is parked in `error` and the derivative is poisoned with NaN.
/// `solout` then stops the integration.
pub(super) struct Segment<'a, P: OdeProblem> {
    pub(super) problem: &'a P,
    pub(super) error: Rc<RefCell<Option<P::Error>>>,
    pub(super) latest: Rc<RefCell<Option<(f64, DVector<f64>)>>>,
}

impl<P: OdeProblem> System<f64, DVector<f64>> for Segment<'_, P> {
    fn system(&self, x: f64, y: &DVector<f64>, dy: &mut DVector<f64>) {
        if let Err(err) = self.problem.derivative(x, y.as_slice(), dy.as_mut_slice()) {
            self.error.borrow_mut().get_or_insert(err);
            dy.fill(f64::NAN);
        }
    }

    fn solout(&mut self, x: f64, y: &DVector<f64>, _dy: &DVector<f64>) -> bool {
        // Called after every accepted step; the last call holds the segment end.
        *self.latest.borrow_mut() = Some((x, y.clone()));
        self.error.borrow().is_some()
    }
}
