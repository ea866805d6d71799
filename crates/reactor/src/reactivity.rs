//! Externally imposed ("driving") reactivity as a function of time.

use crate::ConfigError;

/// A time → reactivity mapping, in dollars.
///
/// # Examples
///
/// ```
/// use pke_reactor::ReactivityProfile;
///
/// let ramp = ReactivityProfile::ramp(1.0, 3.0, 0.0, 0.5).unwrap();
/// assert_eq!(ramp.evaluate(0.0), 0.0);
/// assert_eq!(ramp.evaluate(2.0), 0.25);
/// assert_eq!(ramp.evaluate(10.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReactivityProfile {
    /// The same reactivity at all times.
    Constant(f64),

    /// Static, then linear, then static again.
    Ramp(Ramp),
}

impl ReactivityProfile {
    /// Creates a constant reactivity profile.
    #[must_use]
    pub fn constant(reactivity: f64) -> Self {
        Self::Constant(reactivity)
    }

    /// Creates a ramp profile.
    ///
    /// # Errors
    ///
    /// See [`Ramp::new`].
    pub fn ramp(
        start_time: f64,
        stop_time: f64,
        start_value: f64,
        stop_value: f64,
    ) -> Result<Self, ConfigError> {
        Ramp::new(start_time, stop_time, start_value, stop_value).map(Self::Ramp)
    }

    /// Returns the reactivity at `time`.
    #[must_use]
    pub fn evaluate(&self, time: f64) -> f64 {
        match self {
            Self::Constant(reactivity) => *reactivity,
            Self::Ramp(ramp) => ramp.evaluate(time),
        }
    }

    /// Returns the instantaneous rate of change of the reactivity at `time`.
    #[must_use]
    pub fn slope(&self, time: f64) -> f64 {
        match self {
            Self::Constant(_) => 0.0,
            Self::Ramp(ramp) => ramp.slope(time),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Constant(reactivity) if !reactivity.is_finite() => Err(ConfigError::NonFinite {
                field: "constant reactivity",
            }),
            Self::Constant(_) => Ok(()),
            Self::Ramp(_) => Ok(()),
        }
    }
}

/// A reactivity that is held, changed linearly, then held again.
///
/// For `time < start_time` the reactivity is `start_value`, for
/// `time > stop_time` it is `stop_value`, and in between it is interpolated
/// linearly. A ramp with `start_time == stop_time` is a step to `stop_value`
/// at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    start_time: f64,
    stop_time: f64,
    start_value: f64,
    stop_value: f64,
}

impl Ramp {
    /// Creates a ramp from `start_value` at `start_time` to `stop_value` at `stop_time`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RampReversed`] if `start_time > stop_time`, or
    /// [`ConfigError::NonFinite`] if any parameter is not finite.
    pub fn new(
        start_time: f64,
        stop_time: f64,
        start_value: f64,
        stop_value: f64,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("ramp start time", start_time),
            ("ramp stop time", stop_time),
            ("ramp start value", start_value),
            ("ramp stop value", stop_value),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if start_time > stop_time {
            return Err(ConfigError::RampReversed {
                start_time,
                stop_time,
            });
        }

        Ok(Self {
            start_time,
            stop_time,
            start_value,
            stop_value,
        })
    }

    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    #[must_use]
    pub fn stop_time(&self) -> f64 {
        self.stop_time
    }

    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    #[must_use]
    pub fn stop_value(&self) -> f64 {
        self.stop_value
    }

    /// Returns the reactivity at `time`.
    #[must_use]
    pub fn evaluate(&self, time: f64) -> f64 {
        if time < self.start_time {
            self.start_value
        } else if time >= self.stop_time {
            self.stop_value
        } else {
            self.start_value + self.gradient() * (time - self.start_time)
        }
    }

    /// Returns the slope at `time`: the ramp gradient inside
    /// `[start_time, stop_time]` and zero outside it.
    #[must_use]
    pub fn slope(&self, time: f64) -> f64 {
        if (self.start_time..=self.stop_time).contains(&time) {
            self.gradient()
        } else {
            0.0
        }
    }

    fn gradient(&self) -> f64 {
        let duration = self.stop_time - self.start_time;
        if duration > 0.0 {
            (self.stop_value - self.start_value) / duration
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn ramp() -> Ramp {
        Ramp::new(2.0, 4.0, -1.0, 3.0).unwrap()
    }

    #[test]
    fn constant_is_the_same_at_all_times() {
        let profile = ReactivityProfile::constant(0.3);
        for time in [-10.0, 0.0, 1e-9, 5.0, 1e9] {
            assert_eq!(profile.evaluate(time), 0.3);
            assert_eq!(profile.slope(time), 0.0);
        }
    }

    #[test]
    fn ramp_is_clamped_outside_its_window() {
        let ramp = ramp();
        assert_eq!(ramp.evaluate(-5.0), -1.0);
        assert_eq!(ramp.evaluate(1.999), -1.0);
        assert_eq!(ramp.evaluate(4.001), 3.0);
        assert_eq!(ramp.evaluate(100.0), 3.0);
    }

    #[test]
    fn ramp_hits_its_end_values_exactly() {
        let ramp = ramp();
        assert_eq!(ramp.evaluate(2.0), -1.0);
        assert_eq!(ramp.evaluate(4.0), 3.0);
    }

    #[test]
    fn ramp_is_affine_inside_its_window() {
        let ramp = ramp();
        assert_relative_eq!(ramp.evaluate(2.5), 0.0);
        assert_relative_eq!(ramp.evaluate(3.0), 1.0);
        assert_relative_eq!(ramp.evaluate(3.5), 2.0);
    }

    #[test]
    fn ramp_is_continuous_at_its_corners() {
        let ramp = ramp();
        let eps = 1e-9;
        assert_relative_eq!(ramp.evaluate(2.0 - eps), ramp.evaluate(2.0 + eps), epsilon = 1e-8);
        assert_relative_eq!(ramp.evaluate(4.0 - eps), ramp.evaluate(4.0 + eps), epsilon = 1e-8);
    }

    #[test]
    fn ramp_slope_is_zero_outside_its_window() {
        let ramp = ramp();
        assert_eq!(ramp.slope(1.0), 0.0);
        assert_relative_eq!(ramp.slope(2.0), 2.0);
        assert_relative_eq!(ramp.slope(3.0), 2.0);
        assert_relative_eq!(ramp.slope(4.0), 2.0);
        assert_eq!(ramp.slope(4.5), 0.0);
    }

    #[test]
    fn zero_length_ramp_is_a_step() {
        let step = Ramp::new(1.0, 1.0, 0.0, 0.5).unwrap();
        assert_eq!(step.evaluate(0.999), 0.0);
        assert_eq!(step.evaluate(1.0), 0.5);
        assert_eq!(step.evaluate(1.001), 0.5);
        assert_eq!(step.slope(1.0), 0.0);
    }

    #[test]
    fn reversed_ramp_is_rejected() {
        let err = ReactivityProfile::ramp(3.0, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RampReversed {
                start_time: 3.0,
                stop_time: 1.0
            }
        );
    }

    #[test]
    fn non_finite_ramp_is_rejected() {
        let err = Ramp::new(0.0, 1.0, f64::NAN, 1.0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonFinite {
                field: "ramp start value"
            }
        );
    }

    #[test]
    fn non_finite_constant_fails_validation() {
        assert!(ReactivityProfile::constant(f64::INFINITY).validate().is_err());
        assert!(ReactivityProfile::constant(1.0).validate().is_ok());
    }
}
