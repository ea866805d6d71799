use thiserror::Error;

/// A non-empty, strictly increasing sequence of finite output times.
///
/// Solvers report one state per entry.
/// Construction validates the sequence once, so solvers can rely on every
/// consecutive pair forming a non-empty forward interval.
///
/// # Examples
///
/// ```
/// use pke_core::OutputTimes;
///
/// let times = OutputTimes::linspace(0.0, 1.0, 5).unwrap();
/// assert_eq!(times.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
///
/// assert!(OutputTimes::new([0.0, 2.0, 1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTimes {
    times: Vec<f64>,
}

/// Error returned when a sequence of output times is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OutputTimesError {
    #[error("at least one output time is required")]
    Empty,

    #[error("output time {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("output time {index} ({value}) does not follow {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("a linspace needs at least two points and start < stop")]
    InvalidLinspace,
}

impl OutputTimes {
    /// Creates output times from an iterator of values.
    ///
    /// # Errors
    ///
    /// Returns an [`OutputTimesError`] if the sequence is empty, contains a
    /// non-finite value, or is not strictly increasing.
    pub fn new<I>(times: I) -> Result<Self, OutputTimesError>
    where
        I: IntoIterator<Item = f64>,
    {
        let times: Vec<f64> = times.into_iter().collect();

        if times.is_empty() {
            return Err(OutputTimesError::Empty);
        }

        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(OutputTimesError::NonFinite {
                index,
                value: times[index],
            });
        }

        if let Some(index) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(OutputTimesError::NotIncreasing {
                index: index + 1,
                previous: times[index],
                value: times[index + 1],
            });
        }

        Ok(Self { times })
    }

    /// Creates `count` evenly spaced output times from `start` to `stop`, inclusive.
    ///
    /// The last entry is exactly `stop`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputTimesError::InvalidLinspace`] if `count < 2` or
    /// `start >= stop`, and the errors of [`OutputTimes::new`] otherwise.
    pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Self, OutputTimesError> {
        if count < 2 || !(start < stop) {
            return Err(OutputTimesError::InvalidLinspace);
        }

        let last = count - 1;
        let spacing = (stop - start) / last as f64;
        Self::new((0..count).map(|i| {
            if i == last {
                stop
            } else {
                start + spacing * i as f64
            }
        }))
    }

    /// Returns the output times as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    /// Returns the first output time.
    #[must_use]
    pub fn first(&self) -> f64 {
        self.times[0]
    }

    /// Returns the last output time.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Returns the number of output times.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; an empty sequence cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns an iterator over the output times.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}
