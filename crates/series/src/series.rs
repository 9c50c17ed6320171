//! Validated period-indexed series.

use crate::error::SeriesError;

/// A validated univariate time series on a regular period grid.
///
/// Wraps parallel period/value vectors and guarantees:
/// - at least 2 observations
/// - all values finite (no NaN or infinity)
/// - periods strictly increasing with uniform spacing
///
/// Periods are plain `i64` grid indices (e.g. months since an epoch); the
/// ingestion layer is responsible for mapping calendar dates onto them.
/// Immutable once constructed.
///
/// # Example
///
/// ```
/// use pythia_series::Series;
///
/// let s = Series::new(vec![0, 1, 2], vec![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.step(), 1);
/// assert_eq!(s.cutoff(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    periods: Vec<i64>,
    values: Vec<f64>,
    step: i64,
}

impl Series {
    /// Creates a new `Series` after validating periods and values.
    ///
    /// The period step is inferred from the first gap and enforced across
    /// the whole index. Malformed input is rejected, never repaired.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::LengthMismatch`] | `periods.len() != values.len()` |
    /// | [`SeriesError::TooShort`] | fewer than 2 observations |
    /// | [`SeriesError::NonFinite`] | any value is NaN or infinite |
    /// | [`SeriesError::NonMonotonic`] | periods not strictly increasing |
    /// | [`SeriesError::IrregularSpacing`] | period gaps are not uniform |
    pub fn new(periods: Vec<i64>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if periods.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                periods: periods.len(),
                values: values.len(),
            });
        }
        if periods.len() < 2 {
            return Err(SeriesError::TooShort {
                len: periods.len(),
                min: 2,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFinite { index });
        }
        for i in 1..periods.len() {
            if periods[i] <= periods[i - 1] {
                return Err(SeriesError::NonMonotonic {
                    index: i,
                    prev: periods[i - 1],
                    next: periods[i],
                });
            }
        }
        let step = periods[1] - periods[0];
        for i in 2..periods.len() {
            let got = periods[i] - periods[i - 1];
            if got != step {
                return Err(SeriesError::IrregularSpacing {
                    index: i,
                    expected: step,
                    got,
                });
            }
        }
        Ok(Self {
            periods,
            values,
            step,
        })
    }

    /// Returns the periods as a slice.
    pub fn periods(&self) -> &[i64] {
        &self.periods
    }

    /// Returns the values as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series is empty.
    ///
    /// Note: a valid `Series` is never empty (minimum length is 2).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the uniform period step.
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Returns the last observed period (the forecasting cutoff).
    pub fn cutoff(&self) -> i64 {
        self.periods[self.periods.len() - 1]
    }

    /// Returns the period that lies `offset` steps after the cutoff.
    pub fn period_at_offset(&self, offset: usize) -> i64 {
        self.cutoff() + self.step * offset as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(values: Vec<f64>) -> Series {
        let periods = (0..values.len() as i64).collect();
        Series::new(periods, values).unwrap()
    }

    #[test]
    fn new_valid_series() {
        let s = monthly(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.periods(), &[0, 1, 2]);
    }

    #[test]
    fn new_length_mismatch() {
        let err = Series::new(vec![0, 1, 2], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::LengthMismatch {
                periods: 3,
                values: 2
            }
        ));
    }

    #[test]
    fn new_too_short() {
        let err = Series::new(vec![0], vec![1.0]).unwrap_err();
        assert!(matches!(err, SeriesError::TooShort { len: 1, min: 2 }));
    }

    #[test]
    fn new_empty() {
        let err = Series::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, SeriesError::TooShort { len: 0, min: 2 }));
    }

    #[test]
    fn new_nan_rejected() {
        let err = Series::new(vec![0, 1, 2], vec![1.0, f64::NAN, 3.0]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { index: 1 }));
    }

    #[test]
    fn new_infinity_rejected() {
        let err = Series::new(vec![0, 1], vec![1.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { index: 1 }));
    }

    #[test]
    fn new_duplicate_period_rejected() {
        let err = Series::new(vec![0, 1, 1], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SeriesError::NonMonotonic { index: 2, .. }));
    }

    #[test]
    fn new_decreasing_period_rejected() {
        let err = Series::new(vec![0, 2, 1], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SeriesError::NonMonotonic { index: 2, .. }));
    }

    #[test]
    fn new_irregular_spacing_rejected() {
        let err = Series::new(vec![0, 2, 5], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::IrregularSpacing {
                index: 2,
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn step_and_cutoff() {
        let s = Series::new(vec![10, 13, 16, 19], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.step(), 3);
        assert_eq!(s.cutoff(), 19);
        assert_eq!(s.period_at_offset(1), 22);
        assert_eq!(s.period_at_offset(4), 31);
    }

    #[test]
    fn series_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Series>();
    }
}
