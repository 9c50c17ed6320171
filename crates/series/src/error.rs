//! Error types for the pythia-series crate.

/// Error type for all fallible operations in the pythia-series crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SeriesError {
    /// Returned when the series holds fewer observations than required.
    #[error("series too short: {len} observations, need at least {min}")]
    TooShort {
        /// Number of observations provided.
        len: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when periods and values have different lengths.
    #[error("periods length {periods} does not match values length {values}")]
    LengthMismatch {
        /// Length of the period vector.
        periods: usize,
        /// Length of the value vector.
        values: usize,
    },

    /// Returned when a value is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFinite {
        /// Index of the offending value.
        index: usize,
    },

    /// Returned when periods are not strictly increasing.
    #[error("periods not strictly increasing at index {index}: {prev} then {next}")]
    NonMonotonic {
        /// Index of the offending period.
        index: usize,
        /// Period preceding the violation.
        prev: i64,
        /// Period at the violation.
        next: i64,
    },

    /// Returned when period spacing is not uniform.
    #[error("irregular period spacing at index {index}: expected step {expected}, got {got}")]
    IrregularSpacing {
        /// Index where the spacing differs.
        index: usize,
        /// Step inferred from the first gap.
        expected: i64,
        /// Step actually observed.
        got: i64,
    },

    /// Returned when a horizon contains no periods.
    #[error("horizon is empty")]
    EmptyHorizon,

    /// Returned when a relative horizon offset is zero or out of order.
    #[error("horizon offsets must be strictly increasing and >= 1, got {offset} at index {index}")]
    InvalidOffset {
        /// Index of the offending offset.
        index: usize,
        /// The offending offset.
        offset: usize,
    },

    /// Returned when an absolute horizon period does not lie after the cutoff.
    #[error("horizon period {period} is not after the cutoff {cutoff}")]
    NotFuture {
        /// The offending period.
        period: i64,
        /// Last observed period.
        cutoff: i64,
    },

    /// Returned when an absolute horizon period is off the series' period grid.
    #[error("horizon period {period} is not aligned to the period grid (cutoff {cutoff}, step {step})")]
    OffGrid {
        /// The offending period.
        period: i64,
        /// Last observed period.
        cutoff: i64,
        /// Series period step.
        step: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_too_short() {
        let e = SeriesError::TooShort { len: 1, min: 2 };
        assert_eq!(e.to_string(), "series too short: 1 observations, need at least 2");
    }

    #[test]
    fn error_length_mismatch() {
        let e = SeriesError::LengthMismatch {
            periods: 3,
            values: 4,
        };
        assert_eq!(e.to_string(), "periods length 3 does not match values length 4");
    }

    #[test]
    fn error_non_finite() {
        let e = SeriesError::NonFinite { index: 7 };
        assert_eq!(e.to_string(), "non-finite value at index 7");
    }

    #[test]
    fn error_non_monotonic() {
        let e = SeriesError::NonMonotonic {
            index: 2,
            prev: 5,
            next: 5,
        };
        assert_eq!(
            e.to_string(),
            "periods not strictly increasing at index 2: 5 then 5"
        );
    }

    #[test]
    fn error_off_grid() {
        let e = SeriesError::OffGrid {
            period: 27,
            cutoff: 24,
            step: 2,
        };
        assert_eq!(
            e.to_string(),
            "horizon period 27 is not aligned to the period grid (cutoff 24, step 2)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SeriesError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
