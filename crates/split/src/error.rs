//! Error types for the pythia-split crate.

/// Error type for all fallible operations in the pythia-split crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SplitError {
    /// Returned when the series cannot yield even one train/validation split.
    #[error("insufficient data: {len} observations, need at least {required}")]
    InsufficientData {
        /// Number of observations in the series.
        len: usize,
        /// Minimum number of observations required.
        required: usize,
    },

    /// Returned when the horizon length is zero.
    #[error("horizon length must be >= 1")]
    ZeroHorizon,

    /// Returned when a window policy parameter is zero.
    #[error("window policy parameter {name} must be >= 1")]
    ZeroPolicyParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let e = SplitError::InsufficientData {
            len: 3,
            required: 4,
        };
        assert_eq!(
            e.to_string(),
            "insufficient data: 3 observations, need at least 4"
        );
    }

    #[test]
    fn error_zero_horizon() {
        assert_eq!(SplitError::ZeroHorizon.to_string(), "horizon length must be >= 1");
    }

    #[test]
    fn error_zero_policy_parameter() {
        let e = SplitError::ZeroPolicyParameter { name: "window" };
        assert_eq!(e.to_string(), "window policy parameter window must be >= 1");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SplitError>();
    }
}
