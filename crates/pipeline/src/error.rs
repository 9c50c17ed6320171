//! Error types for the pythia-pipeline crate.

/// Error type for all fallible operations in the pythia-pipeline crate.
///
/// Variants raised by a step's `fit` or `predict` are data-dependent: the
/// search engine contains them per candidate instead of aborting. Parameter
/// addressing variants (`UnknownStep`, `UnknownParameter`, `ParameterType`,
/// `MissingQualifier`) signal a misconfigured grid and escalate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// Returned when a step's train window is too short to fit.
    #[error("step {step}: train window too short ({len} observations, need {min})")]
    TooShort {
        /// Name of the failing step.
        step: String,
        /// Number of train observations.
        len: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when a seasonal step lacks two full cycles.
    #[error(
        "step {step}: seasonal decomposition needs {required} observations \
         (2 cycles of {sp}), got {len}"
    )]
    SeasonalTooShort {
        /// Name of the failing step.
        step: String,
        /// Seasonal periodicity.
        sp: usize,
        /// Number of train observations.
        len: usize,
        /// Observations required (two full cycles).
        required: usize,
    },

    /// Returned when a step cannot be fitted on a constant train window.
    #[error("step {step}: train window is constant, transform is not invertible")]
    ConstantWindow {
        /// Name of the failing step.
        step: String,
    },

    /// Returned when a hyperparameter value is outside its allowed domain.
    #[error("step {step}: parameter {param} value {value} is invalid: {reason}")]
    InvalidValue {
        /// Name of the step.
        step: String,
        /// Parameter name.
        param: String,
        /// Offending value rendered as text.
        value: String,
        /// Why the value is rejected.
        reason: &'static str,
    },

    /// Returned when a qualified parameter name has no `__` separator.
    #[error("parameter name {name} is not step-qualified (expected step__param)")]
    MissingQualifier {
        /// The unqualified name.
        name: String,
    },

    /// Returned when a qualified name addresses a step the pipeline lacks.
    #[error("no step named {step} in pipeline")]
    UnknownStep {
        /// The missing step name.
        step: String,
    },

    /// Returned when a step has no parameter of the given name.
    #[error("step {step} has no parameter {param}")]
    UnknownParameter {
        /// Name of the step.
        step: String,
        /// The missing parameter name.
        param: String,
    },

    /// Returned when a parameter value has the wrong type.
    #[error("step {step}: parameter {param} expects a {expected} value")]
    ParameterType {
        /// Name of the step.
        step: String,
        /// Parameter name.
        param: String,
        /// Expected value type.
        expected: &'static str,
    },

    /// Returned when a forecast offset is zero.
    #[error("forecast offsets must be >= 1")]
    ZeroOffset,

    /// Returned when no forecast offsets are requested.
    #[error("no forecast offsets requested")]
    EmptyOffsets,

    /// Returned when a transform round trip exceeds the tolerance.
    /// Raised only by [`check_round_trip`](crate::check_round_trip); runtime
    /// prediction never round-trips against known samples.
    #[error(
        "step {step}: round trip mismatch at index {index}: |error| = {error:e} \
         exceeds tolerance {tolerance:e}"
    )]
    InversionMismatch {
        /// Name of the failing step.
        step: String,
        /// Index of the worst sample.
        index: usize,
        /// Absolute round-trip error at that sample.
        error: f64,
        /// Allowed tolerance.
        tolerance: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_too_short() {
        let e = PipelineError::TooShort {
            step: "detrender".into(),
            len: 1,
            min: 2,
        };
        assert_eq!(
            e.to_string(),
            "step detrender: train window too short (1 observations, need 2)"
        );
    }

    #[test]
    fn error_seasonal_too_short() {
        let e = PipelineError::SeasonalTooShort {
            step: "deseasonalizer".into(),
            sp: 12,
            len: 18,
            required: 24,
        };
        assert_eq!(
            e.to_string(),
            "step deseasonalizer: seasonal decomposition needs 24 observations \
             (2 cycles of 12), got 18"
        );
    }

    #[test]
    fn error_unknown_parameter() {
        let e = PipelineError::UnknownParameter {
            step: "forecaster".into(),
            param: "gamma".into(),
        };
        assert_eq!(e.to_string(), "step forecaster has no parameter gamma");
    }

    #[test]
    fn error_missing_qualifier() {
        let e = PipelineError::MissingQualifier { name: "sp".into() };
        assert_eq!(
            e.to_string(),
            "parameter name sp is not step-qualified (expected step__param)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<PipelineError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<PipelineError>();
    }
}
