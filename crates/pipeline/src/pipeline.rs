//! Transform-then-forecast pipelines.

use crate::error::PipelineError;
use crate::forecaster::{FittedForecaster, ForecasterSpec};
use crate::param::ParamValue;
use crate::transform::{FittedTransform, TransformSpec};

/// An unfitted pipeline: named transform steps followed by one named
/// forecaster step.
///
/// Hyperparameters are addressed with `step__param` names, so a grid can
/// target any step without knowing the pipeline's shape:
///
/// ```
/// use pythia_pipeline::{ForecasterSpec, NaiveStrategy, ParamValue, PipelineSpec, TransformSpec};
///
/// let mut spec = PipelineSpec::new(
///     "forecaster",
///     ForecasterSpec::Naive { strategy: NaiveStrategy::Last, sp: 1 },
/// )
/// .with_transform("detrender", TransformSpec::Detrend);
/// spec.set_param("forecaster__sp", &ParamValue::Int(4))?;
/// # Ok::<(), pythia_pipeline::PipelineError>(())
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PipelineSpec {
    transforms: Vec<(String, TransformSpec)>,
    forecaster: (String, ForecasterSpec),
}

impl PipelineSpec {
    /// Creates a pipeline holding only a forecaster step.
    pub fn new(forecaster_name: impl Into<String>, forecaster: ForecasterSpec) -> Self {
        Self {
            transforms: Vec::new(),
            forecaster: (forecaster_name.into(), forecaster),
        }
    }

    /// Appends a transform step; transforms run in insertion order.
    pub fn with_transform(mut self, name: impl Into<String>, spec: TransformSpec) -> Self {
        self.transforms.push((name.into(), spec));
        self
    }

    /// Returns the forecaster step's name.
    pub fn forecaster_name(&self) -> &str {
        &self.forecaster.0
    }

    /// Overwrites one hyperparameter, addressed as `step__param`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PipelineError::MissingQualifier`] | no `__` in the name |
    /// | [`PipelineError::UnknownStep`] | no step of that name |
    /// | [`PipelineError::UnknownParameter`] | step lacks the parameter |
    /// | [`PipelineError::ParameterType`] | wrong value variant |
    /// | [`PipelineError::InvalidValue`] | value outside its domain |
    pub fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), PipelineError> {
        let (step, param) = name
            .split_once("__")
            .ok_or_else(|| PipelineError::MissingQualifier {
                name: name.to_owned(),
            })?;
        if step == self.forecaster.0 {
            return self.forecaster.1.set_param(step, param, value);
        }
        for (tname, tspec) in &mut self.transforms {
            if tname.as_str() == step {
                return tspec.set_param(step, param, value);
            }
        }
        Err(PipelineError::UnknownStep {
            step: step.to_owned(),
        })
    }

    /// Fits every step in order on `values`.
    ///
    /// Each transform fits on the output of its predecessors; the forecaster
    /// fits on the fully transformed window.
    ///
    /// # Errors
    ///
    /// The first failing step's error, unchanged.
    pub fn fit(&self, values: &[f64]) -> Result<FittedPipeline, PipelineError> {
        let mut current = values.to_vec();
        let mut fitted = Vec::with_capacity(self.transforms.len());
        for (name, spec) in &self.transforms {
            let step = spec.fit(name, &current)?;
            current = step.apply(&current);
            fitted.push((name.clone(), step));
        }
        let forecaster = self.forecaster.1.fit(&self.forecaster.0, &current)?;
        Ok(FittedPipeline {
            transforms: fitted,
            forecaster,
            train_len: values.len(),
        })
    }
}

/// A pipeline fitted on one train window.
#[derive(Clone, Debug)]
pub struct FittedPipeline {
    transforms: Vec<(String, FittedTransform)>,
    forecaster: FittedForecaster,
    train_len: usize,
}

impl FittedPipeline {
    /// Number of observations the pipeline was fitted on.
    pub fn train_len(&self) -> usize {
        self.train_len
    }

    /// Forecasts at offsets past the cutoff, mapped back through every
    /// transform in reverse order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::EmptyOffsets`] and [`PipelineError::ZeroOffset`] on
    /// malformed offset lists.
    pub fn predict(&self, offsets: &[usize]) -> Result<Vec<f64>, PipelineError> {
        if offsets.is_empty() {
            return Err(PipelineError::EmptyOffsets);
        }
        if offsets.contains(&0) {
            return Err(PipelineError::ZeroOffset);
        }
        let mut values = self.forecaster.predict(offsets);
        // A forecast h steps out sits at train position train_len - 1 + h.
        let positions: Vec<usize> = offsets.iter().map(|h| self.train_len - 1 + h).collect();
        for (_, step) in self.transforms.iter().rev() {
            values = step.inverse(&positions, &values);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::forecaster::NaiveStrategy;

    fn naive(strategy: NaiveStrategy) -> PipelineSpec {
        PipelineSpec::new("forecaster", ForecasterSpec::Naive { strategy, sp: 1 })
    }

    #[test]
    fn bare_forecaster_pipeline() {
        let spec = naive(NaiveStrategy::Drift);
        let values: Vec<f64> = (0..10).map(|i| 1.0 + 2.0 * i as f64).collect();
        let fitted = spec.fit(&values).unwrap();
        let out = fitted.predict(&[1, 2]).unwrap();
        assert_relative_eq!(out[0], 21.0, epsilon = 1e-10);
        assert_relative_eq!(out[1], 23.0, epsilon = 1e-10);
    }

    #[test]
    fn detrend_makes_last_strategy_trend_aware() {
        // On a clean trend, detrend + last extrapolates the line even though
        // the naive step itself is flat.
        let values: Vec<f64> = (0..10).map(|i| 5.0 + 3.0 * i as f64).collect();
        let spec = naive(NaiveStrategy::Last).with_transform("detrender", TransformSpec::Detrend);
        let fitted = spec.fit(&values).unwrap();
        let out = fitted.predict(&[1, 2, 3]).unwrap();
        assert_relative_eq!(out[0], 35.0, epsilon = 1e-8);
        assert_relative_eq!(out[2], 41.0, epsilon = 1e-8);
    }

    #[test]
    fn scaling_round_trips_through_prediction() {
        // Affine scaling before a flat forecaster must invert away exactly.
        let values = vec![3.0, 8.0, 5.0, 9.0, 4.0, 8.0];
        let plain = naive(NaiveStrategy::Last);
        let scaled = naive(NaiveStrategy::Last).with_transform(
            "scaler",
            TransformSpec::MinMaxScale { min: 1.0, max: 10.0 },
        );
        let a = plain.fit(&values).unwrap().predict(&[1, 2]).unwrap();
        let b = scaled.fit(&values).unwrap().predict(&[1, 2]).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_relative_eq!(x, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn transforms_invert_in_reverse_order() {
        let values: Vec<f64> = (0..12).map(|i| 2.0 * i as f64 + [0.0, 4.0][i % 2]).collect();
        let spec = naive(NaiveStrategy::Last)
            .with_transform("detrender", TransformSpec::Detrend)
            .with_transform("deseasonalizer", TransformSpec::Deseasonalize { sp: 2 })
            .with_transform(
                "scaler",
                TransformSpec::RobustScale { with_scaling: true },
            );
        let fitted = spec.fit(&values).unwrap();
        let out = fitted.predict(&[1, 2]).unwrap();
        // Values follow 2i plus a period-2 cycle. The trend/cycle estimates
        // interact slightly on a finite window, so the levels are only close,
        // but the cycle amplitude survives the stack of inversions exactly.
        assert_relative_eq!(out[0], 24.0, epsilon = 0.5);
        assert_relative_eq!(out[1], 30.0, epsilon = 0.5);
        assert_relative_eq!(out[1] - out[0], 6.0, epsilon = 1e-9);
    }

    #[test]
    fn set_param_reaches_each_step() {
        let mut spec = naive(NaiveStrategy::Last)
            .with_transform("deseasonalizer", TransformSpec::Deseasonalize { sp: 1 });
        spec.set_param("deseasonalizer__sp", &ParamValue::Int(4)).unwrap();
        spec.set_param("forecaster__strategy", &ParamValue::Str("mean".into()))
            .unwrap();
        assert_eq!(
            spec,
            PipelineSpec::new(
                "forecaster",
                ForecasterSpec::Naive {
                    strategy: NaiveStrategy::Mean,
                    sp: 1
                }
            )
            .with_transform("deseasonalizer", TransformSpec::Deseasonalize { sp: 4 })
        );
    }

    #[test]
    fn set_param_unknown_step() {
        let mut spec = naive(NaiveStrategy::Last);
        let err = spec.set_param("scaler__min", &ParamValue::Float(1.0)).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownStep { .. }));
    }

    #[test]
    fn set_param_requires_qualifier() {
        let mut spec = naive(NaiveStrategy::Last);
        let err = spec.set_param("sp", &ParamValue::Int(4)).unwrap_err();
        assert!(matches!(err, PipelineError::MissingQualifier { .. }));
    }

    #[test]
    fn fit_propagates_step_error() {
        let spec = naive(NaiveStrategy::Last)
            .with_transform("deseasonalizer", TransformSpec::Deseasonalize { sp: 12 });
        let err = spec.fit(&[1.0; 10]).unwrap_err();
        assert!(matches!(err, PipelineError::SeasonalTooShort { .. }));
    }

    #[test]
    fn predict_rejects_bad_offsets() {
        let spec = naive(NaiveStrategy::Last);
        let fitted = spec.fit(&[1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            fitted.predict(&[]).unwrap_err(),
            PipelineError::EmptyOffsets
        ));
        assert!(matches!(
            fitted.predict(&[0, 1]).unwrap_err(),
            PipelineError::ZeroOffset
        ));
    }

    #[test]
    fn fitted_pipeline_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<PipelineSpec>();
        assert_impl::<FittedPipeline>();
    }
}
