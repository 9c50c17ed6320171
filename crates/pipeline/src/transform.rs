//! Invertible pre-forecast transforms.
//!
//! Every transform fits on a train window and exposes the pair
//! `apply`/`inverse`. `apply` maps the train window into transformed space;
//! `inverse` maps forecasts back, addressed by train-relative position so
//! that position-dependent transforms (trend, seasonality) extrapolate
//! correctly past the window end.

use crate::error::PipelineError;
use crate::param::ParamValue;

/// An unfitted transform step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSpec {
    /// Subtract a least-squares linear trend.
    Detrend,
    /// Subtract per-phase seasonal means with periodicity `sp`.
    Deseasonalize {
        /// Seasonal periodicity in periods.
        sp: usize,
    },
    /// Center on the median; optionally scale by the interquartile range.
    RobustScale {
        /// Whether to divide by the interquartile range after centering.
        with_scaling: bool,
    },
    /// Affinely map the train range onto `[min, max]`.
    MinMaxScale {
        /// Lower bound of the output range.
        min: f64,
        /// Upper bound of the output range.
        max: f64,
    },
}

impl TransformSpec {
    /// Overwrites the parameter `param` with `value`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnknownParameter`] when the transform has no such
    /// parameter, [`PipelineError::ParameterType`] when the value variant
    /// does not match, [`PipelineError::InvalidValue`] when it is outside the
    /// parameter's domain.
    pub fn set_param(
        &mut self,
        step: &str,
        param: &str,
        value: &ParamValue,
    ) -> Result<(), PipelineError> {
        match (self, param) {
            (TransformSpec::Deseasonalize { sp }, "sp") => {
                let v = value.as_int().ok_or_else(|| PipelineError::ParameterType {
                    step: step.to_owned(),
                    param: param.to_owned(),
                    expected: "integer",
                })?;
                if v < 1 {
                    return Err(PipelineError::InvalidValue {
                        step: step.to_owned(),
                        param: param.to_owned(),
                        value: value.to_string(),
                        reason: "seasonal periodicity must be >= 1",
                    });
                }
                *sp = v as usize;
                Ok(())
            }
            (TransformSpec::RobustScale { with_scaling }, "with_scaling") => {
                *with_scaling =
                    value.as_bool().ok_or_else(|| PipelineError::ParameterType {
                        step: step.to_owned(),
                        param: param.to_owned(),
                        expected: "boolean",
                    })?;
                Ok(())
            }
            (TransformSpec::MinMaxScale { min, max }, "min" | "max") => {
                let v = value.as_float().ok_or_else(|| PipelineError::ParameterType {
                    step: step.to_owned(),
                    param: param.to_owned(),
                    expected: "float",
                })?;
                if !v.is_finite() {
                    return Err(PipelineError::InvalidValue {
                        step: step.to_owned(),
                        param: param.to_owned(),
                        value: value.to_string(),
                        reason: "bound must be finite",
                    });
                }
                if param == "min" {
                    *min = v;
                } else {
                    *max = v;
                }
                Ok(())
            }
            _ => Err(PipelineError::UnknownParameter {
                step: step.to_owned(),
                param: param.to_owned(),
            }),
        }
    }

    /// Fits the transform on a train window.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PipelineError::TooShort`] | fewer than 2 observations |
    /// | [`PipelineError::SeasonalTooShort`] | fewer than 2 full seasonal cycles |
    /// | [`PipelineError::ConstantWindow`] | min-max scaling a constant window |
    /// | [`PipelineError::InvalidValue`] | `min >= max` on a min-max scaler |
    pub fn fit(&self, step: &str, values: &[f64]) -> Result<FittedTransform, PipelineError> {
        let n = values.len();
        if n < 2 {
            return Err(PipelineError::TooShort {
                step: step.to_owned(),
                len: n,
                min: 2,
            });
        }
        match *self {
            TransformSpec::Detrend => {
                let (intercept, slope) = ols_line(values);
                Ok(FittedTransform::Detrend { intercept, slope })
            }
            TransformSpec::Deseasonalize { sp } => {
                if n < 2 * sp {
                    return Err(PipelineError::SeasonalTooShort {
                        step: step.to_owned(),
                        sp,
                        len: n,
                        required: 2 * sp,
                    });
                }
                Ok(FittedTransform::Deseasonalize {
                    seasonal: phase_means(values, sp),
                })
            }
            TransformSpec::RobustScale { with_scaling } => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let center = quantile(&sorted, 0.5);
                let scale = if with_scaling {
                    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
                    if iqr > 0.0 { iqr } else { 1.0 }
                } else {
                    1.0
                };
                Ok(FittedTransform::RobustScale { center, scale })
            }
            TransformSpec::MinMaxScale { min, max } => {
                if min >= max {
                    return Err(PipelineError::InvalidValue {
                        step: step.to_owned(),
                        param: "min".to_owned(),
                        value: min.to_string(),
                        reason: "lower bound must be below upper bound",
                    });
                }
                let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if data_max <= data_min {
                    return Err(PipelineError::ConstantWindow {
                        step: step.to_owned(),
                    });
                }
                Ok(FittedTransform::MinMaxScale {
                    data_min,
                    data_max,
                    out_min: min,
                    out_max: max,
                })
            }
        }
    }
}

/// A transform fitted on one train window.
#[derive(Clone, Debug)]
pub enum FittedTransform {
    /// Fitted linear trend `intercept + slope * position`.
    Detrend { intercept: f64, slope: f64 },
    /// Per-phase seasonal offsets, aligned to train position 0.
    Deseasonalize { seasonal: Vec<f64> },
    /// Median center and scale (1.0 when scaling is off or degenerate).
    RobustScale { center: f64, scale: f64 },
    /// Affine map of the train range onto the output range.
    MinMaxScale {
        data_min: f64,
        data_max: f64,
        out_min: f64,
        out_max: f64,
    },
}

impl FittedTransform {
    /// Maps the train window into transformed space.
    ///
    /// `values` must be the window the transform was fitted on; sample `i`
    /// is taken to sit at train position `i`.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        match self {
            FittedTransform::Detrend { intercept, slope } => values
                .iter()
                .enumerate()
                .map(|(i, v)| v - (intercept + slope * i as f64))
                .collect(),
            FittedTransform::Deseasonalize { seasonal } => values
                .iter()
                .enumerate()
                .map(|(i, v)| v - seasonal[i % seasonal.len()])
                .collect(),
            FittedTransform::RobustScale { center, scale } => {
                values.iter().map(|v| (v - center) / scale).collect()
            }
            FittedTransform::MinMaxScale {
                data_min,
                data_max,
                out_min,
                out_max,
            } => {
                let gain = (out_max - out_min) / (data_max - data_min);
                values
                    .iter()
                    .map(|v| out_min + (v - data_min) * gain)
                    .collect()
            }
        }
    }

    /// Maps transformed values back into the original space.
    ///
    /// `positions[i]` is the train-relative position of `values[i]`: train
    /// samples keep their index, a forecast `h` steps past the cutoff sits
    /// at `train_len - 1 + h`.
    pub fn inverse(&self, positions: &[usize], values: &[f64]) -> Vec<f64> {
        debug_assert_eq!(positions.len(), values.len());
        match self {
            FittedTransform::Detrend { intercept, slope } => positions
                .iter()
                .zip(values)
                .map(|(&p, v)| v + intercept + slope * p as f64)
                .collect(),
            FittedTransform::Deseasonalize { seasonal } => positions
                .iter()
                .zip(values)
                .map(|(&p, v)| v + seasonal[p % seasonal.len()])
                .collect(),
            FittedTransform::RobustScale { center, scale } => {
                values.iter().map(|v| v * scale + center).collect()
            }
            FittedTransform::MinMaxScale {
                data_min,
                data_max,
                out_min,
                out_max,
            } => {
                let gain = (data_max - data_min) / (out_max - out_min);
                values
                    .iter()
                    .map(|v| data_min + (v - out_min) * gain)
                    .collect()
            }
        }
    }
}

/// Verifies that `inverse(apply(values))` reproduces the train window.
///
/// # Errors
///
/// [`PipelineError::InversionMismatch`] naming the worst sample when any
/// round-trip error exceeds `tolerance`.
pub fn check_round_trip(
    step: &str,
    fitted: &FittedTransform,
    values: &[f64],
    tolerance: f64,
) -> Result<(), PipelineError> {
    let transformed = fitted.apply(values);
    let positions: Vec<usize> = (0..values.len()).collect();
    let restored = fitted.inverse(&positions, &transformed);
    let mut worst = (0usize, 0.0f64);
    for (i, (orig, back)) in values.iter().zip(&restored).enumerate() {
        let err = (orig - back).abs();
        // A NaN round trip is a mismatch, not a pass.
        let err = if err.is_nan() { f64::INFINITY } else { err };
        if err > worst.1 {
            worst = (i, err);
        }
    }
    if worst.1 > tolerance {
        return Err(PipelineError::InversionMismatch {
            step: step.to_owned(),
            index: worst.0,
            error: worst.1,
            tolerance,
        });
    }
    Ok(())
}

/// Least-squares line through `(i, values[i])`, returned as
/// `(intercept, slope)`.
fn ols_line(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, v) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (v - mean_y);
    }
    // sxx > 0 because fit() requires at least two observations.
    let slope = sxy / sxx;
    (mean_y - slope * mean_x, slope)
}

/// Per-phase means minus the overall mean, one entry per phase.
fn phase_means(values: &[f64], sp: usize) -> Vec<f64> {
    let overall = values.iter().sum::<f64>() / values.len() as f64;
    let mut sums = vec![0.0f64; sp];
    let mut counts = vec![0usize; sp];
    for (i, v) in values.iter().enumerate() {
        sums[i % sp] += v;
        counts[i % sp] += 1;
    }
    sums.iter()
        .zip(&counts)
        .map(|(s, &c)| s / c as f64 - overall)
        .collect()
}

/// Linear-interpolation quantile of a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn detrend_removes_exact_line() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fitted = TransformSpec::Detrend.fit("detrender", &values).unwrap();
        for r in fitted.apply(&values) {
            assert_relative_eq!(r, 0.0, epsilon = 1e-10);
        }
        // Extrapolation past the window end follows the fitted line.
        let out = fitted.inverse(&[11, 12], &[0.0, 0.0]);
        assert_relative_eq!(out[0], 25.0, epsilon = 1e-10);
        assert_relative_eq!(out[1], 27.0, epsilon = 1e-10);
    }

    #[test]
    fn deseasonalize_removes_pure_cycle() {
        let values: Vec<f64> = (0..12).map(|i| [5.0, -1.0, 2.0][i % 3] + 10.0).collect();
        let spec = TransformSpec::Deseasonalize { sp: 3 };
        let fitted = spec.fit("deseasonalizer", &values).unwrap();
        for r in fitted.apply(&values) {
            assert_relative_eq!(r, 12.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn deseasonalize_requires_two_cycles() {
        let values = vec![1.0; 10];
        let spec = TransformSpec::Deseasonalize { sp: 6 };
        let err = spec.fit("deseasonalizer", &values).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SeasonalTooShort {
                sp: 6,
                len: 10,
                required: 12,
                ..
            }
        ));
    }

    #[test]
    fn deseasonalize_sp_one_is_identity() {
        let values = vec![3.0, 7.0, 5.0, 9.0];
        let spec = TransformSpec::Deseasonalize { sp: 1 };
        let fitted = spec.fit("deseasonalizer", &values).unwrap();
        for (r, v) in fitted.apply(&values).iter().zip(&values) {
            assert_relative_eq!(r, v, epsilon = 1e-10);
        }
    }

    #[test]
    fn robust_scale_centers_on_median() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 100.0];
        let spec = TransformSpec::RobustScale { with_scaling: true };
        let fitted = spec.fit("scaler", &values).unwrap();
        let out = fitted.apply(&values);
        // Median 3, IQR = 4 - 2 = 2.
        assert_relative_eq!(out[2], 0.0, epsilon = 1e-10);
        assert_relative_eq!(out[3], 0.5, epsilon = 1e-10);
    }

    #[test]
    fn robust_scale_without_scaling_keeps_spread() {
        let values = vec![1.0, 3.0, 5.0];
        let spec = TransformSpec::RobustScale {
            with_scaling: false,
        };
        let fitted = spec.fit("scaler", &values).unwrap();
        let out = fitted.apply(&values);
        assert_relative_eq!(out[2] - out[0], 4.0, epsilon = 1e-10);
    }

    #[test]
    fn robust_scale_constant_window_falls_back() {
        // Zero IQR falls back to unit scale instead of dividing by zero.
        let values = vec![5.0; 8];
        let spec = TransformSpec::RobustScale { with_scaling: true };
        let fitted = spec.fit("scaler", &values).unwrap();
        for r in fitted.apply(&values) {
            assert_relative_eq!(r, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn minmax_maps_onto_output_range() {
        let values = vec![2.0, 4.0, 6.0, 8.0];
        let spec = TransformSpec::MinMaxScale { min: 1.0, max: 10.0 };
        let fitted = spec.fit("scaler", &values).unwrap();
        let out = fitted.apply(&values);
        assert_relative_eq!(out[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(out[3], 10.0, epsilon = 1e-10);
    }

    #[test]
    fn minmax_rejects_constant_window() {
        let values = vec![5.0; 4];
        let spec = TransformSpec::MinMaxScale { min: 1.0, max: 10.0 };
        let err = spec.fit("scaler", &values).unwrap_err();
        assert!(matches!(err, PipelineError::ConstantWindow { .. }));
    }

    #[test]
    fn minmax_rejects_inverted_bounds() {
        let values = vec![1.0, 2.0];
        let spec = TransformSpec::MinMaxScale { min: 10.0, max: 1.0 };
        let err = spec.fit("scaler", &values).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidValue { .. }));
    }

    #[test]
    fn fit_requires_two_observations() {
        let err = TransformSpec::Detrend.fit("detrender", &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TooShort { len: 1, min: 2, .. }
        ));
    }

    #[test]
    fn set_param_type_mismatch() {
        let mut spec = TransformSpec::Deseasonalize { sp: 1 };
        let err = spec
            .set_param("deseasonalizer", "sp", &ParamValue::Str("many".into()))
            .unwrap_err();
        assert!(matches!(err, PipelineError::ParameterType { .. }));
    }

    #[test]
    fn set_param_rejects_zero_sp() {
        let mut spec = TransformSpec::Deseasonalize { sp: 4 };
        let err = spec
            .set_param("deseasonalizer", "sp", &ParamValue::Int(0))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidValue { .. }));
    }

    #[test]
    fn set_param_unknown_parameter() {
        let mut spec = TransformSpec::Detrend;
        let err = spec
            .set_param("detrender", "sp", &ParamValue::Int(4))
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnknownParameter { .. }));
    }

    #[test]
    fn round_trip_within_tolerance() {
        let values = vec![4.0, 9.0, 2.0, 7.0, 5.0];
        let spec = TransformSpec::MinMaxScale { min: 1.0, max: 10.0 };
        let fitted = spec.fit("scaler", &values).unwrap();
        check_round_trip("scaler", &fitted, &values, 1e-9).unwrap();
    }

    #[test]
    fn round_trip_detects_mismatch() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        // A degenerate scale destroys the round trip.
        let broken = FittedTransform::RobustScale {
            center: 1.0,
            scale: 0.0,
        };
        let err = check_round_trip("scaler", &broken, &values, 1e-9).unwrap_err();
        assert!(matches!(err, PipelineError::InversionMismatch { .. }));
    }
}
