//! Point forecasters.
//!
//! Forecasters fit on a train window (in transformed space when transforms
//! precede them) and predict values at offsets past the cutoff. All are
//! deterministic; a refit on the same window reproduces the same state.

use crate::error::PipelineError;
use crate::param::ParamValue;

/// Strategy of the naive forecaster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NaiveStrategy {
    /// Repeat the last observed cycle.
    Last,
    /// Repeat the per-phase train means.
    Mean,
    /// Extend the line through the first and last observation.
    Drift,
}

impl NaiveStrategy {
    fn parse(step: &str, value: &ParamValue) -> Result<Self, PipelineError> {
        let text = value.as_str().ok_or_else(|| PipelineError::ParameterType {
            step: step.to_owned(),
            param: "strategy".to_owned(),
            expected: "string",
        })?;
        match text {
            "last" => Ok(NaiveStrategy::Last),
            "mean" => Ok(NaiveStrategy::Mean),
            "drift" => Ok(NaiveStrategy::Drift),
            _ => Err(PipelineError::InvalidValue {
                step: step.to_owned(),
                param: "strategy".to_owned(),
                value: text.to_owned(),
                reason: "expected one of last, mean, drift",
            }),
        }
    }
}

/// An unfitted forecaster.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecasterSpec {
    /// Seasonal naive forecaster.
    Naive {
        /// Forecasting strategy.
        strategy: NaiveStrategy,
        /// Seasonal periodicity; 1 disables seasonality.
        sp: usize,
    },
    /// Theta forecaster (exponential smoothing with a damped drift),
    /// deseasonalizing internally when `sp > 1`.
    Theta {
        /// Seasonal periodicity; 1 disables seasonality.
        sp: usize,
    },
    /// Holt linear exponential smoothing.
    Smoothing {
        /// Level smoothing coefficient, in `(0, 1]`.
        alpha: f64,
        /// Trend smoothing coefficient, in `[0, 1]`; 0 disables the trend.
        beta: f64,
    },
}

impl ForecasterSpec {
    /// Overwrites the parameter `param` with `value`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`TransformSpec::set_param`]
    /// (crate::TransformSpec::set_param).
    pub fn set_param(
        &mut self,
        step: &str,
        param: &str,
        value: &ParamValue,
    ) -> Result<(), PipelineError> {
        match (self, param) {
            (ForecasterSpec::Naive { strategy, .. }, "strategy") => {
                *strategy = NaiveStrategy::parse(step, value)?;
                Ok(())
            }
            (ForecasterSpec::Naive { sp, .. } | ForecasterSpec::Theta { sp }, "sp") => {
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
            (ForecasterSpec::Smoothing { alpha, beta }, "alpha" | "beta") => {
                let v = value.as_float().ok_or_else(|| PipelineError::ParameterType {
                    step: step.to_owned(),
                    param: param.to_owned(),
                    expected: "float",
                })?;
                let ok = if param == "alpha" {
                    v > 0.0 && v <= 1.0
                } else {
                    (0.0..=1.0).contains(&v)
                };
                if !ok {
                    return Err(PipelineError::InvalidValue {
                        step: step.to_owned(),
                        param: param.to_owned(),
                        value: value.to_string(),
                        reason: "smoothing coefficient out of range",
                    });
                }
                if param == "alpha" {
                    *alpha = v;
                } else {
                    *beta = v;
                }
                Ok(())
            }
            _ => Err(PipelineError::UnknownParameter {
                step: step.to_owned(),
                param: param.to_owned(),
            }),
        }
    }

    /// Fits the forecaster on a train window.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PipelineError::TooShort`] | window shorter than the strategy needs |
    /// | [`PipelineError::SeasonalTooShort`] | theta with fewer than 2 cycles |
    pub fn fit(&self, step: &str, values: &[f64]) -> Result<FittedForecaster, PipelineError> {
        let n = values.len();
        match *self {
            ForecasterSpec::Naive { strategy, sp } => {
                let min = match strategy {
                    NaiveStrategy::Last | NaiveStrategy::Mean => sp.max(2),
                    NaiveStrategy::Drift => 2,
                };
                if n < min {
                    return Err(PipelineError::TooShort {
                        step: step.to_owned(),
                        len: n,
                        min,
                    });
                }
                match strategy {
                    NaiveStrategy::Last => Ok(FittedForecaster::Cycle {
                        aligned: values[n - sp..].to_vec(),
                        drift: 0.0,
                        level: 0.0,
                    }),
                    NaiveStrategy::Mean => Ok(FittedForecaster::Cycle {
                        aligned: aligned_phase_means(values, sp),
                        drift: 0.0,
                        level: 0.0,
                    }),
                    NaiveStrategy::Drift => Ok(FittedForecaster::Drift {
                        last: values[n - 1],
                        slope: (values[n - 1] - values[0]) / (n - 1) as f64,
                    }),
                }
            }
            ForecasterSpec::Theta { sp } => {
                if n < 2 {
                    return Err(PipelineError::TooShort {
                        step: step.to_owned(),
                        len: n,
                        min: 2,
                    });
                }
                let (seasonal, adjusted);
                if sp > 1 {
                    if n < 2 * sp {
                        return Err(PipelineError::SeasonalTooShort {
                            step: step.to_owned(),
                            sp,
                            len: n,
                            required: 2 * sp,
                        });
                    }
                    let phases = crate::transform::TransformSpec::Deseasonalize { sp }
                        .fit(step, values)?;
                    adjusted = phases.apply(values);
                    seasonal = align_to_cutoff(&phases, n);
                } else {
                    adjusted = values.to_vec();
                    seasonal = vec![0.0];
                }
                // Theta(0)/Theta(2) combination: SES level on the adjusted
                // window plus half the fitted linear slope as drift.
                let level = ses_level(&adjusted, 0.5);
                let slope = ols_slope(&adjusted);
                Ok(FittedForecaster::Cycle {
                    aligned: seasonal,
                    drift: slope / 2.0,
                    level,
                })
            }
            ForecasterSpec::Smoothing { alpha, beta } => {
                if n < 2 {
                    return Err(PipelineError::TooShort {
                        step: step.to_owned(),
                        len: n,
                        min: 2,
                    });
                }
                if beta == 0.0 {
                    return Ok(FittedForecaster::Drift {
                        last: ses_level(values, alpha),
                        slope: 0.0,
                    });
                }
                let mut level = values[0];
                let mut trend = values[1] - values[0];
                for &x in &values[1..] {
                    let prev = level;
                    level = alpha * x + (1.0 - alpha) * (prev + trend);
                    trend = beta * (level - prev) + (1.0 - beta) * trend;
                }
                Ok(FittedForecaster::Drift {
                    last: level,
                    slope: trend,
                })
            }
        }
    }
}

/// A forecaster fitted on one train window.
#[derive(Clone, Debug)]
pub enum FittedForecaster {
    /// Linear extrapolation from a final level.
    Drift { last: f64, slope: f64 },
    /// Level plus drift plus a repeating cycle aligned to the cutoff:
    /// offset `h` reads `aligned[(h - 1) % len]`.
    Cycle {
        aligned: Vec<f64>,
        drift: f64,
        level: f64,
    },
}

impl FittedForecaster {
    /// Predicts the value at each offset past the cutoff.
    ///
    /// Offsets must be at least 1; [`PipelineSpec::fit`]
    /// (crate::PipelineSpec::fit) callers validate them via the horizon
    /// machinery before reaching this point.
    pub fn predict(&self, offsets: &[usize]) -> Vec<f64> {
        debug_assert!(
            offsets.iter().all(|&h| h >= 1),
            "forecast offsets start at 1"
        );
        match self {
            FittedForecaster::Drift { last, slope } => offsets
                .iter()
                .map(|&h| last + slope * h as f64)
                .collect(),
            FittedForecaster::Cycle {
                aligned,
                drift,
                level,
            } => offsets
                .iter()
                .map(|&h| level + drift * h as f64 + aligned[(h - 1) % aligned.len()])
                .collect(),
        }
    }
}

/// Per-phase train means, rotated so index 0 is the phase of offset 1.
fn aligned_phase_means(values: &[f64], sp: usize) -> Vec<f64> {
    let n = values.len();
    let mut sums = vec![0.0f64; sp];
    let mut counts = vec![0usize; sp];
    for (i, v) in values.iter().enumerate() {
        sums[i % sp] += v;
        counts[i % sp] += 1;
    }
    (0..sp).map(|j| sums[(n + j) % sp] / counts[(n + j) % sp] as f64).collect()
}

/// Rotates a fitted deseasonalizer's offsets so index 0 is the phase of
/// offset 1.
fn align_to_cutoff(fitted: &crate::transform::FittedTransform, n: usize) -> Vec<f64> {
    match fitted {
        crate::transform::FittedTransform::Deseasonalize { seasonal } => {
            let sp = seasonal.len();
            (0..sp).map(|j| seasonal[(n + j) % sp]).collect()
        }
        _ => vec![0.0],
    }
}

/// Final simple-exponential-smoothing level.
fn ses_level(values: &[f64], alpha: f64) -> f64 {
    let mut level = values[0];
    for &x in &values[1..] {
        level = alpha * x + (1.0 - alpha) * level;
    }
    level
}

/// Least-squares slope of `(i, values[i])`.
fn ols_slope(values: &[f64]) -> f64 {
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
    sxy / sxx
}
