//! # pythia-pipeline
//!
//! Composable forecasting pipelines: invertible transforms followed by a
//! point forecaster, with grid-addressable hyperparameters.
//!
//! | Step | Role |
//! |------|------|
//! | [`TransformSpec::Detrend`] | subtract a least-squares trend |
//! | [`TransformSpec::Deseasonalize`] | subtract per-phase seasonal means |
//! | [`TransformSpec::RobustScale`] | median/IQR scaling |
//! | [`TransformSpec::MinMaxScale`] | affine map onto a fixed range |
//! | [`ForecasterSpec::Naive`] | last/mean/drift strategies |
//! | [`ForecasterSpec::Theta`] | theta-style smoothing with drift |
//! | [`ForecasterSpec::Smoothing`] | Holt linear smoothing |
//!
//! A [`PipelineSpec`] is cheap to clone; the search engine clones one per
//! grid point, rewrites hyperparameters through [`PipelineSpec::set_param`],
//! and fits each clone independently. Fitting yields a [`FittedPipeline`]
//! whose forecasts are mapped back through every transform in reverse
//! order, so callers always see values in the original space.

mod error;
mod forecaster;
mod param;
mod pipeline;
mod transform;

pub use error::PipelineError;
pub use forecaster::{FittedForecaster, ForecasterSpec, NaiveStrategy};
pub use param::ParamValue;
pub use pipeline::{FittedPipeline, PipelineSpec};
pub use transform::{check_round_trip, FittedTransform, TransformSpec};
