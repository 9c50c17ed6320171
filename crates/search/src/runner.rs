//! Forecast production from a selected model.

use pythia_series::{Horizon, Series};

use crate::error::SearchError;
use crate::record::SelectedModel;

/// A forecast: future periods paired with predicted values.
///
/// Unlike a [`Series`], a forecast may be a single point or skip periods
/// (an absolute horizon need not be contiguous), so it carries no grid
/// invariants of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Forecast {
    periods: Vec<i64>,
    values: Vec<f64>,
}

impl Forecast {
    /// Forecast periods, strictly increasing.
    pub fn periods(&self) -> &[i64] {
        &self.periods
    }

    /// Predicted values, aligned with [`periods`](Self::periods).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of forecast points.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the forecast is empty. Never true for the output of
    /// [`run_forecast`].
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Iterates over `(period, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.periods.iter().copied().zip(self.values.iter().copied())
    }
}

/// Produces the final forecast from a selected model.
///
/// `series` must be the series the model was selected on; the horizon is
/// resolved against its cutoff and step.
///
/// # Errors
///
/// [`SearchError::Horizon`] when the horizon does not resolve against the
/// series, [`SearchError::Forecast`] when the fitted pipeline fails to
/// predict.
pub fn run_forecast(
    series: &Series,
    model: &SelectedModel,
    horizon: &Horizon,
) -> Result<Forecast, SearchError> {
    let offsets = horizon.offsets(series.cutoff(), series.step())?;
    let values = model
        .fitted
        .predict(&offsets)
        .map_err(|source| SearchError::Forecast { source })?;
    let periods = offsets
        .iter()
        .map(|&h| series.period_at_offset(h))
        .collect();
    tracing::info!(model = %model.point, points = values.len(), "forecast produced");
    Ok(Forecast { periods, values })
}
