//! CSV ingestion and persistence collaborators.
//!
//! The library crates never touch storage; everything path-shaped lives
//! here. Input is `period,value` CSV with a header row; periods are plain
//! grid indices (calendar mapping happens upstream of this tool).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pythia_search::Forecast;
use pythia_series::Series;

#[derive(Debug, Deserialize)]
struct ObservationRow {
    period: i64,
    value: f64,
}

#[derive(Debug, Serialize)]
struct ForecastRow {
    period: i64,
    value: f64,
}

/// Reads a `period,value` CSV into a validated [`Series`].
pub fn read_series(path: &Path) -> Result<Series> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input CSV: {}", path.display()))?;
    let mut periods = Vec::new();
    let mut values = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let row: ObservationRow = row
            .with_context(|| format!("malformed row {} in {}", i + 2, path.display()))?;
        periods.push(row.period);
        values.push(row.value);
    }
    Series::new(periods, values)
        .with_context(|| format!("invalid series in {}", path.display()))
}

/// Writes a forecast as `period,value` CSV.
pub fn write_forecast(path: &Path, forecast: &Forecast) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output CSV: {}", path.display()))?;
    for (period, value) in forecast.iter() {
        writer
            .serialize(ForecastRow { period, value })
            .context("failed to write forecast row")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush output CSV: {}", path.display()))?;
    Ok(())
}
