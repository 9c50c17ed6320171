//! Forecast accuracy metrics.
//!
//! Lower is better for every metric here; the search minimizes whichever
//! scorer it is handed.

/// Mean absolute error between aligned actual and predicted values.
///
/// Returns `f64::INFINITY` on empty or mismatched inputs so a malformed
/// comparison can never win a search.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return f64::INFINITY;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum / actual.len() as f64
}

/// Root mean squared error between aligned actual and predicted values.
///
/// Returns `f64::INFINITY` on empty or mismatched inputs.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return f64::INFINITY;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    (sum / actual.len() as f64).sqrt()
}
