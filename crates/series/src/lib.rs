//! # pythia-series
//!
//! Validated period-indexed series and forecasting horizons.
//!
//! A [`Series`] is an immutable univariate time series on a regular `i64`
//! period grid; construction enforces the invariants the rest of the
//! workspace relies on (finite values, strictly increasing periods, uniform
//! spacing). A [`Horizon`] names the future periods to forecast, either as
//! offsets from the cutoff or as absolute periods, and resolves both forms
//! to one offset sequence.
//!
//! ```
//! use pythia_series::{Horizon, Series};
//!
//! let s = Series::new(vec![0, 1, 2, 3], vec![10.0, 11.0, 12.0, 13.0])?;
//! let h = Horizon::steps(2);
//! assert_eq!(h.offsets(s.cutoff(), s.step())?, vec![1, 2]);
//! # Ok::<(), pythia_series::SeriesError>(())
//! ```

mod error;
mod horizon;
mod series;

pub use error::SeriesError;
pub use horizon::Horizon;
pub use series::Series;
