//! # pythia-search
//!
//! Parallel model selection over pipeline grids.
//!
//! [`search`] scores every grid point against every cross-validation split
//! (candidates in parallel via rayon, selection sequential in grid order so
//! results never depend on thread scheduling), disqualifies candidates whose
//! fit or predict fails, and refits the winner on the full series.
//! [`run_forecast`] then resolves a horizon against the series and produces
//! the final [`Forecast`].
//!
//! Scores come from the [`scoring`] module or any
//! `Fn(&[f64], &[f64]) -> f64` the caller supplies; lower is better.

mod engine;
mod error;
mod record;
mod runner;
pub mod scoring;

pub use engine::{search, SearchConfig};
pub use error::SearchError;
pub use record::{ScoreRecord, SearchOutcome, SelectedModel};
pub use runner::{run_forecast, Forecast};
