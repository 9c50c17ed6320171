//! Error types for the pythia-search crate.

use pythia_grid::GridError;
use pythia_pipeline::PipelineError;
use pythia_series::SeriesError;

/// Error type for all fallible operations in the pythia-search crate.
///
/// Per-candidate fit and predict failures are contained inside the search
/// and never surface here; these variants cover the cases where the search
/// as a whole cannot produce a model.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Returned when every candidate failed on every split.
    #[error("no viable configuration: all {candidates} candidates failed across {splits} splits")]
    NoViableConfiguration {
        /// Number of candidates tried.
        candidates: usize,
        /// Number of cross-validation splits.
        splits: usize,
    },

    /// Returned when the caller supplies no cross-validation splits.
    #[error("no cross-validation splits supplied")]
    NoSplits,

    /// Returned when the grid itself is malformed.
    #[error("grid expansion failed")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// Returned when the winning pipeline fails to refit on the full series.
    #[error("winning candidate failed to refit on the full series")]
    Refit {
        /// The underlying pipeline error.
        #[source]
        source: PipelineError,
    },

    /// Returned when the forecast horizon cannot be resolved against the
    /// series.
    #[error("horizon does not resolve against the series")]
    Horizon {
        /// The underlying series error.
        #[from]
        source: SeriesError,
    },

    /// Returned when the selected model fails to forecast.
    #[error("selected model failed to forecast")]
    Forecast {
        /// The underlying pipeline error.
        #[source]
        source: PipelineError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_no_viable_configuration() {
        let e = SearchError::NoViableConfiguration {
            candidates: 14,
            splits: 3,
        };
        assert_eq!(
            e.to_string(),
            "no viable configuration: all 14 candidates failed across 3 splits"
        );
    }

    #[test]
    fn error_wraps_grid_source() {
        use std::error::Error;

        let e = SearchError::from(GridError::EmptyGrid);
        assert!(e.source().is_some());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SearchError>();
    }
}
