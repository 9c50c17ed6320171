//! Cross-validation window generation.

use std::ops::Range;

use pythia_series::Series;

use crate::error::SplitError;

/// How train windows are carved out of a series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Exactly one split: everything up to the horizon trains, the rest
    /// validates.
    Single,
    /// Fixed-length train window advancing by `step` each split.
    Sliding {
        /// Train window length.
        window: usize,
        /// Periods the window advances between splits.
        step: usize,
    },
    /// Train window start fixed at the first observation, end growing by
    /// `step` each split.
    Expanding {
        /// Length of the first train window.
        initial: usize,
        /// Periods the window grows between splits.
        step: usize,
    },
}

/// One train/validation partition of a series.
///
/// Holds index ranges into the series, never copies of its values. The train
/// range always precedes the validation range, and the validation range has
/// exactly the horizon length it was built for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    train: Range<usize>,
    validation: Range<usize>,
}

impl Split {
    pub(crate) fn new(train: Range<usize>, validation: Range<usize>) -> Self {
        debug_assert_eq!(train.end, validation.start);
        Self { train, validation }
    }

    /// Returns the train index range.
    pub fn train(&self) -> Range<usize> {
        self.train.clone()
    }

    /// Returns the validation index range.
    pub fn validation(&self) -> Range<usize> {
        self.validation.clone()
    }

    /// Returns the number of train observations.
    pub fn train_len(&self) -> usize {
        self.train.len()
    }
}

/// Generates train/validation splits for `series` under `policy`.
///
/// Every split's validation range has length `horizon_len`. A candidate
/// window whose validation range would extend past the end of the series is
/// dropped, not truncated — a shortened validation window would bias the
/// score.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SplitError::ZeroHorizon`] | `horizon_len == 0` |
/// | [`SplitError::ZeroPolicyParameter`] | a window or step parameter is 0 |
/// | [`SplitError::InsufficientData`] | not even one split fits the series |
pub fn make_splits(
    series: &Series,
    horizon_len: usize,
    policy: &WindowPolicy,
) -> Result<Vec<Split>, SplitError> {
    if horizon_len == 0 {
        return Err(SplitError::ZeroHorizon);
    }
    let len = series.len();
    if len < horizon_len + 1 {
        return Err(SplitError::InsufficientData {
            len,
            required: horizon_len + 1,
        });
    }

    let splits = match *policy {
        WindowPolicy::Single => {
            let cut = len - horizon_len;
            vec![Split::new(0..cut, cut..len)]
        }
        WindowPolicy::Sliding { window, step } => {
            if window == 0 {
                return Err(SplitError::ZeroPolicyParameter { name: "window" });
            }
            if step == 0 {
                return Err(SplitError::ZeroPolicyParameter { name: "step" });
            }
            let mut out = Vec::new();
            let mut start = 0usize;
            while start + window + horizon_len <= len {
                let cut = start + window;
                out.push(Split::new(start..cut, cut..cut + horizon_len));
                start += step;
            }
            if out.is_empty() {
                return Err(SplitError::InsufficientData {
                    len,
                    required: window + horizon_len,
                });
            }
            out
        }
        WindowPolicy::Expanding { initial, step } => {
            if initial == 0 {
                return Err(SplitError::ZeroPolicyParameter { name: "initial" });
            }
            if step == 0 {
                return Err(SplitError::ZeroPolicyParameter { name: "step" });
            }
            let mut out = Vec::new();
            let mut cut = initial;
            while cut + horizon_len <= len {
                out.push(Split::new(0..cut, cut..cut + horizon_len));
                cut += step;
            }
            if out.is_empty() {
                return Err(SplitError::InsufficientData {
                    len,
                    required: initial + horizon_len,
                });
            }
            out
        }
    };

    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(len: usize) -> Series {
        let periods = (0..len as i64).collect();
        let values = (0..len).map(|i| i as f64).collect();
        Series::new(periods, values).unwrap()
    }

    #[test]
    fn single_partitions_without_overlap_or_gap() {
        let s = series_of(10);
        let splits = make_splits(&s, 3, &WindowPolicy::Single).unwrap();
        assert_eq!(splits.len(), 1);
        let split = &splits[0];
        assert_eq!(split.train(), 0..7);
        assert_eq!(split.validation(), 7..10);
        // Train and validation partition the series exactly.
        assert_eq!(split.train().end, split.validation().start);
        assert_eq!(split.train().len() + split.validation().len(), s.len());
    }

    #[test]
    fn single_minimal_series() {
        // len == horizon + 1: one-observation train window.
        let s = series_of(4);
        let splits = make_splits(&s, 3, &WindowPolicy::Single).unwrap();
        assert_eq!(splits[0].train(), 0..1);
        assert_eq!(splits[0].validation(), 1..4);
    }

    #[test]
    fn insufficient_data_error() {
        let s = series_of(3);
        let err = make_splits(&s, 3, &WindowPolicy::Single).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InsufficientData {
                len: 3,
                required: 4
            }
        ));
    }

    #[test]
    fn zero_horizon_error() {
        let s = series_of(10);
        let err = make_splits(&s, 0, &WindowPolicy::Single).unwrap_err();
        assert!(matches!(err, SplitError::ZeroHorizon));
    }

    #[test]
    fn sliding_constant_train_length() {
        let s = series_of(10);
        let policy = WindowPolicy::Sliding { window: 4, step: 2 };
        let splits = make_splits(&s, 2, &policy).unwrap();
        // Windows: [0..4|4..6], [2..6|6..8], [4..8|8..10].
        assert_eq!(splits.len(), 3);
        for split in &splits {
            assert_eq!(split.train_len(), 4);
            assert_eq!(split.validation().len(), 2);
        }
        assert_eq!(splits[0].train(), 0..4);
        assert_eq!(splits[2].validation(), 8..10);
    }

    #[test]
    fn sliding_drops_overflowing_window() {
        // Next window would validate at 10..12, past the end: dropped.
        let s = series_of(11);
        let policy = WindowPolicy::Sliding { window: 4, step: 2 };
        let splits = make_splits(&s, 2, &policy).unwrap();
        assert_eq!(splits.len(), 3);
        assert!(splits.iter().all(|s| s.validation().end <= 11));
    }

    #[test]
    fn sliding_window_too_large() {
        let s = series_of(5);
        let policy = WindowPolicy::Sliding { window: 5, step: 1 };
        let err = make_splits(&s, 2, &policy).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InsufficientData {
                len: 5,
                required: 7
            }
        ));
    }

    #[test]
    fn sliding_zero_window_error() {
        let s = series_of(10);
        let policy = WindowPolicy::Sliding { window: 0, step: 1 };
        let err = make_splits(&s, 2, &policy).unwrap_err();
        assert!(matches!(
            err,
            SplitError::ZeroPolicyParameter { name: "window" }
        ));
    }

    #[test]
    fn expanding_grows_train_window() {
        let s = series_of(10);
        let policy = WindowPolicy::Expanding {
            initial: 4,
            step: 2,
        };
        let splits = make_splits(&s, 2, &policy).unwrap();
        // Cuts at 4, 6, 8.
        assert_eq!(splits.len(), 3);
        assert_eq!(splits[0].train(), 0..4);
        assert_eq!(splits[1].train(), 0..6);
        assert_eq!(splits[2].train(), 0..8);
        for split in &splits {
            assert_eq!(split.train().start, 0);
            assert_eq!(split.validation().len(), 2);
        }
    }

    #[test]
    fn expanding_initial_too_large() {
        let s = series_of(5);
        let policy = WindowPolicy::Expanding {
            initial: 5,
            step: 1,
        };
        let err = make_splits(&s, 1, &policy).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InsufficientData {
                len: 5,
                required: 6
            }
        ));
    }

    #[test]
    fn split_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Split>();
        assert_impl::<WindowPolicy>();
    }
}
