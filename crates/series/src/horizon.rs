//! Forecasting horizons, relative or absolute.

use crate::error::SeriesError;

/// The future periods for which a forecast is requested.
///
/// A relative horizon lists step offsets from a cutoff (1 = first period
/// after the last observation). An absolute horizon lists concrete periods
/// on the series' grid; it is resolved against the cutoff at fit time. Both
/// forms resolve to the same offset sequence, so downstream prediction has a
/// single code path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Horizon {
    /// Step offsets from the cutoff, strictly increasing, each >= 1.
    Relative(Vec<usize>),
    /// Concrete future periods on the series' period grid.
    Absolute(Vec<i64>),
}

impl Horizon {
    /// Builds the contiguous relative horizon `1..=len`.
    pub fn steps(len: usize) -> Self {
        Horizon::Relative((1..=len).collect())
    }

    /// Returns the number of requested periods.
    pub fn len(&self) -> usize {
        match self {
            Horizon::Relative(offsets) => offsets.len(),
            Horizon::Absolute(periods) => periods.len(),
        }
    }

    /// Returns `true` if no periods are requested.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the horizon into step offsets from `cutoff`.
    ///
    /// Absolute periods must lie strictly after the cutoff and on the period
    /// grid defined by `step`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::EmptyHorizon`] | no periods requested |
    /// | [`SeriesError::InvalidOffset`] | relative offset zero or out of order |
    /// | [`SeriesError::NotFuture`] | absolute period at or before the cutoff |
    /// | [`SeriesError::OffGrid`] | absolute period not on the period grid |
    pub fn offsets(&self, cutoff: i64, step: i64) -> Result<Vec<usize>, SeriesError> {
        if self.is_empty() {
            return Err(SeriesError::EmptyHorizon);
        }
        match self {
            Horizon::Relative(offsets) => {
                let mut prev = 0usize;
                for (index, &offset) in offsets.iter().enumerate() {
                    if offset == 0 || offset <= prev {
                        return Err(SeriesError::InvalidOffset { index, offset });
                    }
                    prev = offset;
                }
                Ok(offsets.clone())
            }
            Horizon::Absolute(periods) => {
                let mut out = Vec::with_capacity(periods.len());
                let mut prev = 0usize;
                for (index, &period) in periods.iter().enumerate() {
                    if period <= cutoff {
                        return Err(SeriesError::NotFuture { period, cutoff });
                    }
                    let gap = period - cutoff;
                    if gap % step != 0 {
                        return Err(SeriesError::OffGrid {
                            period,
                            cutoff,
                            step,
                        });
                    }
                    let offset = (gap / step) as usize;
                    if offset <= prev {
                        return Err(SeriesError::InvalidOffset { index, offset });
                    }
                    prev = offset;
                    out.push(offset);
                }
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_builds_contiguous_horizon() {
        assert_eq!(Horizon::steps(3), Horizon::Relative(vec![1, 2, 3]));
        assert_eq!(Horizon::steps(0).len(), 0);
    }

    #[test]
    fn relative_offsets_pass_through() {
        let h = Horizon::Relative(vec![1, 2, 5]);
        assert_eq!(h.offsets(100, 1).unwrap(), vec![1, 2, 5]);
    }

    #[test]
    fn relative_zero_offset_rejected() {
        let h = Horizon::Relative(vec![0, 1]);
        let err = h.offsets(0, 1).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::InvalidOffset {
                index: 0,
                offset: 0
            }
        ));
    }

    #[test]
    fn relative_unordered_rejected() {
        let h = Horizon::Relative(vec![2, 2]);
        let err = h.offsets(0, 1).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidOffset { index: 1, .. }));
    }

    #[test]
    fn absolute_resolves_against_cutoff() {
        // cutoff 24, step 2: periods 26, 28, 32 are offsets 1, 2, 4.
        let h = Horizon::Absolute(vec![26, 28, 32]);
        assert_eq!(h.offsets(24, 2).unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn absolute_and_relative_agree() {
        let rel = Horizon::Relative(vec![1, 2, 3]);
        let abs = Horizon::Absolute(vec![25, 26, 27]);
        assert_eq!(rel.offsets(24, 1).unwrap(), abs.offsets(24, 1).unwrap());
    }

    #[test]
    fn absolute_past_period_rejected() {
        let h = Horizon::Absolute(vec![24]);
        let err = h.offsets(24, 1).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NotFuture {
                period: 24,
                cutoff: 24
            }
        ));
    }

    #[test]
    fn absolute_off_grid_rejected() {
        let h = Horizon::Absolute(vec![27]);
        let err = h.offsets(24, 2).unwrap_err();
        assert!(matches!(err, SeriesError::OffGrid { period: 27, .. }));
    }

    #[test]
    fn empty_horizon_rejected() {
        let h = Horizon::Relative(vec![]);
        assert!(matches!(
            h.offsets(0, 1).unwrap_err(),
            SeriesError::EmptyHorizon
        ));
    }
}
