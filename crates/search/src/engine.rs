//! Parallel grid search over candidate pipelines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use pythia_grid::{GridPoint, ParamGrid};
use pythia_pipeline::PipelineSpec;
use pythia_series::Series;
use pythia_split::Split;

use crate::error::SearchError;
use crate::record::{ScoreRecord, SearchOutcome, SelectedModel};

/// Knobs for one search run.
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchConfig {
    /// Creates a config with no cancellation flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a cancellation flag. Once the flag is set, candidates that
    /// have not started are skipped; candidates already scoring run to
    /// completion.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|f| f.load(Ordering::Relaxed))
    }
}

/// Scores every grid point against every split and selects the best.
///
/// Candidates are scored in parallel; selection is a sequential pass in
/// grid order, so the result is deterministic regardless of thread count.
/// Ties break toward the earlier grid point. A candidate whose fit or
/// predict fails on any split is disqualified, not fatal; the failure is
/// recorded on its [`ScoreRecord`]. The winner is refitted on the full
/// series before being returned.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SearchError::NoSplits`] | `splits` is empty |
/// | [`SearchError::Grid`] | the grid fails to expand or realise |
/// | [`SearchError::NoViableConfiguration`] | every candidate failed or was skipped |
/// | [`SearchError::Refit`] | the winner fails on the full series |
pub fn search<S>(
    series: &Series,
    splits: &[Split],
    grid: &ParamGrid,
    scorer: S,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError>
where
    S: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    if splits.is_empty() {
        return Err(SearchError::NoSplits);
    }
    let points = grid.expand()?;
    let candidates: Vec<(GridPoint, PipelineSpec)> = points
        .into_iter()
        .map(|point| {
            let spec = grid.realise(&point)?;
            Ok((point, spec))
        })
        .collect::<Result<_, SearchError>>()?;
    let n_candidates = candidates.len();
    tracing::info!(candidates = n_candidates, splits = splits.len(), "starting search");

    let scored: Vec<Option<ScoreRecord>> = candidates
        .into_par_iter()
        .map(|(point, spec)| {
            if config.is_cancelled() {
                tracing::debug!(candidate = %point, "skipped after cancellation");
                return None;
            }
            Some(score_candidate(series, splits, point, &spec, &scorer))
        })
        .collect();

    let cancelled = scored.iter().any(Option::is_none) || config.is_cancelled();
    let records: Vec<ScoreRecord> = scored.into_iter().flatten().collect();
    let n_failed = records.iter().filter(|r| r.failure.is_some()).count();

    // Sequential selection in grid order keeps ties deterministic.
    let mut best: Option<&ScoreRecord> = None;
    for record in &records {
        if record.failure.is_some() || !record.aggregate.is_finite() {
            continue;
        }
        if best.is_none_or(|b| record.aggregate < b.aggregate) {
            best = Some(record);
        }
    }
    let best = best.ok_or(SearchError::NoViableConfiguration {
        candidates: n_candidates,
        splits: splits.len(),
    })?;
    tracing::info!(
        winner = %best.point,
        score = best.aggregate,
        failed = n_failed,
        "search finished"
    );

    let spec = grid.realise(&best.point)?;
    let fitted = spec
        .fit(series.values())
        .map_err(|source| SearchError::Refit { source })?;
    Ok(SearchOutcome {
        selected: SelectedModel {
            point: best.point.clone(),
            spec,
            aggregate: best.aggregate,
            fitted,
        },
        records,
        n_failed,
        cancelled,
    })
}

fn score_candidate<S>(
    series: &Series,
    splits: &[Split],
    point: GridPoint,
    spec: &PipelineSpec,
    scorer: &S,
) -> ScoreRecord
where
    S: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    let values = series.values();
    let mut per_split = Vec::with_capacity(splits.len());
    for split in splits {
        let train = &values[split.train()];
        let actual = &values[split.validation()];
        let offsets: Vec<usize> = (1..=actual.len()).collect();
        let predicted = spec
            .fit(train)
            .and_then(|fitted| fitted.predict(&offsets));
        match predicted {
            Ok(predicted) => per_split.push(scorer(actual, &predicted)),
            Err(err) => {
                tracing::debug!(candidate = %point, %err, "candidate disqualified");
                return ScoreRecord {
                    point,
                    per_split,
                    aggregate: f64::INFINITY,
                    failure: Some(err.to_string()),
                };
            }
        }
    }
    let aggregate = per_split.iter().sum::<f64>() / per_split.len() as f64;
    tracing::debug!(candidate = %point, aggregate, "scored candidate");
    ScoreRecord {
        point,
        per_split,
        aggregate,
        failure: None,
    }
}
