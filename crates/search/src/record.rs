//! Search result types.

use pythia_grid::GridPoint;
use pythia_pipeline::{FittedPipeline, PipelineSpec};

/// Score of one candidate across all splits.
#[derive(Clone, Debug)]
pub struct ScoreRecord {
    pub(crate) point: GridPoint,
    pub(crate) per_split: Vec<f64>,
    pub(crate) aggregate: f64,
    pub(crate) failure: Option<String>,
}

impl ScoreRecord {
    /// The grid point this record scores.
    pub fn point(&self) -> &GridPoint {
        &self.point
    }

    /// Per-split scores, in split order. Shorter than the split count when
    /// the candidate failed partway.
    pub fn per_split(&self) -> &[f64] {
        &self.per_split
    }

    /// Mean score across splits; `f64::INFINITY` for failed candidates.
    pub fn aggregate(&self) -> f64 {
        self.aggregate
    }

    /// The fit or predict error that disqualified the candidate, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// The winning candidate, refitted on the full series.
#[derive(Clone, Debug)]
pub struct SelectedModel {
    pub(crate) point: GridPoint,
    pub(crate) spec: PipelineSpec,
    pub(crate) aggregate: f64,
    pub(crate) fitted: FittedPipeline,
}

impl SelectedModel {
    /// The winning grid point.
    pub fn point(&self) -> &GridPoint {
        &self.point
    }

    /// The winning pipeline specification.
    pub fn spec(&self) -> &PipelineSpec {
        &self.spec
    }

    /// The winner's mean cross-validation score.
    pub fn aggregate(&self) -> f64 {
        self.aggregate
    }

    /// The pipeline refitted on the full series.
    pub fn fitted(&self) -> &FittedPipeline {
        &self.fitted
    }
}

/// Everything a finished search produced.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub(crate) selected: SelectedModel,
    pub(crate) records: Vec<ScoreRecord>,
    pub(crate) n_failed: usize,
    pub(crate) cancelled: bool,
}

impl SearchOutcome {
    /// The selected model.
    pub fn selected(&self) -> &SelectedModel {
        &self.selected
    }

    /// Score records for every candidate that was evaluated, in grid order.
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Number of candidates disqualified by fit or predict errors.
    pub fn n_failed(&self) -> usize {
        self.n_failed
    }

    /// Whether cancellation cut the search short.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
}
