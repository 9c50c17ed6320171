//! Experiment tracking: one JSON run record per selection run.
//!
//! The tracker is an explicit handle passed to the code that has something
//! to record; nothing here is global. `finish` writes the record and
//! consumes the handle.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RunRecord {
    name: String,
    started_unix: u64,
    params: BTreeMap<String, String>,
    metrics: BTreeMap<String, f64>,
    artifacts: Vec<String>,
}

/// An open experiment run accumulating parameters, metrics and artifacts.
#[derive(Debug)]
pub struct ExperimentTracker {
    dir: PathBuf,
    record: RunRecord,
}

impl ExperimentTracker {
    /// Opens a run named `name` under the tracking directory.
    pub fn open(name: &str, dir: &Path) -> Self {
        let started_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            dir: dir.to_path_buf(),
            record: RunRecord {
                name: name.to_string(),
                started_unix,
                params: BTreeMap::new(),
                metrics: BTreeMap::new(),
                artifacts: Vec::new(),
            },
        }
    }

    /// Records one run parameter.
    pub fn log_param(&mut self, key: &str, value: impl Display) {
        self.record.params.insert(key.to_string(), value.to_string());
    }

    /// Records one run metric.
    pub fn log_metric(&mut self, key: &str, value: f64) {
        self.record.metrics.insert(key.to_string(), value);
    }

    /// Records the path of a produced artifact.
    pub fn log_artifact(&mut self, path: &Path) {
        self.record.artifacts.push(path.display().to_string());
    }

    /// Writes the run record as `<dir>/<name>-<started>.json` and returns
    /// the written path.
    pub fn finish(self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create tracking directory: {}", self.dir.display())
        })?;
        let path = self.dir.join(format!(
            "{}-{}.json",
            self.record.name, self.record.started_unix
        ));
        let json = serde_json::to_string_pretty(&self.record)
            .context("failed to serialize run record")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write run record: {}", path.display()))?;
        Ok(path)
    }
}
