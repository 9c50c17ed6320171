//! Select command: run the grid search and produce the final forecast.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::{info, info_span};

use pythia_search::{run_forecast, search, SearchConfig};
use pythia_split::make_splits;

use crate::cli::SelectArgs;
use crate::config::PythiaConfig;
use crate::tracking::ExperimentTracker;
use crate::{convert, ingest};

/// Run the full selection pipeline.
pub fn run(args: SelectArgs) -> Result<()> {
    let _cmd = info_span!("select").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PythiaConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Read the observed series
    let input = args
        .input
        .clone()
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    info!(path = %input.display(), "reading series");
    let series = ingest::read_series(&input)?;
    info!(
        observations = series.len(),
        step = series.step(),
        cutoff = series.cutoff(),
        "series loaded"
    );

    // 3. Resolve horizon, splits, grid, metric
    let horizon = convert::build_horizon(&config, args.horizon)?;
    let policy = convert::parse_policy(&config.search)?;
    let splits = make_splits(&series, horizon.len(), &policy)
        .context("failed to build cross-validation windows")?;
    info!(splits = splits.len(), policy = ?policy, "windows built");
    let grid = convert::build_grid(&config)?;
    let scorer = convert::parse_metric(&config.search.metric)?;

    // 4. Arm the wall-clock budget
    let mut search_config = SearchConfig::new();
    if let Some(secs) = args.time_budget {
        let flag = Arc::new(AtomicBool::new(false));
        search_config = search_config.with_cancel_flag(Arc::clone(&flag));
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            flag.store(true, Ordering::Relaxed);
        });
        info!(seconds = secs, "time budget armed");
    }

    // 5. Search
    let outcome =
        search(&series, &splits, &grid, scorer, &search_config).context("model selection failed")?;
    let selected = outcome.selected();
    info!(
        winner = %selected.point(),
        score = selected.aggregate(),
        failed = outcome.n_failed(),
        cancelled = outcome.cancelled(),
        "model selected"
    );

    // 6. Forecast and persist
    let forecast = run_forecast(&series, selected, &horizon)?;
    let output = args
        .output
        .clone()
        .or_else(|| config.io.output.clone())
        .unwrap_or_else(|| PathBuf::from("forecast.csv"));
    ingest::write_forecast(&output, &forecast)?;
    info!(path = %output.display(), points = forecast.len(), "forecast written");

    // 7. Tracking record
    if let Some(dir) = &config.io.tracking {
        let mut tracker = ExperimentTracker::open("select", dir);
        tracker.log_param("input", input.display());
        tracker.log_param("policy", config.search.policy.as_str());
        tracker.log_param("metric", config.search.metric.as_str());
        tracker.log_param("winner", selected.point());
        for (name, value) in selected.point().values() {
            tracker.log_param(name, value);
        }
        tracker.log_metric("best_score", selected.aggregate());
        tracker.log_metric("candidates", outcome.records().len() as f64);
        tracker.log_metric("failed_candidates", outcome.n_failed() as f64);
        tracker.log_metric("splits", splits.len() as f64);
        tracker.log_artifact(&output);
        let record = tracker.finish()?;
        info!(path = %record.display(), "run record written");
    }

    Ok(())
}
