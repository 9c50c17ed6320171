//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{bail, Result};

use pythia_grid::{FamilyDef, ParamGrid};
use pythia_pipeline::{ForecasterSpec, NaiveStrategy, ParamValue, PipelineSpec, TransformSpec};
use pythia_search::scoring;
use pythia_series::Horizon;
use pythia_split::WindowPolicy;

use crate::config::{PythiaConfig, SearchToml, TransformsToml};

/// A scoring function usable by the search engine.
pub type Scorer = fn(&[f64], &[f64]) -> f64;

/// Parses a window policy name into the corresponding [`WindowPolicy`].
pub fn parse_policy(search: &SearchToml) -> Result<WindowPolicy> {
    match search.policy.to_lowercase().as_str() {
        "single" => Ok(WindowPolicy::Single),
        "sliding" => Ok(WindowPolicy::Sliding {
            window: search.window,
            step: search.step,
        }),
        "expanding" => Ok(WindowPolicy::Expanding {
            initial: search.initial,
            step: search.step,
        }),
        other => bail!("unknown window policy: {other:?}"),
    }
}

/// Parses a metric name into its scoring function.
pub fn parse_metric(s: &str) -> Result<Scorer> {
    match s.to_lowercase().as_str() {
        "rmse" => Ok(scoring::rmse),
        "mae" => Ok(scoring::mae),
        other => bail!("unknown metric: {other:?}"),
    }
}

/// Builds the forecast horizon from the TOML horizon configuration.
///
/// Absolute periods take precedence over the relative length.
pub fn build_horizon(config: &PythiaConfig, length_override: Option<usize>) -> Result<Horizon> {
    if let Some(periods) = &config.horizon.periods {
        if length_override.is_some() {
            bail!("--horizon cannot override absolute [horizon].periods");
        }
        return Ok(Horizon::Absolute(periods.clone()));
    }
    let length = length_override.unwrap_or(config.horizon.length);
    if length == 0 {
        bail!("horizon length must be >= 1");
    }
    Ok(Horizon::steps(length))
}

/// Builds the shared base pipeline around one forecaster.
///
/// Transform order is fixed: detrender, deseasonalizer, robust scaler,
/// min-max scaler; disabled steps are simply absent.
fn base_pipeline(transforms: &TransformsToml, forecaster: ForecasterSpec) -> PipelineSpec {
    let mut spec = PipelineSpec::new("forecaster", forecaster);
    let mut rebuilt = Vec::new();
    if transforms.detrend {
        rebuilt.push(("detrender", TransformSpec::Detrend));
    }
    if transforms.deseasonalize_sp > 1 {
        rebuilt.push((
            "deseasonalizer",
            TransformSpec::Deseasonalize {
                sp: transforms.deseasonalize_sp,
            },
        ));
    }
    if transforms.robust_scale {
        rebuilt.push(("scaler", TransformSpec::RobustScale { with_scaling: true }));
    }
    if transforms.minmax {
        rebuilt.push((
            "minmax",
            TransformSpec::MinMaxScale {
                min: transforms.minmax_min,
                max: transforms.minmax_max,
            },
        ));
    }
    for (name, t) in rebuilt {
        spec = spec.with_transform(name, t);
    }
    spec
}

/// Appends the cross-cutting scaler axis to a family when the scaler is
/// enabled. A single-value domain still becomes an axis, so a configured
/// `robust_with_scaling = [false]` reaches every candidate.
fn with_scaler_axis(family: FamilyDef, transforms: &TransformsToml) -> FamilyDef {
    if !transforms.robust_scale {
        return family;
    }
    family.with_param(
        "scaler__with_scaling",
        transforms
            .robust_with_scaling
            .iter()
            .map(|&b| ParamValue::Bool(b))
            .collect(),
    )
}

/// Builds the full candidate grid from the TOML configuration.
///
/// Each enabled `[grid.*]` table becomes one family over the shared
/// transform stack; when the robust scaler is enabled its `with_scaling`
/// axis is appended to every family.
pub fn build_grid(config: &PythiaConfig) -> Result<ParamGrid> {
    let transforms = &config.transforms;
    if transforms.robust_scale && transforms.robust_with_scaling.is_empty() {
        bail!("[transforms].robust_with_scaling must list at least one value");
    }
    let mut grid = ParamGrid::new();

    if config.grid.naive.enabled {
        for s in &config.grid.naive.strategies {
            if !matches!(s.as_str(), "last" | "mean" | "drift") {
                bail!("unknown naive strategy: {s:?}");
            }
        }
        let base = base_pipeline(
            transforms,
            ForecasterSpec::Naive {
                strategy: NaiveStrategy::Last,
                sp: 1,
            },
        );
        let family = FamilyDef::new("naive", base)
            .with_param(
                "forecaster__strategy",
                config
                    .grid
                    .naive
                    .strategies
                    .iter()
                    .map(|s| ParamValue::Str(s.clone()))
                    .collect(),
            )
            .with_param(
                "forecaster__sp",
                config.grid.naive.sp.iter().map(|&v| ParamValue::Int(v)).collect(),
            );
        grid = grid.with_family(with_scaler_axis(family, transforms));
    }

    if config.grid.theta.enabled {
        let base = base_pipeline(transforms, ForecasterSpec::Theta { sp: 1 });
        let family = FamilyDef::new("theta", base).with_param(
            "forecaster__sp",
            config.grid.theta.sp.iter().map(|&v| ParamValue::Int(v)).collect(),
        );
        grid = grid.with_family(with_scaler_axis(family, transforms));
    }

    if config.grid.smoothing.enabled {
        let base = base_pipeline(
            transforms,
            ForecasterSpec::Smoothing {
                alpha: 0.5,
                beta: 0.0,
            },
        );
        let family = FamilyDef::new("smoothing", base)
            .with_param(
                "forecaster__alpha",
                config
                    .grid
                    .smoothing
                    .alpha
                    .iter()
                    .map(|&v| ParamValue::Float(v))
                    .collect(),
            )
            .with_param(
                "forecaster__beta",
                config
                    .grid
                    .smoothing
                    .beta
                    .iter()
                    .map(|&v| ParamValue::Float(v))
                    .collect(),
            );
        grid = grid.with_family(with_scaler_axis(family, transforms));
    }

    if grid.point_count() == 0 {
        bail!("no candidate families enabled: enable at least one [grid.*] table");
    }
    Ok(grid)
}
