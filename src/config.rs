use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Pythia configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PythiaConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Forecast horizon settings.
    #[serde(default)]
    pub horizon: HorizonToml,

    /// Cross-validation and scoring settings.
    #[serde(default)]
    pub search: SearchToml,

    /// Transform stack shared by every candidate family.
    #[serde(default)]
    pub transforms: TransformsToml,

    /// Candidate family grids.
    #[serde(default)]
    pub grid: GridToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Directory for experiment-tracking run records; tracking is off when
    /// unset.
    pub tracking: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HorizonToml {
    #[serde(default = "default_horizon_length")]
    pub length: usize,
    /// Absolute future periods; overrides `length` when set.
    #[serde(default)]
    pub periods: Option<Vec<i64>>,
}

impl Default for HorizonToml {
    fn default() -> Self {
        Self {
            length: default_horizon_length(),
            periods: None,
        }
    }
}

fn default_horizon_length() -> usize {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    /// Window policy: "single", "sliding" or "expanding".
    #[serde(default = "default_policy")]
    pub policy: String,
    /// Train window length for the sliding policy.
    #[serde(default = "default_window")]
    pub window: usize,
    /// First train window length for the expanding policy.
    #[serde(default = "default_window")]
    pub initial: usize,
    /// Periods the window advances or grows between splits.
    #[serde(default = "default_step")]
    pub step: usize,
    /// Scoring metric: "rmse" or "mae".
    #[serde(default = "default_metric")]
    pub metric: String,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            window: default_window(),
            initial: default_window(),
            step: default_step(),
            metric: default_metric(),
        }
    }
}

fn default_policy() -> String {
    "single".to_string()
}
fn default_window() -> usize {
    24
}
fn default_step() -> usize {
    1
}
fn default_metric() -> String {
    "rmse".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformsToml {
    /// Remove a least-squares linear trend before forecasting.
    #[serde(default = "default_true")]
    pub detrend: bool,
    /// Periodicity of the shared deseasonalizing step; 1 disables it.
    #[serde(default = "default_step")]
    pub deseasonalize_sp: usize,
    /// Include the robust scaler in every family.
    #[serde(default = "default_true")]
    pub robust_scale: bool,
    /// Grid axis for the robust scaler's IQR division, applied to every
    /// enabled family.
    #[serde(default = "default_with_scaling")]
    pub robust_with_scaling: Vec<bool>,
    /// Include the min-max scaler in every family.
    #[serde(default)]
    pub minmax: bool,
    #[serde(default = "default_minmax_min")]
    pub minmax_min: f64,
    #[serde(default = "default_minmax_max")]
    pub minmax_max: f64,
}

impl Default for TransformsToml {
    fn default() -> Self {
        Self {
            detrend: true,
            deseasonalize_sp: default_step(),
            robust_scale: true,
            robust_with_scaling: default_with_scaling(),
            minmax: false,
            minmax_min: default_minmax_min(),
            minmax_max: default_minmax_max(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_with_scaling() -> Vec<bool> {
    vec![true]
}
fn default_minmax_min() -> f64 {
    1.0
}
fn default_minmax_max() -> f64 {
    10.0
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    #[serde(default)]
    pub naive: NaiveToml,
    #[serde(default)]
    pub theta: ThetaToml,
    #[serde(default)]
    pub smoothing: SmoothingToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NaiveToml {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_strategies")]
    pub strategies: Vec<String>,
    #[serde(default = "default_sp_domain")]
    pub sp: Vec<i64>,
}

impl Default for NaiveToml {
    fn default() -> Self {
        Self {
            enabled: true,
            strategies: default_strategies(),
            sp: default_sp_domain(),
        }
    }
}

fn default_strategies() -> Vec<String> {
    vec!["last".to_string(), "mean".to_string(), "drift".to_string()]
}
fn default_sp_domain() -> Vec<i64> {
    vec![1, 4, 6, 12]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThetaToml {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sp_domain")]
    pub sp: Vec<i64>,
}

impl Default for ThetaToml {
    fn default() -> Self {
        Self {
            enabled: true,
            sp: default_sp_domain(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmoothingToml {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_alpha_domain")]
    pub alpha: Vec<f64>,
    #[serde(default = "default_beta_domain")]
    pub beta: Vec<f64>,
}

impl Default for SmoothingToml {
    fn default() -> Self {
        Self {
            enabled: false,
            alpha: default_alpha_domain(),
            beta: default_beta_domain(),
        }
    }
}

fn default_alpha_domain() -> Vec<f64> {
    vec![0.2, 0.5, 0.8]
}
fn default_beta_domain() -> Vec<f64> {
    vec![0.0, 0.1, 0.3]
}
