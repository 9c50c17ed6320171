//! Windows command: print the cross-validation window layout.

use anyhow::{anyhow, Context, Result};

use pythia_split::make_splits;

use crate::cli::WindowsArgs;
use crate::config::PythiaConfig;
use crate::{convert, ingest};

/// Print the train/validation windows the configured search would use.
pub fn run(args: WindowsArgs) -> Result<()> {
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PythiaConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let input = args
        .input
        .clone()
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let series = ingest::read_series(&input)?;

    let horizon = convert::build_horizon(&config, None)?;
    let policy = convert::parse_policy(&config.search)?;
    let splits = make_splits(&series, horizon.len(), &policy)
        .context("failed to build cross-validation windows")?;

    let periods = series.periods();
    println!(
        "{} observations, step {}, policy {:?}, horizon {}",
        series.len(),
        series.step(),
        policy,
        horizon.len()
    );
    println!("{:>5}  {:>20}  {:>20}", "split", "train periods", "validation periods");
    for (i, split) in splits.iter().enumerate() {
        let t = split.train();
        let v = split.validation();
        println!(
            "{:>5}  {:>9}..{:<9}  {:>9}..{:<9}",
            i,
            periods[t.start],
            periods[t.end - 1],
            periods[v.start],
            periods[v.end - 1],
        );
    }
    Ok(())
}
