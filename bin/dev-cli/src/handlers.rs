use std::fs;

use anyhow::{Context, Result};
use staking_params::StakingParamsSet;
use tracing::info;

use crate::cli::{AtHeightArgs, ValidateArgs};

fn load_params(path: &std::path::Path) -> Result<StakingParamsSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read params file {}", path.display()))?;

    StakingParamsSet::from_toml_str(&raw).context("params file failed validation")
}

pub(crate) fn handle_validate(args: ValidateArgs) -> Result<()> {
    let set = load_params(&args.params)?;

    info!(versions = set.len(), "params file is valid");
    for params in &set {
        println!(
            "version {:>3}  activates at {:>8}  stake {} ..= {}  unbonding {} blocks",
            params.version,
            params.btc_activation_height,
            params.min_staking_amount,
            params.max_staking_amount,
            params.unbonding_time,
        );
    }

    Ok(())
}

pub(crate) fn handle_at_height(args: AtHeightArgs) -> Result<()> {
    let set = load_params(&args.params)?;

    match set.at_height(args.height) {
        Some(params) => {
            println!(
                "height {} uses version {} (activated at {})",
                args.height, params.version, params.btc_activation_height
            );
        }
        None => {
            println!(
                "height {} precedes the first activation (version {} at {})",
                args.height,
                set.versions()[0].version,
                set.versions()[0].btc_activation_height
            );
        }
    }

    Ok(())
}
