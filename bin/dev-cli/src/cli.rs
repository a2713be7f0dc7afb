use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dev-cli",
    about = "Staking parameter inspection CLI for dev environment",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    Validate(ValidateArgs),

    AtHeight(AtHeightArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Validate a staking parameter file", version)]
pub(crate) struct ValidateArgs {
    #[arg(long, help = "the path to the params file")]
    pub(crate) params: PathBuf,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Show the parameter version active at a bitcoin height", version)]
pub(crate) struct AtHeightArgs {
    #[arg(long, help = "the path to the params file")]
    pub(crate) params: PathBuf,

    #[arg(long, help = "the bitcoin block height to query")]
    pub(crate) height: u32,
}
