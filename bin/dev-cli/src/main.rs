//! CLI for inspecting staking parameter files during development.

mod cli;
mod handlers;

use anyhow::{Error, Result};
use clap::Parser;
use staking_common::logging::{self, LoggerConfig};

fn main() -> Result<(), Error> {
    let mut logger_config = LoggerConfig::with_base_name("dev-cli");
    if let Some(otlp_url) = logging::get_otlp_url_from_env() {
        logger_config.set_otlp_url(otlp_url);
    }
    logging::init(logger_config);

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::Validate(args) => handlers::handle_validate(args),
        cli::Commands::AtHeight(args) => handlers::handle_at_height(args),
    }
}
