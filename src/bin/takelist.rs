//! Takelist CLI Binary
//!
//! Command-line interface for a project's take list.

use anyhow::Context;
use clap::Parser;
use std::process;
use takelist::logging::init_logging;
use takelist::tooling::cli::{Cli, CliContext};

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = CliContext::load_config(&cli.project_dir, cli.config.as_deref())
        .context("Error loading configuration")?;
    cli.apply_overrides(&mut config);
    init_logging(Some(&config.logging), Some(&config.project.name))
        .context("Error initializing logging")?;

    let mut context = CliContext::with_config(cli.project_dir.clone(), config)
        .context("Error opening take list")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
