use std::process::ExitCode;

use colored::Colorize;

use crate::config::Config;

use super::args::{Cli, Command};
use super::push::run_push;
use super::smoke::{SmokeOutcome, run_smoke};

pub(crate) async fn run(cli: Cli) -> ExitCode {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            return ExitCode::from(SmokeOutcome::CONFIG_EXIT_CODE);
        }
    };

    match cli.command {
        Command::Push(args) => match run_push(&args, &config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{} {err:#}", "Error:".red().bold());
                ExitCode::FAILURE
            }
        },
        Command::Smoke => match run_smoke(&config).await {
            Ok(outcome) => ExitCode::from(outcome.exit_code()),
            Err(err) => {
                eprintln!("{} {err}", "Error:".red().bold());
                ExitCode::from(SmokeOutcome::CONFIG_EXIT_CODE)
            }
        },
    }
}
