use std::process::ExitCode;

use clap::Parser;

use paper_relay::cli::Cli;
use paper_relay::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_tracing(cli.verbose) {
        eprintln!("Warning: {err}");
    }
    cli.run().await
}
