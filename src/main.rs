use std::process::ExitCode;

use clap::Parser;

use residents_admin::cli::{self, Cli};
use residents_admin::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::execute(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(event = "cli.failed", error = %e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
