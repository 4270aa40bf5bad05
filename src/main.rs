use std::process::ExitCode;

use clap::Parser;
use mottooth_smoke::cmd::{exit_code, run, Cli};
use mottooth_smoke::config::dotenv_warning;
use mottooth_smoke::log::init_tracing;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // .env never overrides variables already present in the process; it is
    // read before tracing so it may set the log level.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Some(e) = dotenv_warning(&dotenv) {
        warn!(error = %e, "ignoring unreadable .env file");
    }

    let cli = Cli::parse();
    let res = run(&cli).await;
    if let Err(e) = &res {
        error!(error = %e, "setup failed");
        eprintln!("setup failed: {e}");
    }
    ExitCode::from(exit_code(&res))
}
