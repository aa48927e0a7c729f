use std::process::ExitCode;

use clap::Parser;
use referrals::cli::{self, Cli};
use referrals::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing();

    match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
