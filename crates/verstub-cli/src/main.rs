//! verstub CLI - post-deployment index maintenance for versioned docs sites

use std::process::ExitCode;

use colored::Colorize;
use verstub_cli::category_from_error;

#[tokio::main]
async fn main() -> ExitCode {
    match verstub_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            category_from_error(&err).as_exit_code()
        },
    }
}
