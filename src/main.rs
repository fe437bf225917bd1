//! fieldgraph CLI entry point
//!
//! Parses arguments, runs the command and turns errors into user-friendly
//! messages with a non-zero exit code.

use anyhow::Result;
use clap::Parser;
use fieldgraph::cli;
use fieldgraph::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
