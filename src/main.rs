//! Monobuild CLI - library bundle orchestrator for monorepos
//!
//! Entry point for the monobuild command-line application.

use anyhow::Result;
use clap::Parser;

use monobuild::cli::output::display_error;
use monobuild::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cli.output_config().init_tracing();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
