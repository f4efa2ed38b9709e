//! Mint CLI
//!
//! Entry point for the mint-cli binary. Parses command-line arguments
//! and delegates to the appropriate command handler.

use std::env;

use mint_cli::run_cli;

fn main() -> anyhow::Result<()> {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run_cli()
}
