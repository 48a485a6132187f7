//! ProofDrop - on-chain reputation scoring CLI
//!
//! Scores governance, DeFi, contract, airdrop, swap and balance activity
//! into a single reputation tier, per chain and averaged across chains.

use anyhow::Result;
use clap::Parser;
use proofdrop::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level; logs never touch stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("proofdrop={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
