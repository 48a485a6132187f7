//! CLI command definitions and handlers

mod init;
mod networks;
mod proof;
mod score;
mod simulate;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::models::{ReputationReport, Tier};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Parse `KEY=AMOUNT` native balance pairs
fn parse_balance(s: &str) -> Result<(String, f64), String> {
    let (key, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not KEY=AMOUNT (e.g. sepolia=0.25)", s))?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid amount", amount))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err("balance must be a non-negative number".to_string());
    }
    Ok((key.trim().to_string(), amount))
}

/// ProofDrop - on-chain reputation scoring
#[derive(Parser, Debug)]
#[command(name = "proofdrop")]
#[command(
    version,
    about = "Score on-chain activity into a 0-100 reputation and a Bronze/Silver/Gold/Platinum tier",
    long_about = "ProofDrop turns six on-chain activity metrics (governance votes, DeFi \
transactions, unique contracts, airdrops, DEX swaps, USD balance) into a deterministic \
0-100 score and tier. Scores from several chains are averaged into one overall score.",
    after_help = "\
Examples:
  proofdrop score --governance-votes 3 --defi-tx 5     Score metrics given as flags
  proofdrop score --metrics snapshot.json --format json Score an exported snapshot
  proofdrop simulate 0xabc... --balance sepolia=0.1    Demo metrics across testnets
  proofdrop proof 0xabc... --chain-id sepolia          Print a wallet verification message
  proofdrop chains                                     List supported networks"
)]
pub struct Cli {
    /// Config file (default: ./proofdrop.toml or ./.proofdroprc.json)
    #[arg(long, global = true, env = "PROOFDROP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to write a report
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: text, json, markdown (or md)
    #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Append the per-category threshold breakdown
    #[arg(long)]
    pub explain: bool,

    /// Exit with code 1 if the overall tier is below this (bronze, silver, gold, platinum)
    #[arg(long)]
    pub min_tier: Option<Tier>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct MetricFlags {
    /// Governance proposals voted on
    #[arg(long)]
    pub governance_votes: Option<u32>,

    /// DeFi transactions (lending, borrowing, LP)
    #[arg(long)]
    pub defi_tx: Option<u32>,

    /// Distinct contracts interacted with
    #[arg(long)]
    pub unique_contracts: Option<u32>,

    /// Airdrops claimed
    #[arg(long)]
    pub airdrops_claimed: Option<u32>,

    /// DEX swaps
    #[arg(long)]
    pub dex_swaps: Option<u32>,

    /// Estimated holdings in USD
    #[arg(long)]
    pub balance_usd: Option<f64>,
}

/// Chain selection shared by `simulate` and `proof --simulate`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ChainSelection {
    /// Chains to score, by key or id (comma separated; default from config)
    #[arg(long, value_delimiter = ',')]
    pub chains: Vec<String>,

    /// Native balance per chain, e.g. --balance sepolia=0.1 (repeatable)
    #[arg(long = "balance", value_parser = parse_balance)]
    pub balances: Vec<(String, f64)>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one metrics snapshot (flags) or a file of per-chain snapshots
    #[command(after_help = "\
Examples:
  proofdrop score --governance-votes 5 --defi-tx 10 --balance-usd 300
  proofdrop score --metrics snapshot.json
  proofdrop score --metrics chains.toml --format markdown -o report.md

Missing metrics count as 0.")]
    Score {
        /// JSON or TOML file holding one snapshot or a list of {chain, metrics}
        #[arg(long, short = 'm', conflicts_with_all = [
            "governance_votes", "defi_tx", "unique_contracts",
            "airdrops_claimed", "dex_swaps", "balance_usd",
        ])]
        metrics: Option<PathBuf>,

        #[command(flatten)]
        flags: MetricFlags,

        /// Address the metrics belong to
        #[arg(long)]
        address: Option<String>,

        /// Chain the flag metrics were captured on (key or id)
        #[arg(long)]
        chain: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score deterministic demo metrics for an address on several chains
    Simulate {
        /// Wallet address (seeds the demo metrics)
        address: String,

        #[command(flatten)]
        selection: ChainSelection,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the message a wallet signs (verification, or reputation proof)
    Proof {
        /// Wallet address
        address: String,

        /// Chain for the verification message (key, decimal id, or 0x id)
        #[arg(long, required_unless_present = "simulate")]
        chain_id: Option<String>,

        /// Build a reputation proof from simulated per-chain scores
        #[arg(long)]
        simulate: bool,

        #[command(flatten)]
        selection: ChainSelection,

        /// Fixed nonce (default: random)
        #[arg(long)]
        nonce: Option<u32>,

        /// Fixed RFC 3339 timestamp (default: now)
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// List supported networks
    Chains {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an example proofdrop.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            metrics,
            flags,
            address,
            chain,
            output,
        } => score::run(
            &config,
            metrics.as_deref(),
            flags,
            address,
            chain.as_deref(),
            &output,
        ),

        Commands::Simulate {
            address,
            selection,
            output,
        } => simulate::run(&config, &address, &selection, &output),

        Commands::Proof {
            address,
            chain_id,
            simulate,
            selection,
            nonce,
            timestamp,
        } => proof::run(
            &config,
            &address,
            chain_id.as_deref(),
            simulate,
            &selection,
            nonce,
            timestamp.as_deref(),
        ),

        Commands::Chains { json } => networks::run(&config, json),

        Commands::Init { path, force } => init::run(&path, force),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_project_config(Path::new("."))),
    }
}

/// Write rendered output to a file, or stdout when no path is given
fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Fail after reporting when the headline tier misses `--min-tier`
fn check_min_tier(report: &ReputationReport, min_tier: Option<Tier>) -> Result<()> {
    let Some(min) = min_tier else {
        return Ok(());
    };
    match report.headline() {
        Some((_, tier)) if tier >= min => Ok(()),
        Some((total, tier)) => bail!(
            "Tier {} ({}/100) is below --min-tier {}",
            tier,
            total,
            min
        ),
        None => bail!("Nothing was scored, so --min-tier {} is not met", min),
    }
}
