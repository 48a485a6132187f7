//! Simulate command: deterministic demo metrics across chains
//!
//! Every chain is generated and scored independently, so the work is
//! spread over the rayon pool and then averaged into one summary.

use super::{check_min_tier, emit, ChainSelection, OutputArgs};
use crate::chains::{find, Chain};
use crate::config::ProjectConfig;
use crate::fixture;
use crate::models::{ChainScore, ReputationReport};
use crate::reporters::{self, OutputFormat};
use crate::scoring;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::str::FromStr;
use tracing::{debug, warn};

pub fn run(
    config: &ProjectConfig,
    address: &str,
    selection: &ChainSelection,
    output: &OutputArgs,
) -> Result<()> {
    let format = OutputFormat::from_str(
        output
            .format
            .as_deref()
            .unwrap_or_else(|| config.default_format()),
    )?;

    let report = build_report(config, address, selection)?;
    let mut rendered = reporters::render(&report, format)?;

    if output.explain {
        if format == OutputFormat::Json {
            warn!("--explain is ignored for JSON output");
        } else {
            for chain in &report.chains {
                rendered.push_str(&format!("\n## {}\n\n", chain.chain.name));
                rendered.push_str(&scoring::explain(&chain.result, &chain.metrics));
            }
        }
    }

    emit(output.output.as_deref(), &rendered)?;
    check_min_tier(&report, output.min_tier)
}

/// Pick the chains to score, in the order given
pub(super) fn select_chains(config: &ProjectConfig, requested: &[String]) -> Result<Vec<Chain>> {
    let known = config.chains();
    let keys = if requested.is_empty() {
        config.default_chain_keys()
    } else {
        requested.to_vec()
    };

    let mut selected: Vec<Chain> = Vec::with_capacity(keys.len());
    for key in &keys {
        let Some(chain) = find(&known, key) else {
            let valid: Vec<&str> = known.iter().map(|c| c.key.as_str()).collect();
            bail!("Unknown chain '{}'. Known chains: {}", key, valid.join(", "));
        };
        if selected.iter().any(|c| c.key == chain.key) {
            debug!("Skipping duplicate chain {}", chain.key);
            continue;
        }
        selected.push(chain.clone());
    }
    Ok(selected)
}

/// USD value of a native balance at the configured price
fn balance_usd(config: &ProjectConfig, chain: &Chain, native: f64) -> f64 {
    native * config.price_usd(&chain.price_symbol)
}

/// Generate and score demo metrics for each selected chain
pub(super) fn build_report(
    config: &ProjectConfig,
    address: &str,
    selection: &ChainSelection,
) -> Result<ReputationReport> {
    let chains = select_chains(config, &selection.chains)?;

    let mut native = Vec::with_capacity(chains.len());
    for chain in &chains {
        let amount = selection
            .balances
            .iter()
            .rev()
            .find(|(key, _)| find(std::slice::from_ref(chain), key).is_some())
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0);
        native.push(amount);
    }
    for (key, _) in &selection.balances {
        if find(&chains, key).is_none() {
            warn!("Balance given for '{}' but that chain is not being scored", key);
        }
    }

    let scores = chains
        .par_iter()
        .zip(native.par_iter())
        .map(|(chain, amount)| -> Result<ChainScore> {
            let usd = balance_usd(config, chain, *amount);
            let metrics = fixture::simulate(address, &chain.key, usd);
            metrics.validate().with_context(|| {
                format!("Balance {} {} is out of range", amount, chain.currency_symbol)
            })?;
            let result = scoring::score(&metrics);
            debug!("{}: {} ({})", chain.key, result.total, result.tier);
            Ok(ChainScore {
                chain: chain.to_ref(),
                metrics,
                result,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let totals: Vec<u8> = scores.iter().map(|c| c.result.total).collect();
    Ok(ReputationReport {
        address: Some(address.to_string()),
        summary: scoring::summarize(&totals),
        chains: scores,
    })
}
