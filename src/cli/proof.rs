//! Proof command: print the message a wallet is asked to sign

use super::{simulate, ChainSelection};
use crate::chains::{display_name, find, parse_chain_id};
use crate::config::ProjectConfig;
use crate::proof::{random_nonce, reputation_proof, verification_message, NONCE_BOUND};
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

pub fn run(
    config: &ProjectConfig,
    address: &str,
    chain_id: Option<&str>,
    from_simulation: bool,
    selection: &ChainSelection,
    nonce: Option<u32>,
    timestamp: Option<&str>,
) -> Result<()> {
    let at = match timestamp {
        Some(ts) => parse_timestamp(ts)?,
        None => Utc::now(),
    };
    let nonce = match nonce {
        Some(n) if n >= NONCE_BOUND => bail!("--nonce must be below {}", NONCE_BOUND),
        Some(n) => n,
        None => random_nonce(),
    };

    let message = if from_simulation {
        let report = simulate::build_report(config, address, selection)?;
        reputation_proof(address, &report, at, nonce)
    } else {
        let needle = chain_id.ok_or_else(|| anyhow!("--chain-id is required"))?;
        let id = resolve_chain_id(config, needle)?;
        debug!(
            "Verification message for {}",
            display_name(&config.chains(), id)
        );
        verification_message(address, id, at, nonce)
    };

    println!("{}", message);
    Ok(())
}

/// Known chain key, or any numeric id (decimal or `0x` hex)
fn resolve_chain_id(config: &ProjectConfig, needle: &str) -> Result<u64> {
    if let Some(chain) = find(&config.chains(), needle) {
        return Ok(chain.chain_id);
    }
    parse_chain_id(needle.trim())
        .ok_or_else(|| anyhow!("'{}' is neither a known chain nor a numeric chain id", needle))
}

fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(ts)
        .with_context(|| format!("Invalid --timestamp '{}' (expected RFC 3339)", ts))?;
    Ok(parsed.with_timezone(&Utc))
}
