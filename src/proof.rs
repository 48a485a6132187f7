//! Wallet message texts
//!
//! Builds the exact plain-text messages a wallet is asked to sign: a
//! connection verification message and a reputation proof listing the
//! per-chain breakdown. Signing and recovery happen in the wallet; this
//! module only produces the text.

use crate::models::ReputationReport;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

const VERIFICATION_TITLE: &str = "ProofDrop — Wallet Verification";
const PROOF_TITLE: &str = "ProofDrop Testnet Reputation Proof";

/// Upper bound (exclusive) for message nonces
pub const NONCE_BOUND: u32 = 1_000_000_000;

/// Fresh random nonce in [0, 1e9)
pub fn random_nonce() -> u32 {
    rand::rng().random_range(0..NONCE_BOUND)
}

/// ISO-8601 with milliseconds and a `Z` suffix
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Message signed right after connecting a wallet
pub fn verification_message(
    address: &str,
    chain_id: u64,
    at: DateTime<Utc>,
    nonce: u32,
) -> String {
    [
        VERIFICATION_TITLE.to_string(),
        format!("Address: {}", address),
        format!("ChainId: {}", chain_id),
        format!("Timestamp: {}", format_timestamp(at)),
        format!("Nonce: {}", nonce),
    ]
    .join("\n")
}

/// Message attesting to a multi-chain reputation report
pub fn reputation_proof(
    address: &str,
    report: &ReputationReport,
    at: DateTime<Utc>,
    nonce: u32,
) -> String {
    let chain_lines = if report.chains.is_empty() {
        "- (no chains scored)".to_string()
    } else {
        report
            .chains
            .iter()
            .map(|c| {
                let p = &c.result.points;
                format!(
                    "- {}: score={} (gov={}, defi={}, uniq={}, air={}, swaps={}, bal={})",
                    c.chain.name,
                    c.result.total,
                    p.governance,
                    p.defi,
                    p.unique_contracts,
                    p.airdrops,
                    p.dex_swaps,
                    p.balance
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let total = report.summary.map(|s| s.total).unwrap_or(0);

    [
        PROOF_TITLE.to_string(),
        format!("Address: {}", address),
        format!("Timestamp: {}", format_timestamp(at)),
        "Chains:".to_string(),
        chain_lines,
        format!("Total Score (avg): {}", total),
        format!("Nonce: {}", nonce),
    ]
    .join("\n")
}
