//! Score command: metrics snapshots from flags or a file

use super::{check_min_tier, emit, MetricFlags, OutputArgs};
use crate::chains::{find, Chain};
use crate::config::ProjectConfig;
use crate::models::{ChainRef, ChainScore, PartialMetrics, ReputationReport};
use crate::reporters::{self, OutputFormat};
use crate::scoring;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Name used when a snapshot does not say which chain it came from
const UNNAMED_CHAIN: &str = "Snapshot";

/// One per-chain entry of a metrics file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotEntry {
    #[serde(default)]
    chain: Option<String>,
    #[serde(default)]
    metrics: PartialMetrics,
}

/// `{"address": "0x...", "chains": [...]}` or TOML `[[chains]]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedFile {
    #[serde(default)]
    address: Option<String>,
    chains: Vec<SnapshotEntry>,
}

/// Accepted metrics file shapes
#[derive(Debug)]
enum MetricsFile {
    /// `[{"chain": "sepolia", "metrics": {...}}, ...]`
    List(Vec<SnapshotEntry>),
    Wrapped(WrappedFile),
    /// A bare metrics object
    Single(PartialMetrics),
}

impl MetricsFile {
    /// Pick the shape from the top-level value, then parse strictly.
    ///
    /// An object with a `chains` key is always the wrapped form, so a bad
    /// entry is reported instead of being read as an empty snapshot.
    fn from_value(value: Value) -> Result<Self> {
        if value.is_array() {
            serde_json::from_value(value)
                .map(MetricsFile::List)
                .context("Invalid list of chain snapshots")
        } else if value.get("chains").is_some() {
            serde_json::from_value(value)
                .map(MetricsFile::Wrapped)
                .context("Invalid {address, chains} metrics file")
        } else if value.is_object() {
            serde_json::from_value(value)
                .map(MetricsFile::Single)
                .context("Invalid metrics snapshot")
        } else {
            bail!("Expected a metrics object or a list of chain snapshots")
        }
    }

    fn into_parts(self) -> (Option<String>, Vec<SnapshotEntry>) {
        match self {
            MetricsFile::List(entries) => (None, entries),
            MetricsFile::Wrapped(file) => (file.address, file.chains),
            MetricsFile::Single(metrics) => (
                None,
                vec![SnapshotEntry {
                    chain: None,
                    metrics,
                }],
            ),
        }
    }
}

pub fn run(
    config: &ProjectConfig,
    metrics_path: Option<&Path>,
    flags: MetricFlags,
    address: Option<String>,
    chain: Option<&str>,
    output: &OutputArgs,
) -> Result<()> {
    let format = OutputFormat::from_str(
        output
            .format
            .as_deref()
            .unwrap_or_else(|| config.default_format()),
    )?;

    let (file_address, entries) = match metrics_path {
        Some(path) => read_metrics_file(path)?.into_parts(),
        None => {
            let metrics = flags_to_metrics(&flags);
            if metrics.missing().len() == 6 {
                bail!("No metrics given. Pass --metrics <file> or at least one metric flag (see --help)");
            }
            (
                None,
                vec![SnapshotEntry {
                    chain: chain.map(str::to_string),
                    metrics,
                }],
            )
        }
    };

    if entries.is_empty() {
        bail!("Metrics file contains no snapshots");
    }

    let report = build_report(config, address.or(file_address), entries)?;
    let mut rendered = reporters::render(&report, format)?;

    if output.explain {
        if format == OutputFormat::Json {
            warn!("--explain is ignored for JSON output");
        } else {
            for chain in &report.chains {
                rendered.push('\n');
                if report.chains.len() > 1 {
                    rendered.push_str(&format!("## {}\n\n", chain.chain.name));
                }
                rendered.push_str(&scoring::explain(&chain.result, &chain.metrics));
            }
        }
    }

    emit(output.output.as_deref(), &rendered)?;
    check_min_tier(&report, output.min_tier)
}

fn flags_to_metrics(flags: &MetricFlags) -> PartialMetrics {
    PartialMetrics {
        governance_votes: flags.governance_votes,
        defi_tx: flags.defi_tx,
        unique_contracts: flags.unique_contracts,
        airdrops_claimed: flags.airdrops_claimed,
        dex_swaps: flags.dex_swaps,
        balance_usd: flags.balance_usd,
    }
}

fn read_metrics_file(path: &Path) -> Result<MetricsFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let value: Value = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid metrics JSON in {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Invalid metrics TOML in {}", path.display()))?
    };
    let parsed = MetricsFile::from_value(value)
        .with_context(|| format!("Unrecognized metrics in {}", path.display()))?;
    debug!("Loaded metrics from {}", path.display());
    Ok(parsed)
}

/// Map a user-supplied chain label onto a known network when possible
fn resolve_chain(known: &[Chain], label: Option<&str>) -> ChainRef {
    match label {
        Some(label) => match find(known, label) {
            Some(chain) => chain.to_ref(),
            None => ChainRef {
                key: None,
                chain_id: None,
                name: label.to_string(),
            },
        },
        None => ChainRef {
            key: None,
            chain_id: None,
            name: UNNAMED_CHAIN.to_string(),
        },
    }
}

fn build_report(
    config: &ProjectConfig,
    address: Option<String>,
    entries: Vec<SnapshotEntry>,
) -> Result<ReputationReport> {
    let known = config.chains();
    let mut chains = Vec::with_capacity(entries.len());

    for entry in entries {
        let chain = resolve_chain(&known, entry.chain.as_deref());
        let metrics = entry
            .metrics
            .resolve()
            .with_context(|| format!("Invalid metrics for {}", chain.name))?;
        let result = scoring::score(&metrics);
        debug!("{}: {} ({})", chain.name, result.total, result.tier);
        chains.push(ChainScore {
            chain,
            metrics,
            result,
        });
    }

    // A lone snapshot is its own headline
    let summary = if chains.len() > 1 {
        let totals: Vec<u8> = chains.iter().map(|c| c.result.total).collect();
        scoring::summarize(&totals)
    } else {
        None
    };

    Ok(ReputationReport {
        address,
        chains,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn parse_json(s: &str) -> Result<MetricsFile> {
        MetricsFile::from_value(serde_json::from_str(s).unwrap())
    }

    #[test]
    fn test_single_snapshot_json() {
        let file = parse_json(r#"{"governanceVotes": 5, "defiTx": 10, "balanceUSD": 300}"#).unwrap();
        let (address, entries) = file.into_parts();
        assert!(address.is_none());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].metrics.governance_votes, Some(5));
        assert_eq!(entries[0].metrics.unique_contracts, None);
    }

    #[test]
    fn test_list_json() {
        let file = parse_json(
            r#"[{"chain": "sepolia", "metrics": {"dex_swaps": 31}},
                {"chain": "84532", "metrics": {}}]"#,
        )
        .unwrap();
        let (_, entries) = file.into_parts();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].chain.as_deref(), Some("84532"));
    }

    #[test]
    fn test_wrapped_toml() {
        let value: Value = toml::from_str(
            r#"
address = "0xabc"

[[chains]]
chain = "polygonAmoy"
[chains.metrics]
governance_votes = 3
"#,
        )
        .unwrap();
        let (address, entries) = MetricsFile::from_value(value).unwrap().into_parts();
        assert_eq!(address.as_deref(), Some("0xabc"));
        assert_eq!(entries[0].metrics.governance_votes, Some(3));
    }

    #[test]
    fn test_build_report_resolves_chains_and_averages() {
        let config = ProjectConfig::default();
        let entries = vec![
            SnapshotEntry {
                chain: Some("sepolia".into()),
                metrics: PartialMetrics {
                    governance_votes: Some(5),
                    defi_tx: Some(10),
                    unique_contracts: Some(25),
                    airdrops_claimed: Some(5),
                    dex_swaps: Some(30),
                    balance_usd: Some(300.0),
                },
            },
            SnapshotEntry {
                chain: Some("my-devnet".into()),
                metrics: PartialMetrics::default(),
            },
        ];
        let report = build_report(&config, None, entries).unwrap();
        assert_eq!(report.chains[0].chain.chain_id, Some(11_155_111));
        assert_eq!(report.chains[0].result.total, 100);
        assert_eq!(report.chains[1].chain.name, "my-devnet");
        assert_eq!(report.chains[1].result.total, 0);
        let summary = report.summary.unwrap();
        assert_eq!(summary.total, 50);
        assert_eq!(summary.tier, Tier::Silver);
    }

    #[test]
    fn test_single_entry_has_no_summary() {
        let entries = vec![SnapshotEntry {
            chain: None,
            metrics: PartialMetrics {
                governance_votes: Some(1),
                ..Default::default()
            },
        }];
        let report = build_report(&ProjectConfig::default(), None, entries).unwrap();
        assert!(report.summary.is_none());
        assert_eq!(report.chains[0].chain.name, UNNAMED_CHAIN);
        assert_eq!(report.headline(), Some((5, Tier::Bronze)));
    }

    #[test]
    fn test_negative_balance_rejected() {
        let entries = vec![SnapshotEntry {
            chain: None,
            metrics: PartialMetrics {
                balance_usd: Some(-5.0),
                ..Default::default()
            },
        }];
        assert!(build_report(&ProjectConfig::default(), None, entries).is_err());
    }

    #[test]
    fn test_wrapped_file_with_bad_entry_is_rejected() {
        let err = parse_json(
            r#"{"address": "0xabc", "chains": [
                {"chain": "sepolia", "metrics": {"governanceVotes": 5, "dexSwaps": -1}}]}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("chains"), "{err:#}");
    }

    #[test]
    fn test_misspelled_metric_is_rejected() {
        let err = parse_json(r#"{"governance_vote": 5, "defiTx": 10}"#).unwrap_err();
        assert!(format!("{err:#}").contains("governance_vote"), "{err:#}");
    }

    #[test]
    fn test_unknown_entry_and_top_level_keys_are_rejected() {
        assert!(parse_json(r#"[{"chain": "sepolia", "metric": {}}]"#).is_err());
        assert!(parse_json(r#"{"adress": "0xabc", "chains": []}"#).is_err());
        assert!(parse_json("42").is_err());
    }
}
