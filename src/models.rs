//! Core data models for ProofDrop
//!
//! These models are used throughout the crate for representing
//! activity snapshots, per-category points, and scoring results.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Errors raised while accepting a metrics snapshot from outside the crate
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("balance_usd must be a finite, non-negative number (got {0})")]
    InvalidBalance(f64),

    #[error("Unknown tier '{0}'. Valid tiers: bronze, silver, gold, platinum")]
    UnknownTier(String),
}

/// One immutable capture of the six raw activity counters for an address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityMetrics {
    /// Governance proposals voted on
    #[serde(default, alias = "governanceVotes")]
    pub governance_votes: u32,
    /// Lending, borrowing and LP transactions
    #[serde(default, alias = "defiTx")]
    pub defi_tx: u32,
    /// Distinct contract addresses interacted with
    #[serde(default, alias = "uniqueContracts")]
    pub unique_contracts: u32,
    #[serde(default, alias = "airdropsClaimed")]
    pub airdrops_claimed: u32,
    #[serde(default, alias = "dexSwaps")]
    pub dex_swaps: u32,
    /// Estimated holdings in USD
    #[serde(default, alias = "balanceUSD", alias = "balanceUsd")]
    pub balance_usd: f64,
}

impl ActivityMetrics {
    /// Check the one precondition the type system cannot express
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.balance_usd.is_finite() || self.balance_usd < 0.0 {
            return Err(InputError::InvalidBalance(self.balance_usd));
        }
        Ok(())
    }
}

/// A capture where some metric sources may have failed.
///
/// Each `None` is a source that could not be reached; resolving the
/// snapshot substitutes zero so the scorer always sees a full value.
/// Unknown field names are rejected rather than treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialMetrics {
    #[serde(default, alias = "governanceVotes")]
    pub governance_votes: Option<u32>,
    #[serde(default, alias = "defiTx")]
    pub defi_tx: Option<u32>,
    #[serde(default, alias = "uniqueContracts")]
    pub unique_contracts: Option<u32>,
    #[serde(default, alias = "airdropsClaimed")]
    pub airdrops_claimed: Option<u32>,
    #[serde(default, alias = "dexSwaps")]
    pub dex_swaps: Option<u32>,
    #[serde(default, alias = "balanceUSD", alias = "balanceUsd")]
    pub balance_usd: Option<f64>,
}

impl PartialMetrics {
    /// Names of the categories that have no value
    pub fn missing(&self) -> Vec<Category> {
        let present = [
            (Category::Governance, self.governance_votes.is_some()),
            (Category::Defi, self.defi_tx.is_some()),
            (Category::UniqueContracts, self.unique_contracts.is_some()),
            (Category::Airdrops, self.airdrops_claimed.is_some()),
            (Category::DexSwaps, self.dex_swaps.is_some()),
            (Category::Balance, self.balance_usd.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(c, _)| c)
            .collect()
    }

    /// Fill missing fields with zero and validate the result
    pub fn resolve(self) -> Result<ActivityMetrics, InputError> {
        let missing = self.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|c| c.label()).collect();
            warn!("No value for {}; defaulting to 0", names.join(", "));
        }

        let metrics = ActivityMetrics {
            governance_votes: self.governance_votes.unwrap_or(0),
            defi_tx: self.defi_tx.unwrap_or(0),
            unique_contracts: self.unique_contracts.unwrap_or(0),
            airdrops_claimed: self.airdrops_claimed.unwrap_or(0),
            dex_swaps: self.dex_swaps.unwrap_or(0),
            balance_usd: self.balance_usd.unwrap_or(0.0),
        };
        metrics.validate()?;
        Ok(metrics)
    }
}

/// One of the six independently scored activity facets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Governance,
    Defi,
    UniqueContracts,
    Airdrops,
    DexSwaps,
    Balance,
}

impl Category {
    pub const fn all() -> [Category; 6] {
        [
            Category::Governance,
            Category::Defi,
            Category::UniqueContracts,
            Category::Airdrops,
            Category::DexSwaps,
            Category::Balance,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Governance => "Governance",
            Category::Defi => "DeFi",
            Category::UniqueContracts => "Unique Contracts",
            Category::Airdrops => "Airdrops",
            Category::DexSwaps => "DEX Swaps",
            Category::Balance => "Balance",
        }
    }

    /// Upper bound of the points this category can contribute
    pub const fn max_points(&self) -> u8 {
        match self {
            Category::Governance | Category::Defi => 20,
            Category::UniqueContracts
            | Category::Airdrops
            | Category::DexSwaps
            | Category::Balance => 15,
        }
    }

    /// Raw metric as shown to users, e.g. "3 proposal(s) voted"
    pub fn describe(&self, metrics: &ActivityMetrics) -> String {
        match self {
            Category::Governance => format!("{} proposal(s) voted", metrics.governance_votes),
            Category::Defi => format!("{} DeFi tx", metrics.defi_tx),
            Category::UniqueContracts => format!("{} contracts", metrics.unique_contracts),
            Category::Airdrops => format!("{} airdrops", metrics.airdrops_claimed),
            Category::DexSwaps => format!("{} swaps", metrics.dex_swaps),
            Category::Balance => format!("${:.2} USD", metrics.balance_usd),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Points awarded per category, each bounded by `Category::max_points`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryPoints {
    pub governance: u8,
    pub defi: u8,
    pub unique_contracts: u8,
    pub airdrops: u8,
    pub dex_swaps: u8,
    pub balance: u8,
}

impl CategoryPoints {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Governance => self.governance,
            Category::Defi => self.defi,
            Category::UniqueContracts => self.unique_contracts,
            Category::Airdrops => self.airdrops,
            Category::DexSwaps => self.dex_swaps,
            Category::Balance => self.balance,
        }
    }

    /// (category, points) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        Category::all().into_iter().map(move |c| (c, self.get(c)))
    }

    /// Unclamped sum of all six categories
    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, p)| u32::from(p)).sum()
    }
}

/// Ordinal label classifying a 0-100 total
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bronze" => Ok(Tier::Bronze),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            _ => Err(InputError::UnknownTier(s.to_string())),
        }
    }
}

/// Result of scoring one metrics snapshot. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub points: CategoryPoints,
    /// Total in [0, 100]
    pub total: u8,
    pub tier: Tier,
}

/// Identifies the network a snapshot was captured on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChainRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    pub name: String,
}

/// One network's metrics together with their score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainScore {
    pub chain: ChainRef,
    pub metrics: ActivityMetrics,
    pub result: ScoreResult,
}

/// Overall score across independently scored networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChainSummary {
    pub chains_scored: usize,
    /// Rounded mean of the per-chain totals
    pub total: u8,
    pub tier: Tier,
}

/// Everything a reporter needs to render one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReputationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub chains: Vec<ChainScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<MultiChainSummary>,
}

impl ReputationReport {
    /// Headline total: the summary when present, else the only chain's total
    pub fn headline(&self) -> Option<(u8, Tier)> {
        if let Some(s) = &self.summary {
            return Some((s.total, s.tier));
        }
        self.chains.first().map(|c| (c.result.total, c.result.tier))
    }
}
