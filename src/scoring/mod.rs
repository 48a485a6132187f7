//! Reputation Scoring System
//!
//! This module turns one snapshot of on-chain activity into a bounded
//! point total and a tier. Everything here is pure: no I/O, no shared
//! state, the same snapshot always yields the same result.
//!
//! # Scoring Formula
//!
//! ```text
//! Total = clamp(round(Governance + DeFi + Contracts + Airdrops + Swaps + Balance), 0, 100)
//! ```
//!
//! # Category Ladders (first matching rung wins)
//!
//! - **Governance** (max 20): >=5 votes 20, >=3 15, >=1 5
//! - **DeFi** (max 20): >=10 tx 20, >=5 10, >=1 5
//! - **Unique contracts** (max 15): >=20 15, >=10 10, >=5 5
//! - **Airdrops** (max 15): >=5 15, >=3 10, >=1 5
//! - **DEX swaps** (max 15): >=25 15, >=15 10, >=5 5, >=2 1
//! - **Balance** (max 15): >$250 15, >=$50 10, >=$10 5
//!
//! # Tiers
//!
//! - Platinum: 85-100
//! - Gold: 70-84
//! - Silver: 50-69
//! - Bronze: 0-49
//!
//! # Multi-chain
//!
//! When the same address is scored on several networks, the overall
//! total is the rounded mean of the per-chain totals, tiered the same way.

pub mod ladder;
mod reputation_scorer;

pub use ladder::{
    category_points, score_airdrops, score_balance, score_defi, score_dex_swaps,
    score_governance, score_unique_contracts, ThresholdLadder,
};
pub use reputation_scorer::{aggregate, classify, explain, score, summarize, MAX_TOTAL};
