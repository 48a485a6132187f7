//! ProofDrop - on-chain reputation scoring
//!
//! Turns six raw activity counters for a wallet address into a 0-100
//! score and a Bronze/Silver/Gold/Platinum tier, and averages scores
//! across several chains into one overall result.
//!
//! ```
//! use proofdrop::models::{ActivityMetrics, Tier};
//!
//! let metrics = ActivityMetrics {
//!     governance_votes: 3,
//!     defi_tx: 5,
//!     unique_contracts: 10,
//!     airdrops_claimed: 3,
//!     dex_swaps: 15,
//!     balance_usd: 50.0,
//! };
//! let result = proofdrop::scoring::score(&metrics);
//! assert_eq!(result.total, 65);
//! assert_eq!(result.tier, Tier::Silver);
//! ```

pub mod chains;
pub mod cli;
pub mod config;
pub mod fixture;
pub mod models;
pub mod proof;
pub mod reporters;
pub mod scoring;
