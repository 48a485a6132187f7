//! Threshold ladders for the six activity categories
//!
//! Every category maps a raw counter to points by walking a descending
//! ladder of rungs; the first rung the value reaches wins and anything
//! below the lowest rung scores 0.

use crate::models::{ActivityMetrics, Category, CategoryPoints};

/// How a value is compared against a rung threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// value >= threshold
    AtLeast,
    /// value > threshold
    Above,
}

/// One step of a ladder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rung {
    pub threshold: f64,
    pub points: u8,
    pub reach: Reach,
}

impl Rung {
    const fn at_least(threshold: f64, points: u8) -> Self {
        Self {
            threshold,
            points,
            reach: Reach::AtLeast,
        }
    }

    const fn above(threshold: f64, points: u8) -> Self {
        Self {
            threshold,
            points,
            reach: Reach::Above,
        }
    }

    fn reached_by(&self, value: f64) -> bool {
        match self.reach {
            Reach::AtLeast => value >= self.threshold,
            Reach::Above => value > self.threshold,
        }
    }
}

/// Ordered rungs, highest threshold first
#[derive(Debug, Clone, Copy)]
pub struct ThresholdLadder {
    pub category: Category,
    pub rungs: &'static [Rung],
}

impl ThresholdLadder {
    /// Points for `value`; NaN never reaches a rung
    pub fn points(&self, value: f64) -> u8 {
        self.rung_for(value).map(|r| r.points).unwrap_or(0)
    }

    /// The rung `value` lands on, if any
    pub fn rung_for(&self, value: f64) -> Option<&'static Rung> {
        self.rungs.iter().find(|r| r.reached_by(value))
    }

    /// The next rung above the one `value` lands on
    pub fn next_rung(&self, value: f64) -> Option<&'static Rung> {
        let current = self.points(value);
        self.rungs.iter().rev().find(|r| r.points > current)
    }
}

pub const GOVERNANCE: ThresholdLadder = ThresholdLadder {
    category: Category::Governance,
    rungs: &[
        Rung::at_least(5.0, 20),
        Rung::at_least(3.0, 15),
        Rung::at_least(1.0, 5),
    ],
};

pub const DEFI: ThresholdLadder = ThresholdLadder {
    category: Category::Defi,
    rungs: &[
        Rung::at_least(10.0, 20),
        Rung::at_least(5.0, 10),
        Rung::at_least(1.0, 5),
    ],
};

pub const UNIQUE_CONTRACTS: ThresholdLadder = ThresholdLadder {
    category: Category::UniqueContracts,
    rungs: &[
        Rung::at_least(20.0, 15),
        Rung::at_least(10.0, 10),
        Rung::at_least(5.0, 5),
    ],
};

pub const AIRDROPS: ThresholdLadder = ThresholdLadder {
    category: Category::Airdrops,
    rungs: &[
        Rung::at_least(5.0, 15),
        Rung::at_least(3.0, 10),
        Rung::at_least(1.0, 5),
    ],
};

pub const DEX_SWAPS: ThresholdLadder = ThresholdLadder {
    category: Category::DexSwaps,
    rungs: &[
        Rung::at_least(25.0, 15),
        Rung::at_least(15.0, 10),
        Rung::at_least(5.0, 5),
        Rung::at_least(2.0, 1),
    ],
};

// Top rung is strict: exactly $250 stays at 10 points.
pub const BALANCE: ThresholdLadder = ThresholdLadder {
    category: Category::Balance,
    rungs: &[
        Rung::above(250.0, 15),
        Rung::at_least(50.0, 10),
        Rung::at_least(10.0, 5),
    ],
};

/// Ladder used for a category
pub fn ladder(category: Category) -> &'static ThresholdLadder {
    match category {
        Category::Governance => &GOVERNANCE,
        Category::Defi => &DEFI,
        Category::UniqueContracts => &UNIQUE_CONTRACTS,
        Category::Airdrops => &AIRDROPS,
        Category::DexSwaps => &DEX_SWAPS,
        Category::Balance => &BALANCE,
    }
}

/// The raw value a category reads from a snapshot
pub fn raw_value(category: Category, metrics: &ActivityMetrics) -> f64 {
    match category {
        Category::Governance => f64::from(metrics.governance_votes),
        Category::Defi => f64::from(metrics.defi_tx),
        Category::UniqueContracts => f64::from(metrics.unique_contracts),
        Category::Airdrops => f64::from(metrics.airdrops_claimed),
        Category::DexSwaps => f64::from(metrics.dex_swaps),
        Category::Balance => metrics.balance_usd,
    }
}

pub fn score_governance(votes: u32) -> u8 {
    GOVERNANCE.points(f64::from(votes))
}

pub fn score_defi(tx_count: u32) -> u8 {
    DEFI.points(f64::from(tx_count))
}

pub fn score_unique_contracts(n: u32) -> u8 {
    UNIQUE_CONTRACTS.points(f64::from(n))
}

pub fn score_airdrops(n: u32) -> u8 {
    AIRDROPS.points(f64::from(n))
}

pub fn score_dex_swaps(n: u32) -> u8 {
    DEX_SWAPS.points(f64::from(n))
}

pub fn score_balance(usd: f64) -> u8 {
    BALANCE.points(usd)
}

/// Score all six categories of a snapshot
pub fn category_points(metrics: &ActivityMetrics) -> CategoryPoints {
    CategoryPoints {
        governance: score_governance(metrics.governance_votes),
        defi: score_defi(metrics.defi_tx),
        unique_contracts: score_unique_contracts(metrics.unique_contracts),
        airdrops: score_airdrops(metrics.airdrops_claimed),
        dex_swaps: score_dex_swaps(metrics.dex_swaps),
        balance: score_balance(metrics.balance_usd),
    }
}
