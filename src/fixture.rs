//! Deterministic stand-in metrics
//!
//! When no indexer data is available, activity counters are drawn from a
//! xorshift32 stream seeded by the address and chain key, so the same
//! address always produces the same demo metrics on the same chain.

use crate::models::ActivityMetrics;
use rand::RngCore;

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const ZERO_SEED_FALLBACK: u32 = 123_456_789;

/// Inclusive ranges each counter is drawn from, in draw order
const GOVERNANCE_RANGE: (u32, u32) = (0, 7);
const DEFI_RANGE: (u32, u32) = (0, 18);
const UNIQUE_CONTRACTS_RANGE: (u32, u32) = (0, 30);
const AIRDROPS_RANGE: (u32, u32) = (0, 8);
const DEX_SWAPS_RANGE: (u32, u32) = (0, 35);

/// 32-bit FNV-1a over UTF-16 code units
pub fn fnv1a(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Marsaglia xorshift32 generator
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_FALLBACK } else { seed };
        Self { state }
    }

    /// Seed from an arbitrary label
    pub fn from_label(label: &str) -> Self {
        Self::new(fnv1a(label))
    }

    /// Seed for one address on one chain
    pub fn for_address(address: &str, chain_key: &str) -> Self {
        Self::from_label(&format!("{}|{}", address.to_lowercase(), chain_key))
    }

    fn step(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in [0, 1]
    pub fn unit(&mut self) -> f64 {
        f64::from(self.step()) / f64::from(u32::MAX)
    }

    /// Integer in [min, max]
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max - min + 1);
        let drawn = (self.unit() * span).floor() as u32 + min;
        // unit() can return exactly 1.0
        drawn.min(max)
    }

    fn draw(&mut self, (min, max): (u32, u32)) -> u32 {
        self.range(min, max)
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Demo metrics for `address` on `chain_key`.
///
/// The balance is not simulated; callers pass the USD value of whatever
/// native balance they know about (zero if none).
pub fn simulate(address: &str, chain_key: &str, balance_usd: f64) -> ActivityMetrics {
    let mut rng = XorShift32::for_address(address, chain_key);

    ActivityMetrics {
        governance_votes: rng.draw(GOVERNANCE_RANGE),
        defi_tx: rng.draw(DEFI_RANGE),
        unique_contracts: rng.draw(UNIQUE_CONTRACTS_RANGE),
        airdrops_claimed: rng.draw(AIRDROPS_RANGE),
        dex_swaps: rng.draw(DEX_SWAPS_RANGE),
        balance_usd,
    }
}
