//! Supported networks
//!
//! Built-in registry of the test networks (plus Ethereum mainnet) that
//! metrics can be captured on. Extra networks can be declared in
//! `proofdrop.toml` as `[[chains]]` tables; see [`crate::config::ProjectConfig`].

use serde::{Deserialize, Serialize};

/// A network an address can be scored on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Stable key, also part of the fixture seed
    pub key: String,
    pub chain_id: u64,
    pub name: String,
    pub currency_symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Symbol looked up in the price table to value the native balance
    pub price_symbol: String,
    #[serde(default)]
    pub explorer_url: Option<String>,
}

fn default_decimals() -> u8 {
    18
}

impl Chain {
    fn builtin(
        key: &str,
        chain_id: u64,
        name: &str,
        symbol: &str,
        explorer: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            chain_id,
            name: name.to_string(),
            currency_symbol: symbol.to_string(),
            decimals: 18,
            price_symbol: symbol.to_string(),
            explorer_url: Some(explorer.to_string()),
        }
    }

    /// Chain id in the `0x…` form wallets expect
    pub fn hex_chain_id(&self) -> String {
        hex_chain_id(self.chain_id)
    }

    pub fn to_ref(&self) -> crate::models::ChainRef {
        crate::models::ChainRef {
            key: Some(self.key.clone()),
            chain_id: Some(self.chain_id),
            name: self.name.clone(),
        }
    }
}

/// Networks known without any configuration
pub fn builtin_chains() -> Vec<Chain> {
    vec![
        Chain::builtin(
            "sepolia",
            11_155_111,
            "Ethereum Sepolia",
            "ETH",
            "https://sepolia.etherscan.io",
        ),
        Chain::builtin(
            "polygonAmoy",
            80_002,
            "Polygon Amoy",
            "MATIC",
            "https://amoy.polygonscan.com",
        ),
        Chain::builtin(
            "arbitrumSepolia",
            421_614,
            "Arbitrum Sepolia",
            "ETH",
            "https://sepolia.arbiscan.io",
        ),
        Chain::builtin(
            "baseSepolia",
            84_532,
            "Base Sepolia",
            "ETH",
            "https://sepolia.basescan.org",
        ),
        Chain::builtin("ethereum", 1, "Ethereum Mainnet", "ETH", "https://etherscan.io"),
    ]
}

/// Keys scored when the user selects nothing
pub const DEFAULT_CHAIN_KEYS: [&str; 4] = ["sepolia", "polygonAmoy", "arbitrumSepolia", "baseSepolia"];

/// Look up a chain by key (case-insensitive), decimal id, or `0x` hex id
pub fn find<'a>(chains: &'a [Chain], needle: &str) -> Option<&'a Chain> {
    let needle = needle.trim();
    if let Some(id) = parse_chain_id(needle) {
        if let Some(chain) = chains.iter().find(|c| c.chain_id == id) {
            return Some(chain);
        }
    }
    chains.iter().find(|c| c.key.eq_ignore_ascii_case(needle))
}

/// Parse `11155111` or `0xaa36a7`
pub fn parse_chain_id(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

pub fn hex_chain_id(chain_id: u64) -> String {
    format!("0x{:x}", chain_id)
}

/// Display name for a chain id, falling back to `Chain <id>`
pub fn display_name(chains: &[Chain], chain_id: u64) -> String {
    chains
        .iter()
        .find(|c| c.chain_id == chain_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Chain {}", chain_id))
}

/// `0x71C7…976F` style short form
pub fn shorten_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 10 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
