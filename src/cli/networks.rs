//! Chains command: list supported networks

use crate::chains::DEFAULT_CHAIN_KEYS;
use crate::config::ProjectConfig;
use anyhow::Result;
use console::style;

pub fn run(config: &ProjectConfig, json: bool) -> Result<()> {
    let chains = config.chains();

    if json {
        println!("{}", serde_json::to_string_pretty(&chains)?);
        return Ok(());
    }

    println!("\n{}\n", style("Supported networks").bold());
    println!(
        "  {:<18} {:>10}  {:<10} {:<20} {}",
        style("KEY").dim(),
        style("CHAIN ID").dim(),
        style("HEX").dim(),
        style("NAME").dim(),
        style("CURRENCY").dim()
    );
    for chain in &chains {
        let marker = if DEFAULT_CHAIN_KEYS.contains(&chain.key.as_str()) {
            style("*").green().to_string()
        } else {
            " ".to_string()
        };
        let price = config.price_usd(&chain.price_symbol);
        println!(
            "{} {:<18} {:>10}  {:<10} {:<20} {} (${:.2})",
            marker,
            chain.key,
            chain.chain_id,
            chain.hex_chain_id(),
            chain.name,
            chain.currency_symbol,
            price
        );
    }
    println!(
        "\n{} scored by `proofdrop simulate` by default\n",
        style("*").green()
    );
    Ok(())
}
