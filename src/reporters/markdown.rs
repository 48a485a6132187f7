//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for README badges, pull request comments
//! and community forum posts.

use crate::models::{ChainScore, ReputationReport, Tier};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &ReputationReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    if report.chains.len() > 1 {
        md.push_str(&render_chain_table(report));
        md.push('\n');
    }

    for chain in &report.chains {
        md.push_str(&render_breakdown(chain));
        md.push('\n');
    }

    md.push_str(&render_footer());

    Ok(md)
}

fn tier_emoji(tier: Tier) -> &'static str {
    match tier {
        Tier::Platinum => "💎",
        Tier::Gold => "🥇",
        Tier::Silver => "🥈",
        Tier::Bronze => "🥉",
    }
}

fn render_header(report: &ReputationReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let address = report.address.as_deref().unwrap_or("(unknown)");

    match report.headline() {
        Some((total, tier)) => format!(
            r#"# {} ProofDrop Reputation Report

**Tier: {}** | **Score: {}/100**

Address: `{}`

Generated: {}
"#,
            tier_emoji(tier),
            tier,
            total,
            address,
            timestamp
        ),
        None => format!(
            "# ProofDrop Reputation Report\n\nAddress: `{}`\n\nNo chains scored.\n",
            address
        ),
    }
}

fn render_chain_table(report: &ReputationReport) -> String {
    let mut md = String::from("## Chains\n\n| Chain | Chain ID | Score | Tier |\n|-------|----------|-------|------|\n");
    for chain in &report.chains {
        let id = chain
            .chain
            .chain_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            chain.chain.name, id, chain.result.total, chain.result.tier
        ));
    }
    if let Some(summary) = &report.summary {
        md.push_str(&format!(
            "| **Average** | | **{}** | **{}** |\n",
            summary.total, summary.tier
        ));
    }
    md
}

fn render_breakdown(chain: &ChainScore) -> String {
    let mut md = format!(
        "## {}\n\n| Category | Activity | Points |\n|----------|----------|--------|\n",
        chain.chain.name
    );
    for (category, points) in chain.result.points.iter() {
        md.push_str(&format!(
            "| {} | {} | {}/{} |\n",
            category.label(),
            category.describe(&chain.metrics),
            points,
            category.max_points()
        ));
    }
    md.push_str(&format!(
        "| **Total** | | **{}/100** ({}) |\n",
        chain.result.total, chain.result.tier
    ));
    md
}

fn render_footer() -> String {
    "---\n\n*Generated by ProofDrop. Scores are deterministic for a given metrics snapshot.*\n"
        .to_string()
}
