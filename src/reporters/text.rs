//! Text (terminal) reporter with colors and formatting

use crate::chains::shorten_address;
use crate::models::{ChainScore, ReputationReport, Tier};
use anyhow::Result;

/// Tier colors (ANSI escape codes)
fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Platinum => "\x1b[96m", // Light cyan
        Tier::Gold => "\x1b[33m",     // Yellow
        Tier::Silver => "\x1b[37m",   // White
        Tier::Bronze => "\x1b[31m",   // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render report as formatted terminal output
pub fn render(report: &ReputationReport) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}ProofDrop Reputation{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    if let Some(address) = &report.address {
        out.push_str(&format!("Address: {}\n", shorten_address(address)));
    }

    let Some((total, tier)) = report.headline() else {
        out.push_str("No chains scored.\n");
        return Ok(out);
    };

    let tier_c = tier_color(tier);
    out.push_str(&format!(
        "Score: {BOLD}{}/100{RESET}  Tier: {tier_c}{BOLD}{}{RESET}",
        total, tier
    ));
    if let Some(summary) = &report.summary {
        if summary.chains_scored > 1 {
            out.push_str(&format!(
                "  {DIM}(average of {} chains){RESET}",
                summary.chains_scored
            ));
        }
    }
    out.push_str("\n\n");

    for chain in &report.chains {
        render_chain(&mut out, chain);
    }

    // Tips based on tier
    match tier {
        Tier::Platinum => out.push_str(&format!("{DIM}Top tier. Nothing left to unlock.{RESET}\n")),
        Tier::Gold => out.push_str(&format!(
            "{DIM}Strong history. Run with --explain to see what reaches Platinum.{RESET}\n"
        )),
        Tier::Silver | Tier::Bronze => out.push_str(&format!(
            "{DIM}Run with --explain to see the next threshold per category.{RESET}\n"
        )),
    }

    Ok(out)
}

fn render_chain(out: &mut String, chain: &ChainScore) {
    let result = &chain.result;
    let id = chain
        .chain
        .chain_id
        .map(|id| format!(" ({})", id))
        .unwrap_or_default();

    out.push_str(&format!(
        "{BOLD}{}{}{RESET}  Score: {BOLD}{}{RESET}  {}{}{RESET}\n",
        chain.chain.name,
        id,
        result.total,
        tier_color(result.tier),
        result.tier
    ));

    for (category, points) in result.points.iter() {
        out.push_str(&format!(
            "  {:<18} {:<24} {}\n",
            category.label(),
            category.describe(&chain.metrics),
            format_points(points, category.max_points())
        ));
    }
    out.push('\n');
}

fn format_points(points: u8, max: u8) -> String {
    let color = if points == max {
        "\x1b[32m"
    } else if points > 0 {
        "\x1b[33m"
    } else {
        DIM
    };
    format!("{color}{:>2}/{}{RESET}", points, max)
}
