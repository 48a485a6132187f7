//! Aggregation, tiering and multi-chain summary
//!
//! Turns per-category points into a clamped total and a tier, and
//! averages independently scored networks into one overall score.

use super::ladder::{self, Reach};
use crate::models::{ActivityMetrics, CategoryPoints, MultiChainSummary, ScoreResult, Tier};
use tracing::{debug, info};

/// Lowest total for each tier, highest first
const TIER_FLOORS: [(u8, Tier); 3] = [(85, Tier::Platinum), (70, Tier::Gold), (50, Tier::Silver)];

pub const MAX_TOTAL: u8 = 100;

/// Sum category points, round, then clamp into [0, 100]
pub fn aggregate(points: &CategoryPoints) -> u8 {
    let rounded = (points.sum() as f64).round();
    rounded.clamp(0.0, f64::from(MAX_TOTAL)) as u8
}

/// Map a 0-100 total onto its tier
pub fn classify(total: u8) -> Tier {
    TIER_FLOORS
        .iter()
        .find(|(floor, _)| total >= *floor)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::Bronze)
}

/// Full pipeline: metrics -> points -> total -> tier
pub fn score(metrics: &ActivityMetrics) -> ScoreResult {
    let points = ladder::category_points(metrics);

    debug!(
        "Category points: gov={} defi={} uniq={} air={} swaps={} bal={}",
        points.governance,
        points.defi,
        points.unique_contracts,
        points.airdrops,
        points.dex_swaps,
        points.balance
    );

    let total = aggregate(&points);
    let tier = classify(total);

    info!("Reputation score: {} ({})", total, tier);

    ScoreResult {
        points,
        total,
        tier,
    }
}

/// Average per-chain totals into one overall score.
///
/// Returns `None` when no chain was scored.
pub fn summarize(totals: &[u8]) -> Option<MultiChainSummary> {
    if totals.is_empty() {
        return None;
    }
    let sum: u32 = totals.iter().map(|t| u32::from(*t)).sum();
    let mean = f64::from(sum) / totals.len() as f64;
    let total = mean.round().clamp(0.0, f64::from(MAX_TOTAL)) as u8;

    debug!("Averaged {} chain totals: mean={:.2}", totals.len(), mean);

    Some(MultiChainSummary {
        chains_scored: totals.len(),
        total,
        tier: classify(total),
    })
}

/// Generate human-readable explanation of a score
pub fn explain(result: &ScoreResult, metrics: &ActivityMetrics) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "# Reputation Score: {} ({})\n",
        result.total, result.tier
    ));

    lines.push("## Scoring Formula\n".to_string());
    lines.push("```".to_string());
    lines.push("Total = clamp(round(sum of category points), 0, 100)".to_string());
    lines.push("Tier  = Platinum >= 85, Gold >= 70, Silver >= 50, else Bronze".to_string());
    lines.push("```\n".to_string());

    lines.push("## Categories\n".to_string());
    for (category, points) in result.points.iter() {
        let rungs = ladder::ladder(category);
        let value = ladder::raw_value(category, metrics);
        lines.push(format!(
            "- **{}**: {} -> {}/{}",
            category,
            category.describe(metrics),
            points,
            category.max_points()
        ));
        if let Some(next) = rungs.next_rung(value) {
            let op = match next.reach {
                Reach::AtLeast => ">=",
                Reach::Above => ">",
            };
            lines.push(format!(
                "  - next: {} {} for {} points",
                op, next.threshold, next.points
            ));
        }
    }

    if let Some((floor, tier)) = TIER_FLOORS
        .iter()
        .rev()
        .find(|(floor, _)| result.total < *floor)
    {
        lines.push(format!(
            "\n{} more point(s) reach {}",
            floor - result.total,
            tier
        ));
    }

    lines.join("\n")
}
