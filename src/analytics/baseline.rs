use serde::{Deserialize, Serialize};

use crate::analytics::normalize::DaySummary;

pub const OVERTRADING_MULTIPLIER: f64 = 1.5;
pub const RECOVERY_CALM_MULTIPLIER: f64 = 1.2;

/// Per-trader activity baseline. Every frequency judgement in the
/// engine is relative to this, never to an absolute trade count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub median_trades: f64,
    pub overtrading_threshold: f64,
}

impl Baseline {
    pub fn is_overtraded(&self, trade_count: u32) -> bool {
        f64::from(trade_count) >= self.overtrading_threshold
    }

    /// A day counts as calm when its trade count stays within 1.2x the
    /// median, the band used when judging bounce-back behavior.
    pub fn is_calm(&self, trade_count: u32) -> bool {
        f64::from(trade_count) <= self.median_trades * RECOVERY_CALM_MULTIPLIER
    }
}

/// Median daily trade count across the window. For an even number of
/// days the lower of the two middle values is taken, so the baseline
/// always equals a count that actually occurred.
pub fn compute(days: &[DaySummary]) -> Baseline {
    let mut counts: Vec<u32> = days.iter().map(|day| day.trade_count).collect();
    counts.sort_unstable();

    let median = if counts.is_empty() {
        0.0
    } else {
        f64::from(counts[(counts.len() - 1) / 2])
    };

    Baseline {
        median_trades: median,
        overtrading_threshold: median * OVERTRADING_MULTIPLIER,
    }
}
