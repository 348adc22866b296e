use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::{baseline, normalize, MIN_ANALYSIS_RECORDS};
use crate::models::{RuleStatus, SessionRecord};

const MIN_RECORDS_FOR_DIRECTION: usize = 6;
const RULE_INTEGRITY_MAX: f64 = 50.0;
const FREQUENCY_MAX: f64 = 30.0;
const FREQUENCY_PENALTY_PER_DAY: f64 = 6.0;
const FREQUENCY_NEUTRAL: f64 = 15.0;
const RECOVERY_MAX: f64 = 20.0;
const DIRECTION_DELTA: i32 = 5;

const WEIGHT_CLEAN: f64 = 1.0;
const WEIGHT_MINOR: f64 = 0.6;
const WEIGHT_MAJOR: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Worsening,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Worsening => write!(f, "worsening"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Strong,
    Stable,
    AtRisk,
    Critical,
}

impl ScoreLabel {
    pub fn for_score(score: u32) -> ScoreLabel {
        match score {
            85.. => ScoreLabel::Strong,
            70..=84 => ScoreLabel::Stable,
            50..=69 => ScoreLabel::AtRisk,
            _ => ScoreLabel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Strong => "Strong",
            ScoreLabel::Stable => "Stable",
            ScoreLabel::AtRisk => "At Risk",
            ScoreLabel::Critical => "Critical",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendBreakdown {
    pub rule_integrity: f64,
    pub trade_frequency: f64,
    pub recovery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendScore {
    pub score: u32,
    pub label: ScoreLabel,
    pub breakdown: TrendBreakdown,
    /// First half vs second half of the window. `None` below 6 records.
    pub trend: Option<TrendDirection>,
    pub trend_diff: Option<i32>,
}

/// Composite 0-100 discipline score over chronologically sorted
/// records: 50 points rule integrity, 30 trade frequency, 20 recovery.
/// Returns `None` below 3 records.
pub fn trend_score(records: &[SessionRecord]) -> Option<TrendScore> {
    if records.len() < MIN_ANALYSIS_RECORDS {
        return None;
    }

    let breakdown = component_scores(records);
    let score = total_score(&breakdown);

    let (trend, trend_diff) = if records.len() >= MIN_RECORDS_FOR_DIRECTION {
        let mid = records.len() / 2;
        let earlier = total_score(&component_scores(&records[..mid])) as i32;
        let later = total_score(&component_scores(&records[mid..])) as i32;
        let diff = later - earlier;
        let direction = if diff >= DIRECTION_DELTA {
            TrendDirection::Improving
        } else if diff <= -DIRECTION_DELTA {
            TrendDirection::Worsening
        } else {
            TrendDirection::Stable
        };
        (Some(direction), Some(diff))
    } else {
        (None, None)
    };

    Some(TrendScore {
        score,
        label: ScoreLabel::for_score(score),
        breakdown,
        trend,
        trend_diff,
    })
}

fn status_weight(status: Option<RuleStatus>) -> f64 {
    match status {
        Some(RuleStatus::Clean) => WEIGHT_CLEAN,
        Some(RuleStatus::Minor) => WEIGHT_MINOR,
        // Unrated sessions weigh like majors: no rating, no credit.
        Some(RuleStatus::Major) | None => WEIGHT_MAJOR,
    }
}

fn component_scores(records: &[SessionRecord]) -> TrendBreakdown {
    let total = records.len() as f64;
    let weight_sum: f64 = records.iter().map(|r| status_weight(r.rule_status)).sum();
    let rule_integrity = weight_sum / total * RULE_INTEGRITY_MAX;

    // Frequency control is judged against the slice's own baseline so
    // that half-window scores stay comparable to full-window ones.
    let days = normalize::daily_view(records);
    let b = baseline::compute(&days);
    let trade_frequency = if b.median_trades > 0.0 {
        let overtraded = days.iter().filter(|d| b.is_overtraded(d.trade_count)).count();
        (FREQUENCY_MAX - FREQUENCY_PENALTY_PER_DAY * overtraded as f64).max(0.0)
    } else {
        FREQUENCY_NEUTRAL
    };

    TrendBreakdown {
        rule_integrity,
        trade_frequency,
        recovery: recovery_component(records),
    }
}

fn recovery_component(records: &[SessionRecord]) -> f64 {
    let mut stress_with_follow = 0u32;
    let mut successes = 0u32;
    let mut any_stress = false;

    for (i, r) in records.iter().enumerate() {
        let stressed = r.rule_status == Some(RuleStatus::Major) || r.pnl < 0.0;
        if !stressed {
            continue;
        }
        any_stress = true;
        if let Some(next) = records.get(i + 1) {
            stress_with_follow += 1;
            if next.followed_rules() {
                successes += 1;
            }
        }
    }

    // No stress observed, or stress only on the final record: nothing
    // to grade, give the neutral-positive default.
    if !any_stress || stress_with_follow == 0 {
        return RECOVERY_MAX;
    }
    RECOVERY_MAX * f64::from(successes) / f64::from(stress_with_follow)
}

fn total_score(breakdown: &TrendBreakdown) -> u32 {
    let sum = breakdown.rule_integrity + breakdown.trade_frequency + breakdown.recovery;
    sum.clamp(0.0, 100.0).round() as u32
}
