use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::baseline::Baseline;
use crate::analytics::normalize::DaySummary;
use crate::analytics::patterns::{RecoveryRate, ViolationCounts};
use crate::analytics::purchases::PurchaseSummary;
use crate::analytics::MIN_ANALYSIS_RECORDS;
use crate::models::RuleStatus;

const RECOVERY_FOCUS_MAX_RATE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusCategory {
    RecoveryDiscipline,
    ProtectWins,
    TradeFrequency,
    CapitalProtection,
    MaintainDiscipline,
}

impl fmt::Display for FocusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusCategory::RecoveryDiscipline => write!(f, "recovery_discipline"),
            FocusCategory::ProtectWins => write!(f, "protect_wins"),
            FocusCategory::TradeFrequency => write!(f, "trade_frequency"),
            FocusCategory::CapitalProtection => write!(f, "capital_protection"),
            FocusCategory::MaintainDiscipline => write!(f, "maintain_discipline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPlan {
    pub category: FocusCategory,
    pub title: String,
    pub rationale: String,
    pub goals: Vec<String>,
    pub success_criterion: String,
}

/// First matching rule wins; the order is the whole point. Returns
/// `None` below 3 records, when there is too little history to coach
/// against.
pub fn suggested_focus(
    record_count: usize,
    days: &[DaySummary],
    baseline: &Baseline,
    counts: &ViolationCounts,
    recovery: &RecoveryRate,
    purchases: &PurchaseSummary,
) -> Option<FocusPlan> {
    if record_count < MIN_ANALYSIS_RECORDS {
        return None;
    }

    if counts.major_days >= 1 {
        if let Some(rate) = recovery.percent {
            if rate < RECOVERY_FOCUS_MAX_RATE {
                return Some(plan(FocusCategory::RecoveryDiscipline));
            }
        }
    }

    if days
        .iter()
        .any(|d| d.pnl > 0.0 && d.status != Some(RuleStatus::Clean))
    {
        return Some(plan(FocusCategory::ProtectWins));
    }

    let mean_trades =
        days.iter().map(|d| f64::from(d.trade_count)).sum::<f64>() / days.len() as f64;
    if counts.overtrading_days >= 1 || mean_trades > baseline.median_trades {
        return Some(plan(FocusCategory::TradeFrequency));
    }

    if purchases.resets_30d >= 1 {
        return Some(plan(FocusCategory::CapitalProtection));
    }

    Some(plan(FocusCategory::MaintainDiscipline))
}

// Fixed coaching payloads. The text is data; only the category routing
// above is logic.
fn plan(category: FocusCategory) -> FocusPlan {
    let (title, rationale, goals, success_criterion): (&str, &str, &[&str], &str) = match category
    {
        FocusCategory::RecoveryDiscipline => (
            "Recovery Discipline",
            "Major rule breaks are not being followed by controlled sessions. The day after a loss is where evaluations die.",
            &[
                "After any red day, cap the next session at your median trade count",
                "Write the next day's plan before closing the platform on a losing day",
                "No trades in the first 15 minutes of a recovery session",
            ],
            "Clean bounce-back (NONE status, calm size) after at least half of red days across the next ten sessions",
        ),
        FocusCategory::ProtectWins => (
            "Protect Winning Days",
            "Winning days are being handed back through rule breaks after the profit is already booked.",
            &[
                "Stop trading once the daily target is hit",
                "No rule exceptions while green on the day",
                "Journal the exit time of the final trade on every winning day",
            ],
            "Ten consecutive winning days closed without a violation",
        ),
        FocusCategory::TradeFrequency => (
            "Reduce Trade Frequency",
            "Trade count is running ahead of your own baseline, and overtraded days are where discipline slips first.",
            &[
                "Hard stop at your median daily trade count",
                "One setup, one entry; re-entries need a journaled reason",
                "Mark any day at or above the overtrading threshold in the journal",
            ],
            "No day at or above the overtrading threshold for ten sessions",
        ),
        FocusCategory::CapitalProtection => (
            "Capital Protection",
            "Recent resets mean the account is burning faster than the skills are compounding.",
            &[
                "Halve position size until a full week passes without a violation",
                "Treat the daily loss limit as a circuit breaker, not a target",
                "No new evaluation purchases until the current one survives a month",
            ],
            "Thirty days without a reset or retry purchase",
        ),
        FocusCategory::MaintainDiscipline => (
            "Maintain Discipline",
            "No acute pattern stands out right now. The edge is consistency, not correction.",
            &[
                "Keep journaling every session, including the quiet ones",
                "Review each week against your own baseline, not someone else's",
                "Raise size only after another clean month",
            ],
            "Extend the current clean streak by two more weeks",
        ),
    };

    FocusPlan {
        category,
        title: title.to_string(),
        rationale: rationale.to_string(),
        goals: goals.iter().map(|g| g.to_string()).collect(),
        success_criterion: success_criterion.to_string(),
    }
}
