use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::baseline::{self, Baseline};
use crate::analytics::focus::{self, FocusPlan};
use crate::analytics::normalize;
use crate::analytics::patterns::{
    self, LossChaseIncident, RecoveryRate, RevengeIncident, ViolationCounts,
};
use crate::analytics::purchases::{self, PurchaseSummary};
use crate::analytics::streaks::{self, StreakSummary};
use crate::analytics::trend::{self, TrendDirection, TrendScore};
use crate::analytics::triggers::{self, TriggerVerdict};
use crate::models::{PurchaseEvent, SessionRecord};

/// Everything the engine derives from one account's window, in one
/// document. Freshly computed on every call, never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineReport {
    // Window
    pub account: String,
    pub generated_on: NaiveDate,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub sessions: usize,
    pub days_logged: usize,

    // Activity
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,

    // Baseline
    pub baseline: Baseline,

    // Adherence
    pub violations: ViolationCounts,
    pub recovery: RecoveryRate,

    // Patterns
    pub loss_chase_incidents: Vec<LossChaseIncident>,
    pub revenge_incidents: Vec<RevengeIncident>,
    pub discipline_drift: TrendDirection,

    // Composite
    pub trend_score: Option<TrendScore>,
    pub streak: StreakSummary,
    pub most_common_trigger: TriggerVerdict,
    pub suggested_focus: Option<FocusPlan>,

    // Purchases
    pub purchases: PurchaseSummary,
}

impl DisciplineReport {
    /// Runs the full pipeline. `reference` bounds the purchase window
    /// and is the only input that is not part of the records
    /// themselves; identical inputs always produce an identical report.
    pub fn compute(
        account: &str,
        records: &[SessionRecord],
        purchase_events: &[PurchaseEvent],
        reference: NaiveDate,
    ) -> Self {
        let sorted = normalize::chronological(records);
        let days = normalize::daily_view(&sorted);

        let baseline = baseline::compute(&days);
        let violations = patterns::violation_counts(&days, &baseline);
        let recovery = patterns::recovery_rate(&days, &baseline);
        let loss_chase = patterns::loss_chase_incidents(&days, &baseline);
        let revenge = patterns::revenge_incidents(&days, &baseline);
        let drift = patterns::discipline_drift(&days);
        let trend_score = trend::trend_score(&sorted);
        let streak = streaks::streaks(&sorted);
        let trigger = triggers::most_common_trigger(&sorted);
        let spend = purchases::purchase_summary(purchase_events, reference);
        let suggested_focus = focus::suggested_focus(
            sorted.len(),
            &days,
            &baseline,
            &violations,
            &recovery,
            &spend,
        );

        DisciplineReport {
            account: account.to_string(),
            generated_on: reference,
            first_date: days.first().map(|d| d.date),
            last_date: days.last().map(|d| d.date),
            sessions: sorted.len(),
            days_logged: days.len(),
            total_trades: sorted.iter().map(|r| r.trade_count).sum(),
            winning_trades: sorted.iter().map(|r| r.wins).sum(),
            losing_trades: sorted.iter().map(|r| r.losses).sum(),
            baseline,
            violations,
            recovery,
            loss_chase_incidents: loss_chase,
            revenge_incidents: revenge,
            discipline_drift: drift,
            trend_score,
            streak,
            most_common_trigger: trigger,
            suggested_focus,
            purchases: spend,
        }
    }

    /// Writes the report as pretty JSON, creating the parent directory
    /// when needed.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(70));
        println!("  DISCIPLINE REPORT - {}", self.account);
        println!("{}", "=".repeat(70));
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => println!(
                "  Window:      {} to {} ({} days logged, {} sessions)",
                first, last, self.days_logged, self.sessions
            ),
            _ => println!("  Window:      no sessions logged"),
        }
        println!(
            "  Trades:      {} ({} wins / {} losses)",
            self.total_trades, self.winning_trades, self.losing_trades
        );
        println!();
        println!("  BASELINE");
        println!("  ───────────────────────────────────");
        println!("  Median daily trades:    {:.0}", self.baseline.median_trades);
        println!(
            "  Overtrading threshold:  {:.1}",
            self.baseline.overtrading_threshold
        );
        println!();
        println!("  RULE ADHERENCE");
        println!("  ───────────────────────────────────");
        println!("  Minor violation days:   {}", self.violations.minor_days);
        println!("  Major violation days:   {}", self.violations.major_days);
        println!("  Overtrading days:       {}", self.violations.overtrading_days);
        match self.recovery.percent {
            Some(pct) => println!(
                "  Recovery rate:          {:.1}% ({} of {} red days)",
                pct, self.recovery.recovered, self.recovery.red_days
            ),
            None => println!("  Recovery rate:          not established (no red days yet)"),
        }
        println!();
        println!("  PATTERNS");
        println!("  ───────────────────────────────────");
        println!("  Discipline drift:       {}", self.discipline_drift);
        if self.loss_chase_incidents.is_empty() {
            println!("  Loss chasing:           none detected");
        } else {
            println!("  Loss chasing:           {} incident(s)", self.loss_chase_incidents.len());
            for inc in &self.loss_chase_incidents {
                println!(
                    "    {}  {} trades after {:+.2}",
                    inc.date, inc.trade_count, inc.prior_loss
                );
            }
        }
        if self.revenge_incidents.is_empty() {
            println!("  Revenge trading:        none detected");
        } else {
            println!("  Revenge trading:        {} incident(s)", self.revenge_incidents.len());
            for inc in &self.revenge_incidents {
                println!("    {}  {} trades ({})", inc.date, inc.trade_count, inc.timing);
            }
        }
        println!();
        println!("  TREND");
        println!("  ───────────────────────────────────");
        match &self.trend_score {
            Some(ts) => {
                println!("  Score:       {} / 100 ({})", ts.score, ts.label);
                println!(
                    "  Breakdown:   integrity {:.1} | frequency {:.1} | recovery {:.1}",
                    ts.breakdown.rule_integrity,
                    ts.breakdown.trade_frequency,
                    ts.breakdown.recovery
                );
                match (ts.trend, ts.trend_diff) {
                    (Some(direction), Some(diff)) => {
                        println!("  Direction:   {} ({:+} vs earlier half)", direction, diff)
                    }
                    _ => println!("  Direction:   need 6+ sessions"),
                }
            }
            None => println!("  Score:       insufficient data (need 3+ sessions)"),
        }
        if self.streak.has_data {
            println!(
                "  Streak:      {} current / {} best (90d)",
                self.streak.current, self.streak.best
            );
        } else {
            println!("  Streak:      no sessions logged");
        }
        match &self.most_common_trigger {
            TriggerVerdict::NoData => println!("  Trigger:     no data"),
            TriggerVerdict::NoViolations => {
                println!("  Trigger:     no discipline triggers detected")
            }
            TriggerVerdict::Tallied {
                trigger,
                count,
                break_sessions,
            } => match trigger {
                Some(tag) => println!(
                    "  Trigger:     {} ({}x across {} break sessions)",
                    tag, count, break_sessions
                ),
                None => println!(
                    "  Trigger:     untagged ({} break sessions)",
                    break_sessions
                ),
            },
        }
        println!();
        println!("  FOCUS");
        println!("  ───────────────────────────────────");
        match &self.suggested_focus {
            Some(plan) => {
                println!("  {}", plan.title);
                println!("  {}", plan.rationale);
                for goal in &plan.goals {
                    println!("    - {}", goal);
                }
                println!("  Success:     {}", plan.success_criterion);
            }
            None => println!("  No recommendation yet (need 3+ sessions)"),
        }
        println!();
        println!("  PURCHASES");
        println!("  ───────────────────────────────────");
        println!("  Spend (30d):            ${:.2}", self.purchases.spend_30d);
        println!("  Spend (lifetime):       ${:.2}", self.purchases.spend_lifetime);
        println!("  Resets (30d):           {}", self.purchases.resets_30d);
        println!("{}", "=".repeat(70));
    }
}
