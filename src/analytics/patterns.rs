use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::baseline::Baseline;
use crate::analytics::normalize::DaySummary;
use crate::analytics::trend::TrendDirection;
use crate::models::RuleStatus;

const DRIFT_WINDOW: usize = 7;
const DRIFT_MIN_DAYS: usize = 14;
const DRIFT_MAJOR_OVERRIDE: usize = 3;
const DRIFT_SPAN_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub minor_days: u32,
    pub major_days: u32,
    pub overtrading_days: u32,
}

pub fn violation_counts(days: &[DaySummary], baseline: &Baseline) -> ViolationCounts {
    let mut counts = ViolationCounts {
        minor_days: 0,
        major_days: 0,
        overtrading_days: 0,
    };
    for day in days {
        match day.status {
            Some(RuleStatus::Minor) => counts.minor_days += 1,
            Some(RuleStatus::Major) => counts.major_days += 1,
            _ => {}
        }
        if baseline.is_overtraded(day.trade_count) {
            counts.overtrading_days += 1;
        }
    }
    counts
}

/// Bounce-back behavior after losing days. `percent` stays `None`
/// until at least one red day with a following day exists, so callers
/// can tell "never tested" apart from a real 0%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRate {
    pub red_days: u32,
    pub recovered: u32,
    pub percent: Option<f64>,
}

pub fn recovery_rate(days: &[DaySummary], baseline: &Baseline) -> RecoveryRate {
    let mut red_days = 0u32;
    let mut recovered = 0u32;

    for pair in days.windows(2) {
        let (day, next) = (&pair[0], &pair[1]);
        if !day.is_red() {
            continue;
        }
        red_days += 1;
        if next.followed() && baseline.is_calm(next.trade_count) {
            recovered += 1;
        }
    }

    let percent = if red_days > 0 {
        Some(100.0 * f64::from(recovered) / f64::from(red_days))
    } else {
        None
    };

    RecoveryRate {
        red_days,
        recovered,
        percent,
    }
}

/// A losing day answered with an outsized session on the very next day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossChaseIncident {
    pub date: NaiveDate,
    pub prior_loss: f64,
    pub trade_count: u32,
}

pub fn loss_chase_incidents(days: &[DaySummary], baseline: &Baseline) -> Vec<LossChaseIncident> {
    let mut incidents = Vec::new();
    for pair in days.windows(2) {
        let (day, next) = (&pair[0], &pair[1]);
        if day.is_red() && baseline.is_overtraded(next.trade_count) {
            incidents.push(LossChaseIncident {
                date: next.date,
                prior_loss: day.pnl,
                trade_count: next.trade_count,
            });
        }
    }
    incidents
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevengeTiming {
    SameDay,
    NextDay,
}

impl fmt::Display for RevengeTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevengeTiming::SameDay => write!(f, "same_day"),
            RevengeTiming::NextDay => write!(f, "next_day"),
        }
    }
}

/// Overtrading on (or right after) a day with a major rule break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevengeIncident {
    pub date: NaiveDate,
    pub timing: RevengeTiming,
    pub trade_count: u32,
}

pub fn revenge_incidents(days: &[DaySummary], baseline: &Baseline) -> Vec<RevengeIncident> {
    let mut incidents = Vec::new();
    for (i, day) in days.iter().enumerate() {
        if !day.has_major() {
            continue;
        }
        if baseline.is_overtraded(day.trade_count) {
            incidents.push(RevengeIncident {
                date: day.date,
                timing: RevengeTiming::SameDay,
                trade_count: day.trade_count,
            });
        } else if let Some(next) = days.get(i + 1) {
            if baseline.is_overtraded(next.trade_count) {
                incidents.push(RevengeIncident {
                    date: next.date,
                    timing: RevengeTiming::NextDay,
                    trade_count: next.trade_count,
                });
            }
        }
    }
    incidents
}

/// Week-over-week drift in major violations. The two slices are the
/// last 7 and the 7 before them in the day-ordered view; 3+ major days
/// across a 14+ day span force `worsening` no matter what the
/// comparison says.
pub fn discipline_drift(days: &[DaySummary]) -> TrendDirection {
    let major_days = days.iter().filter(|d| d.has_major()).count();

    let mut drift = TrendDirection::Stable;
    if days.len() >= DRIFT_MIN_DAYS {
        let recent = &days[days.len() - DRIFT_WINDOW..];
        let prior = &days[days.len() - 2 * DRIFT_WINDOW..days.len() - DRIFT_WINDOW];
        let recent_major = recent.iter().filter(|d| d.has_major()).count();
        let prior_major = prior.iter().filter(|d| d.has_major()).count();
        drift = if recent_major > prior_major {
            TrendDirection::Worsening
        } else if recent_major < prior_major {
            TrendDirection::Improving
        } else {
            TrendDirection::Stable
        };
    }

    if major_days >= DRIFT_MAJOR_OVERRIDE && window_span_days(days) >= DRIFT_SPAN_DAYS {
        drift = TrendDirection::Worsening;
    }

    drift
}

fn window_span_days(days: &[DaySummary]) -> i64 {
    match (days.first(), days.last()) {
        (Some(first), Some(last)) => (last.date - first.date).num_days(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::baseline;
    use crate::analytics::normalize::daily_view;
    use crate::models::RuleStatus;
    use crate::test_helpers::{d, day_seq, rec};

    fn days_and_baseline(
        specs: &[(f64, u32, Option<RuleStatus>)],
    ) -> (Vec<DaySummary>, Baseline) {
        let days = daily_view(&day_seq("2025-03-01", specs));
        let b = baseline::compute(&days);
        (days, b)
    }

    const CLEAN: Option<RuleStatus> = Some(RuleStatus::Clean);
    const MINOR: Option<RuleStatus> = Some(RuleStatus::Minor);
    const MAJOR: Option<RuleStatus> = Some(RuleStatus::Major);

    #[test]
    fn counts_violation_days_by_worst_status() {
        let records = vec![
            rec("2025-03-01", 10.0, 3, CLEAN),
            rec("2025-03-01", -5.0, 2, MINOR),
            rec("2025-03-02", -80.0, 4, MAJOR),
            rec("2025-03-03", 20.0, 3, None),
        ];
        let days = daily_view(&records);
        let b = baseline::compute(&days);
        let counts = violation_counts(&days, &b);
        assert_eq!(counts.minor_days, 1);
        assert_eq!(counts.major_days, 1);
    }

    #[test]
    fn counts_overtrading_days_against_threshold() {
        // Baseline 4, threshold 6: two days at or above it.
        let (days, b) = days_and_baseline(&[
            (0.0, 2, CLEAN),
            (0.0, 4, CLEAN),
            (0.0, 6, CLEAN),
            (0.0, 9, CLEAN),
        ]);
        assert_eq!(b.overtrading_threshold, 6.0);
        assert_eq!(violation_counts(&days, &b).overtrading_days, 2);
    }

    #[test]
    fn recovery_not_established_without_red_days() {
        let (days, b) = days_and_baseline(&[(10.0, 3, CLEAN), (5.0, 3, CLEAN)]);
        let rate = recovery_rate(&days, &b);
        assert_eq!(rate.red_days, 0);
        assert_eq!(rate.percent, None);
    }

    #[test]
    fn recovery_ignores_red_day_at_end_of_window() {
        let (days, b) = days_and_baseline(&[(10.0, 3, CLEAN), (-50.0, 3, CLEAN)]);
        assert_eq!(recovery_rate(&days, &b).red_days, 0);
    }

    #[test]
    fn recovery_requires_clean_and_calm_next_day() {
        // Median 4, calm cap 4.8. First red day recovers, second is
        // followed by a clean but frantic day.
        let (days, b) = days_and_baseline(&[
            (-30.0, 4, CLEAN),
            (20.0, 4, CLEAN),
            (-10.0, 4, CLEAN),
            (15.0, 9, CLEAN),
            (5.0, 4, CLEAN),
        ]);
        let rate = recovery_rate(&days, &b);
        assert_eq!(rate.red_days, 2);
        assert_eq!(rate.recovered, 1);
        assert_eq!(rate.percent, Some(50.0));
    }

    #[test]
    fn recovery_fails_on_violation_next_day() {
        let (days, b) = days_and_baseline(&[(-30.0, 4, CLEAN), (20.0, 4, MINOR), (5.0, 4, CLEAN)]);
        let rate = recovery_rate(&days, &b);
        assert_eq!(rate.red_days, 1);
        assert_eq!(rate.recovered, 0);
        assert_eq!(rate.percent, Some(0.0));
    }

    #[test]
    fn loss_chase_dates_the_overtraded_day() {
        // Median 4, threshold 6.
        let (days, b) = days_and_baseline(&[
            (-120.0, 4, CLEAN),
            (30.0, 8, CLEAN),
            (10.0, 4, CLEAN),
            (-15.0, 4, CLEAN),
            (0.0, 4, CLEAN),
        ]);
        let incidents = loss_chase_incidents(&days, &b);
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].date, d("2025-03-02"));
        assert_eq!(incidents[0].prior_loss, -120.0);
        assert_eq!(incidents[0].trade_count, 8);
    }

    #[test]
    fn revenge_same_day_wins_over_next_day() {
        // Major day already over threshold: one same_day incident only,
        // even though the next day is also frantic.
        let (days, b) = days_and_baseline(&[
            (0.0, 4, CLEAN),
            (-60.0, 9, MAJOR),
            (10.0, 9, CLEAN),
            (0.0, 4, CLEAN),
            (0.0, 4, CLEAN),
        ]);
        let incidents = revenge_incidents(&days, &b);
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].timing, RevengeTiming::SameDay);
        assert_eq!(incidents[0].date, d("2025-03-02"));
    }

    #[test]
    fn revenge_next_day_when_major_day_was_calm() {
        let (days, b) = days_and_baseline(&[
            (0.0, 4, CLEAN),
            (-60.0, 4, MAJOR),
            (10.0, 9, CLEAN),
            (0.0, 4, CLEAN),
            (0.0, 4, CLEAN),
        ]);
        let incidents = revenge_incidents(&days, &b);
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].timing, RevengeTiming::NextDay);
        assert_eq!(incidents[0].date, d("2025-03-03"));
        assert_eq!(incidents[0].trade_count, 9);
    }

    #[test]
    fn calm_major_day_at_end_emits_nothing() {
        let (days, b) =
            days_and_baseline(&[(0.0, 4, CLEAN), (0.0, 4, CLEAN), (-60.0, 4, MAJOR)]);
        assert!(revenge_incidents(&days, &b).is_empty());
    }

    #[test]
    fn drift_stable_below_fourteen_days() {
        let (days, _) = days_and_baseline(&[
            (0.0, 3, MAJOR),
            (0.0, 3, CLEAN),
            (0.0, 3, CLEAN),
            (0.0, 3, CLEAN),
        ]);
        assert_eq!(discipline_drift(&days), TrendDirection::Stable);
    }

    #[test]
    fn drift_worsening_when_recent_week_has_more_majors() {
        let mut specs = vec![(0.0, 3, CLEAN); 14];
        specs[12] = (0.0, 3, MAJOR);
        let (days, _) = days_and_baseline(&specs);
        assert_eq!(discipline_drift(&days), TrendDirection::Worsening);
    }

    #[test]
    fn drift_improving_when_recent_week_has_fewer_majors() {
        let mut specs = vec![(0.0, 3, CLEAN); 14];
        specs[2] = (0.0, 3, MAJOR);
        let (days, _) = days_and_baseline(&specs);
        assert_eq!(discipline_drift(&days), TrendDirection::Improving);
    }

    #[test]
    fn three_majors_override_an_improving_week() {
        let mut specs = vec![(0.0, 3, CLEAN); 15];
        specs[0] = (0.0, 3, MAJOR);
        specs[1] = (0.0, 3, MAJOR);
        specs[2] = (0.0, 3, MAJOR);
        let (days, _) = days_and_baseline(&specs);
        assert_eq!(discipline_drift(&days), TrendDirection::Worsening);
    }
}
