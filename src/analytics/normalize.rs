use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{RuleStatus, SessionRecord};

/// One calendar day of journaled activity, aggregated across however
/// many sessions were logged on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub pnl: f64,
    pub trade_count: u32,
    pub wins: u32,
    pub losses: u32,
    /// Worst status logged that day. `None` when the day had at least
    /// one unrated session and no violations.
    pub status: Option<RuleStatus>,
    pub rules_broken: Vec<String>,
}

impl DaySummary {
    pub fn followed(&self) -> bool {
        self.status == Some(RuleStatus::Clean)
    }

    pub fn is_red(&self) -> bool {
        self.pnl < 0.0
    }

    pub fn has_major(&self) -> bool {
        self.status == Some(RuleStatus::Major)
    }
}

/// Records sorted oldest-first. The sort is stable, so sessions logged
/// on the same date keep their journal order.
pub fn chronological(records: &[SessionRecord]) -> Vec<SessionRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);
    sorted
}

/// Collapses records into one `DaySummary` per date, oldest first.
pub fn daily_view(records: &[SessionRecord]) -> Vec<DaySummary> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&SessionRecord>> = BTreeMap::new();
    for r in records {
        by_date.entry(r.date).or_default().push(r);
    }

    by_date
        .into_iter()
        .map(|(date, sessions)| summarize_day(date, &sessions))
        .collect()
}

fn summarize_day(date: NaiveDate, sessions: &[&SessionRecord]) -> DaySummary {
    let mut day = DaySummary {
        date,
        pnl: 0.0,
        trade_count: 0,
        wins: 0,
        losses: 0,
        status: None,
        rules_broken: Vec::new(),
    };

    let mut any_minor = false;
    let mut any_major = false;
    let mut any_unrated = false;

    for s in sessions {
        day.pnl += s.pnl;
        day.trade_count += s.trade_count;
        day.wins += s.wins;
        day.losses += s.losses;

        match s.rule_status {
            Some(RuleStatus::Major) => any_major = true,
            Some(RuleStatus::Minor) => any_minor = true,
            Some(RuleStatus::Clean) => {}
            None => any_unrated = true,
        }

        for rule in &s.rules_broken {
            if !day.rules_broken.contains(rule) {
                day.rules_broken.push(rule.clone());
            }
        }
    }

    day.status = if any_major {
        Some(RuleStatus::Major)
    } else if any_minor {
        Some(RuleStatus::Minor)
    } else if any_unrated {
        None
    } else {
        Some(RuleStatus::Clean)
    };

    day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{d, rec, rec_with_rules};

    #[test]
    fn sorts_stable_by_date() {
        let records = vec![
            rec("2025-03-05", 50.0, 4, Some(RuleStatus::Clean)),
            rec("2025-03-03", -20.0, 2, Some(RuleStatus::Minor)),
            rec("2025-03-05", 10.0, 1, Some(RuleStatus::Clean)),
        ];
        let sorted = chronological(&records);
        assert_eq!(sorted[0].date, d("2025-03-03"));
        assert_eq!(sorted[1].pnl, 50.0);
        assert_eq!(sorted[2].pnl, 10.0);
    }

    #[test]
    fn groups_sessions_into_days() {
        let records = vec![
            rec("2025-03-03", -20.0, 2, Some(RuleStatus::Clean)),
            rec("2025-03-03", 35.0, 3, Some(RuleStatus::Clean)),
            rec("2025-03-04", 10.0, 1, Some(RuleStatus::Clean)),
        ];
        let days = daily_view(&records);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].pnl, 15.0);
        assert_eq!(days[0].trade_count, 5);
        assert_eq!(days[1].date, d("2025-03-04"));
    }

    #[test]
    fn day_status_is_worst_of_the_day() {
        let records = vec![
            rec("2025-03-03", 0.0, 1, Some(RuleStatus::Clean)),
            rec("2025-03-03", 0.0, 1, Some(RuleStatus::Major)),
            rec("2025-03-03", 0.0, 1, Some(RuleStatus::Minor)),
        ];
        let days = daily_view(&records);
        assert_eq!(days[0].status, Some(RuleStatus::Major));
    }

    #[test]
    fn unrated_session_blocks_clean_status() {
        let records = vec![
            rec("2025-03-03", 0.0, 1, Some(RuleStatus::Clean)),
            rec("2025-03-03", 0.0, 1, None),
        ];
        let days = daily_view(&records);
        assert_eq!(days[0].status, None);
        assert!(!days[0].followed());
    }

    #[test]
    fn unrated_does_not_mask_violations() {
        let records = vec![
            rec("2025-03-03", 0.0, 1, None),
            rec("2025-03-03", 0.0, 1, Some(RuleStatus::Minor)),
        ];
        let days = daily_view(&records);
        assert_eq!(days[0].status, Some(RuleStatus::Minor));
    }

    #[test]
    fn broken_rules_dedupe_in_first_seen_order() {
        let records = vec![
            rec_with_rules("2025-03-03", -50.0, 6, Some(RuleStatus::Major), &["oversized", "no_stop"]),
            rec_with_rules("2025-03-03", -10.0, 2, Some(RuleStatus::Minor), &["no_stop", "late_entry"]),
        ];
        let days = daily_view(&records);
        assert_eq!(days[0].rules_broken, vec!["oversized", "no_stop", "late_entry"]);
    }

    #[test]
    fn empty_input_gives_empty_views() {
        assert!(chronological(&[]).is_empty());
        assert!(daily_view(&[]).is_empty());
    }
}
