use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::SessionRecord;

/// Outcome of the broken-rule tally across violation sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerVerdict {
    NoData,
    NoViolations,
    Tallied {
        /// `None` when violations were logged without naming a rule.
        trigger: Option<String>,
        count: u32,
        break_sessions: u32,
    },
}

/// Most frequent rule tag across MINOR/MAJOR sessions. Ties go to the
/// tag whose latest occurrence is more recent; a residual tie falls to
/// the alphabetically first tag, which keeps reruns identical.
pub fn most_common_trigger(records: &[SessionRecord]) -> TriggerVerdict {
    if records.is_empty() {
        return TriggerVerdict::NoData;
    }

    let violations: Vec<&SessionRecord> = records.iter().filter(|r| r.violated()).collect();
    if violations.is_empty() {
        return TriggerVerdict::NoViolations;
    }

    let mut tally: BTreeMap<&str, (u32, NaiveDate)> = BTreeMap::new();
    for r in &violations {
        for rule in &r.rules_broken {
            let entry = tally.entry(rule.as_str()).or_insert((0, r.date));
            entry.0 += 1;
            if r.date > entry.1 {
                entry.1 = r.date;
            }
        }
    }

    let mut winner: Option<(&str, u32, NaiveDate)> = None;
    for (rule, &(count, last_seen)) in &tally {
        let better = match winner {
            None => true,
            Some((_, best_count, best_seen)) => {
                count > best_count || (count == best_count && last_seen > best_seen)
            }
        };
        if better {
            winner = Some((rule, count, last_seen));
        }
    }

    let break_sessions = violations.len() as u32;
    match winner {
        Some((rule, count, _)) => TriggerVerdict::Tallied {
            trigger: Some(rule.to_string()),
            count,
            break_sessions,
        },
        None => TriggerVerdict::Tallied {
            trigger: None,
            count: 0,
            break_sessions,
        },
    }
}
