use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::SessionRecord;

pub const BEST_STREAK_WINDOW_DAYS: i64 = 90;

/// Clean-day streaks. `has_data` separates a genuine zero from "never
/// journaled anything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub best: u32,
    pub has_data: bool,
}

/// A date counts toward a streak only when every record on it is
/// explicitly rated clean. Streaks run over logged dates, so weekends
/// and skipped days do not break them.
pub fn streaks(records: &[SessionRecord]) -> StreakSummary {
    let mut followed: BTreeMap<_, bool> = BTreeMap::new();
    for r in records {
        let clean = followed.entry(r.date).or_insert(true);
        *clean = *clean && r.followed_rules();
    }

    let newest = match followed.keys().next_back() {
        Some(date) => *date,
        None => {
            return StreakSummary {
                current: 0,
                best: 0,
                has_data: false,
            }
        }
    };

    let mut current = 0u32;
    for clean in followed.values().rev() {
        if !clean {
            break;
        }
        current += 1;
    }

    // Best run inside the trailing 90 days, anchored to the newest
    // logged date so historical windows reproduce.
    let cutoff = newest - Duration::days(BEST_STREAK_WINDOW_DAYS);
    let mut best = 0u32;
    let mut run = 0u32;
    for (date, clean) in &followed {
        if *date < cutoff {
            continue;
        }
        if *clean {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }

    StreakSummary {
        current,
        best,
        has_data: true,
    }
}
