use chrono::{Duration, NaiveDate};

use crate::config::Config;
use crate::models::{PurchaseEvent, PurchaseKind, RuleStatus, SessionRecord};

pub fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// One session record with wins/losses split evenly from the count.
pub fn rec(date: &str, pnl: f64, trade_count: u32, status: Option<RuleStatus>) -> SessionRecord {
    SessionRecord {
        date: d(date),
        pnl,
        trade_count,
        wins: trade_count / 2,
        losses: trade_count - trade_count / 2,
        rule_status: status,
        rules_broken: Vec::new(),
    }
}

pub fn rec_with_rules(
    date: &str,
    pnl: f64,
    trade_count: u32,
    status: Option<RuleStatus>,
    rules: &[&str],
) -> SessionRecord {
    let mut record = rec(date, pnl, trade_count, status);
    record.rules_broken = rules.iter().map(|r| r.to_string()).collect();
    record
}

/// Records on consecutive dates starting at `start`, one per
/// (pnl, trade_count, status) tuple.
pub fn day_seq(start: &str, specs: &[(f64, u32, Option<RuleStatus>)]) -> Vec<SessionRecord> {
    let base = d(start);
    specs
        .iter()
        .enumerate()
        .map(|(i, &(pnl, trade_count, status))| SessionRecord {
            date: base + Duration::days(i as i64),
            pnl,
            trade_count,
            wins: trade_count / 2,
            losses: trade_count - trade_count / 2,
            rule_status: status,
            rules_broken: Vec::new(),
        })
        .collect()
}

pub fn purchase(date: &str, cost: f64, kind: PurchaseKind) -> PurchaseEvent {
    PurchaseEvent {
        date: d(date),
        cost,
        kind,
    }
}

/// A Config for tests that reads nothing from the environment.
pub fn default_test_config() -> Config {
    Config {
        journal_path: "journal.json".to_string(),
        account: "test".to_string(),
        window_days: 90,
        reference_date: Some(d("2025-03-31")),
        report_dir: std::env::temp_dir()
            .join("discipline_engine_test")
            .to_string_lossy()
            .to_string(),
        export_json: false,
        log_level: "ERROR".to_string(),
    }
}
