use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use discipline_engine::journal::{JournalError, JournalStore};
use discipline_engine::models::{PurchaseEvent, PurchaseKind, RuleStatus, SessionRecord};

pub fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn session(date: &str, pnl: f64, trade_count: u32, status: Option<RuleStatus>) -> SessionRecord {
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

pub fn violation(
    date: &str,
    pnl: f64,
    trade_count: u32,
    status: RuleStatus,
    rules: &[&str],
) -> SessionRecord {
    let mut record = session(date, pnl, trade_count, Some(status));
    record.rules_broken = rules.iter().map(|r| r.to_string()).collect();
    record
}

pub fn purchase(date: &str, cost: f64, kind: PurchaseKind) -> PurchaseEvent {
    PurchaseEvent {
        date: d(date),
        cost,
        kind,
    }
}

/// In-memory store standing in for the JSON journal file.
pub struct MemoryJournal {
    pub account: String,
    pub sessions: Vec<SessionRecord>,
    pub purchases: Vec<PurchaseEvent>,
}

#[async_trait]
impl JournalStore for MemoryJournal {
    async fn fetch_sessions(
        &self,
        account: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<SessionRecord>> {
        if account != self.account {
            return Err(JournalError::UnknownAccount(account.to_string()).into());
        }
        Ok(self
            .sessions
            .iter()
            .filter(|s| from.map_or(true, |f| s.date >= f) && to.map_or(true, |t| s.date <= t))
            .cloned()
            .collect())
    }

    async fn fetch_purchases(&self, account: &str) -> Result<Vec<PurchaseEvent>> {
        if account != self.account {
            return Err(JournalError::UnknownAccount(account.to_string()).into());
        }
        Ok(self.purchases.clone())
    }
}
