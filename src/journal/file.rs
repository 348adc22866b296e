use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::journal::{JournalError, JournalStore};
use crate::models::{PurchaseEvent, PurchaseKind, RuleStatus, SessionRecord};

/// On-disk journal document:
///
/// ```json
/// {
///   "accounts": {
///     "apex-50k": {
///       "sessions": [
///         {"date": "2025-03-04", "pnl": -80.0, "trade_count": 9,
///          "rule_status": "MAJOR", "rules_broken": ["moved_stop"]}
///       ],
///       "purchases": [
///         {"date": "2025-02-20", "cost": 167.0, "kind": "NEW"}
///       ]
///     }
///   }
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
struct JournalDoc {
    #[serde(default)]
    accounts: HashMap<String, AccountLog>,
}

#[derive(Debug, Default, Deserialize)]
struct AccountLog {
    #[serde(default)]
    sessions: Vec<RawSession>,
    #[serde(default)]
    purchases: Vec<RawPurchase>,
}

// Raw rows keep status and kind as free strings so one odd row cannot
// fail the whole load.
#[derive(Debug, Deserialize)]
struct RawSession {
    date: NaiveDate,
    #[serde(default)]
    pnl: f64,
    #[serde(default)]
    trade_count: u32,
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    losses: u32,
    #[serde(default)]
    rule_status: Option<String>,
    #[serde(default)]
    rules_broken: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPurchase {
    date: NaiveDate,
    #[serde(default)]
    cost: f64,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug)]
pub struct JsonJournal {
    path: PathBuf,
    doc: JournalDoc,
}

impl JsonJournal {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| JournalError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let doc: JournalDoc =
            serde_json::from_str(&raw).map_err(|source| JournalError::Malformed {
                path: path.display().to_string(),
                source,
            })?;
        info!(
            "Loaded journal {} ({} accounts)",
            path.display(),
            doc.accounts.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn accounts(&self) -> Vec<String> {
        let mut names: Vec<String> = self.doc.accounts.keys().cloned().collect();
        names.sort();
        names
    }

    fn account(&self, name: &str) -> Result<&AccountLog, JournalError> {
        self.doc
            .accounts
            .get(name)
            .ok_or_else(|| JournalError::UnknownAccount(name.to_string()))
    }
}

fn to_record(raw: &RawSession) -> SessionRecord {
    let rule_status = raw.rule_status.as_deref().and_then(|s| {
        let parsed = RuleStatus::from_str_loose(s);
        if parsed.is_none() {
            debug!("Unknown rule status '{}' on {}, treating as unrated", s, raw.date);
        }
        parsed
    });

    SessionRecord {
        date: raw.date,
        pnl: raw.pnl,
        trade_count: raw.trade_count,
        wins: raw.wins,
        losses: raw.losses,
        rule_status,
        rules_broken: raw.rules_broken.clone(),
    }
}

fn to_purchase(raw: &RawPurchase) -> PurchaseEvent {
    let kind = raw
        .kind
        .as_deref()
        .and_then(PurchaseKind::from_str_loose)
        .unwrap_or_else(|| {
            debug!("Purchase on {} has no recognizable kind, assuming NEW", raw.date);
            PurchaseKind::New
        });

    PurchaseEvent {
        date: raw.date,
        cost: raw.cost,
        kind,
    }
}

#[async_trait]
impl JournalStore for JsonJournal {
    async fn fetch_sessions(
        &self,
        account: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<SessionRecord>> {
        let log = self.account(account)?;
        let records: Vec<SessionRecord> = log
            .sessions
            .iter()
            .filter(|s| from.map_or(true, |f| s.date >= f) && to.map_or(true, |t| s.date <= t))
            .map(to_record)
            .collect();
        debug!("{}: {} sessions in range", account, records.len());
        Ok(records)
    }

    async fn fetch_purchases(&self, account: &str) -> Result<Vec<PurchaseEvent>> {
        let log = self.account(account)?;
        Ok(log.purchases.iter().map(to_purchase).collect())
    }
}
