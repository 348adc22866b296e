pub mod file;

pub use file::JsonJournal;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::US::Eastern;
use thiserror::Error;

use crate::models::{PurchaseEvent, SessionRecord};

/// Where session and purchase history comes from. The engine only ever
/// reads; writing journals is someone else's job.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Session records for one account, bounded inclusively by the
    /// optional dates.
    async fn fetch_sessions(
        &self,
        account: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<SessionRecord>>;

    /// The account's full purchase history, oldest first.
    async fn fetch_purchases(&self, account: &str) -> Result<Vec<PurchaseEvent>>;
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal file {path} could not be read: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("journal file {path} is not valid JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("account '{0}' not found in journal")]
    UnknownAccount(String),
}

/// The trading date a wall-clock instant belongs to. Futures sessions
/// roll at 17:00 ET, so an evening session counts toward the next
/// calendar date.
pub fn trading_date(now: DateTime<Utc>) -> NaiveDate {
    let et = now.with_timezone(&Eastern);
    if et.hour() >= 17 {
        et.date_naive() + Duration::days(1)
    } else {
        et.date_naive()
    }
}
