use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::journal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Journal
    pub journal_path: String,
    pub account: String,

    // Analysis window
    pub window_days: i64,
    /// Pin the "today" used to bound windows, for reproducible reports
    /// over historical data. Unset means the current ET trading date.
    pub reference_date: Option<NaiveDate>,

    // Output
    pub report_dir: String,
    pub export_json: bool,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            journal_path: env("JOURNAL_PATH", "journal.json"),
            account: env("JOURNAL_ACCOUNT", "default"),
            window_days: env("WINDOW_DAYS", "90").parse().unwrap_or(90),
            reference_date: std::env::var("REFERENCE_DATE")
                .ok()
                .and_then(|s| s.parse().ok()),
            report_dir: env("REPORT_DIR", "reports"),
            export_json: env("EXPORT_JSON", "true").parse().unwrap_or(true),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    /// Resolve the analysis window as `(from, reference)`. The reference
    /// date is the pinned one when set, otherwise the trading date for
    /// `utc_now`. A `window_days` of zero means full history, so `from`
    /// comes back `None`.
    pub fn window(&self, utc_now: Option<DateTime<Utc>>) -> (Option<NaiveDate>, NaiveDate) {
        let utc_now = utc_now.unwrap_or_else(Utc::now);
        let reference = self
            .reference_date
            .unwrap_or_else(|| journal::trading_date(utc_now));
        let from = (self.window_days > 0).then(|| reference - Duration::days(self.window_days));
        (from, reference)
    }
}
