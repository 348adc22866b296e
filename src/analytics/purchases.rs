use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::PurchaseEvent;

pub const PURCHASE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub spend_30d: f64,
    pub spend_lifetime: f64,
    pub resets_30d: u32,
}

/// Rolls up the full purchase history. Only the trailing 30 days
/// (relative to `reference`) feed the windowed figures.
pub fn purchase_summary(events: &[PurchaseEvent], reference: NaiveDate) -> PurchaseSummary {
    let cutoff = reference - Duration::days(PURCHASE_WINDOW_DAYS);
    let mut summary = PurchaseSummary::default();

    for event in events {
        summary.spend_lifetime += event.cost;
        if event.date >= cutoff {
            summary.spend_30d += event.cost;
            if event.kind.is_reset() {
                summary.resets_30d += 1;
            }
        }
    }

    summary
}
