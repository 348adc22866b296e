use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PurchaseKind {
    New,
    Reset,
    Retry,
}

impl PurchaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseKind::New => "NEW",
            PurchaseKind::Reset => "RESET",
            PurchaseKind::Retry => "RETRY",
        }
    }

    /// RESET and RETRY both mean the trader paid to restart a blown
    /// evaluation, so they count the same everywhere.
    pub fn is_reset(&self) -> bool {
        matches!(self, PurchaseKind::Reset | PurchaseKind::Retry)
    }

    pub fn from_str_loose(s: &str) -> Option<PurchaseKind> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEW" => Some(PurchaseKind::New),
            "RESET" => Some(PurchaseKind::Reset),
            "RETRY" => Some(PurchaseKind::Retry),
            _ => None,
        }
    }
}

impl fmt::Display for PurchaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseEvent {
    pub date: NaiveDate,
    #[serde(default)]
    pub cost: f64,
    pub kind: PurchaseKind,
}
