use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How badly a session broke the trading plan. The wire value for a
/// fully compliant session is `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleStatus {
    #[serde(rename = "NONE")]
    Clean,
    #[serde(rename = "MINOR")]
    Minor,
    #[serde(rename = "MAJOR")]
    Major,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Clean => "NONE",
            RuleStatus::Minor => "MINOR",
            RuleStatus::Major => "MAJOR",
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, RuleStatus::Minor | RuleStatus::Major)
    }

    pub fn from_str_loose(s: &str) -> Option<RuleStatus> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Some(RuleStatus::Clean),
            "MINOR" => Some(RuleStatus::Minor),
            "MAJOR" => Some(RuleStatus::Major),
            _ => None,
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One journaled trading session. A date can carry several sessions
/// (e.g. a morning and an afternoon block); `rule_status` of `None`
/// means the trader never rated the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub trade_count: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub rule_status: Option<RuleStatus>,
    #[serde(default)]
    pub rules_broken: Vec<String>,
}

impl SessionRecord {
    pub fn followed_rules(&self) -> bool {
        self.rule_status == Some(RuleStatus::Clean)
    }

    pub fn violated(&self) -> bool {
        self.rule_status.map(|s| s.is_violation()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_parse_accepts_any_case() {
        assert_eq!(RuleStatus::from_str_loose("major"), Some(RuleStatus::Major));
        assert_eq!(RuleStatus::from_str_loose(" MINOR "), Some(RuleStatus::Minor));
        assert_eq!(RuleStatus::from_str_loose("None"), Some(RuleStatus::Clean));
        assert_eq!(RuleStatus::from_str_loose("catastrophic"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&RuleStatus::Clean).unwrap();
        assert_eq!(json, "\"NONE\"");
        let back: RuleStatus = serde_json::from_str("\"MAJOR\"").unwrap();
        assert_eq!(back, RuleStatus::Major);
    }

    #[test]
    fn record_defaults_fill_missing_fields() {
        let rec: SessionRecord =
            serde_json::from_str(r#"{"date": "2025-03-04", "pnl": -12.5}"#).unwrap();
        assert_eq!(rec.trade_count, 0);
        assert_eq!(rec.rule_status, None);
        assert!(rec.rules_broken.is_empty());
        assert!(!rec.followed_rules());
        assert!(!rec.violated());
    }
}
