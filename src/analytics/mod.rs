pub mod baseline;
pub mod focus;
pub mod normalize;
pub mod patterns;
pub mod purchases;
pub mod report;
pub mod streaks;
pub mod trend;
pub mod triggers;

pub use baseline::Baseline;
pub use focus::{FocusCategory, FocusPlan};
pub use normalize::DaySummary;
pub use patterns::{LossChaseIncident, RecoveryRate, RevengeIncident, ViolationCounts};
pub use purchases::PurchaseSummary;
pub use report::DisciplineReport;
pub use streaks::StreakSummary;
pub use trend::{ScoreLabel, TrendDirection, TrendScore};
pub use triggers::TriggerVerdict;

/// Scoring and coaching both sit out until an account has this many
/// journaled sessions.
pub const MIN_ANALYSIS_RECORDS: usize = 3;
