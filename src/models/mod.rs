pub mod purchase;
pub mod session;

pub use purchase::{PurchaseEvent, PurchaseKind};
pub use session::{RuleStatus, SessionRecord};
