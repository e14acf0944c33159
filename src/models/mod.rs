//! Data model for Red Hat Satellite organizations and sync plans

pub mod datetime;
pub mod nullstring;
pub mod org;
pub mod state;
pub mod syncplan;

/// Keyword used in JSON to represent null. Some Satellite API fields carry
/// the literal keyword in place of omitting the field.
pub const JSON_NULL_KEYWORD: &str = "null";

pub use datetime::{ApiTime, SyncTime};
pub use nullstring::NullString;
pub use org::{Organization, Organizations};
pub use state::ServiceState;
pub use syncplan::{Product, SyncPlan, SyncPlanPermissions, SyncPlans};
