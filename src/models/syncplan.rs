//! Sync plan records and the stuck-state classification logic.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::datetime::{ApiTime, SyncTime};
use super::nullstring::NullString;

/// Grace time in minutes between the next scheduled run of a sync plan and
/// the current time. Other tasks may conflict with the sync plan's
/// execution and hold it in a pending state for longer than expected; the
/// grace window absorbs that scheduler jitter before a past-due plan is
/// flagged as stuck.
pub const SYNC_TIME_GRACE_MINUTES: i64 = 5;

/// A Satellite sync plan. Sync plans schedule execution of content
/// synchronization for an organization.
///
/// Owning-organization fields are not part of the wire payload; they are
/// annotated onto the record after decoding for reporting convenience.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncPlan {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    /// Opaque schedule label, e.g. "hourly", "daily" or "weekly".
    #[serde(default)]
    pub interval: String,

    #[serde(default)]
    pub enabled: bool,

    /// Fallback reference instant used when `next_sync` is absent.
    #[serde(rename = "sync_date", default)]
    pub original_sync_date: SyncTime,

    /// Next scheduled run. Absent means "not scheduled".
    #[serde(default)]
    pub next_sync: SyncTime,

    #[serde(default)]
    pub created_at: ApiTime,

    #[serde(default)]
    pub updated_at: ApiTime,

    #[serde(default)]
    pub cron_expression: NullString,

    #[serde(default)]
    pub description: NullString,

    #[serde(rename = "foreman_tasks_recurring_logic_id", default)]
    pub recurring_logic_id: i64,

    #[serde(default)]
    pub organization_id: i64,

    #[serde(skip)]
    pub organization_name: String,

    #[serde(skip)]
    pub organization_label: String,

    #[serde(skip)]
    pub organization_title: String,

    /// Products attached to the plan. Informational, not evaluated.
    #[serde(default)]
    pub products: Vec<Product>,

    /// Permissions of the querying user. Informational, not enforced.
    #[serde(default)]
    pub permissions: SyncPlanPermissions,
}

/// Permissions that the querying API user has for interacting with sync
/// plans.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SyncPlanPermissions {
    #[serde(default)]
    pub destroy_sync_plans: bool,

    #[serde(default)]
    pub edit_sync_plans: bool,

    #[serde(default)]
    pub view_sync_plans: bool,
}

/// A collection of content repositories grouped under a sync plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub cp_id: String,

    #[serde(default)]
    pub sync_state: String,

    #[serde(rename = "last_sync_words", default)]
    pub last_sync_text: String,

    #[serde(default)]
    pub last_sync: ApiTime,

    #[serde(default)]
    pub description: NullString,

    #[serde(default)]
    pub repository_count: i64,
}

impl SyncPlan {
    /// Indicates whether (after any applied grace time) the sync plan is
    /// in a stuck state: enabled with a next scheduled run in the past.
    ///
    /// Disabled plans are never stuck. An enabled plan whose `next_sync`
    /// is the zero instant has dropped off the scheduler entirely and is
    /// treated as stuck.
    pub fn is_stuck(&self, now: DateTime<Utc>) -> bool {
        if !self.enabled {
            return false;
        }

        match self.next_sync.time() {
            Some(next_sync) => {
                let diff = now.signed_duration_since(next_sync);
                diff > Duration::minutes(SYNC_TIME_GRACE_MINUTES)
            }
            None => true,
        }
    }

    /// Indicates whether any problems have been identified with this sync
    /// plan. Stuck plans are the only problem symptom evaluated today.
    pub fn is_ok_state(&self, now: DateTime<Utc>) -> bool {
        !self.is_stuck(now)
    }

    /// How many whole days the sync plan has been in a stuck state.
    /// Never negative; clock skew clamps to zero. A stuck plan with
    /// neither a next sync nor an original sync date reports zero days
    /// (displayed as `<1d`) since there is no reference instant to
    /// count from.
    pub fn days_stuck(&self, now: DateTime<Utc>) -> i64 {
        if !self.enabled {
            return 0;
        }

        // Fall back to the original sync date when the next scheduled run
        // is the zero instant.
        let basis = match self.next_sync.time() {
            Some(t) => t,
            None => match self.original_sync_date.time() {
                Some(t) => t,
                None => return 0,
            },
        };

        let hours = now.signed_duration_since(basis).num_hours();
        (hours / 24).max(0)
    }

    /// Human readable indication of how many days the plan has been
    /// stuck: `N/A` when the plan is OK, `<1d` below one whole day.
    pub fn days_stuck_hr(&self, now: DateTime<Utc>) -> String {
        if self.is_ok_state(now) {
            return "N/A".to_string();
        }

        match self.days_stuck(now) {
            0 => "<1d".to_string(),
            days => days.to_string(),
        }
    }

    /// Display friendly version of the next scheduled sync time.
    pub fn next_sync_display(&self) -> String {
        self.next_sync.to_string()
    }
}

/// A collection of Satellite sync plans.
#[derive(Debug, Clone, Default)]
pub struct SyncPlans(Vec<SyncPlan>);

impl SyncPlans {
    pub fn new(plans: Vec<SyncPlan>) -> Self {
        SyncPlans(plans)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyncPlan> {
        self.0.iter()
    }

    pub fn extend(&mut self, other: SyncPlans) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> usize {
        self.0.len()
    }

    pub fn num_enabled(&self) -> usize {
        self.0.iter().filter(|plan| plan.enabled).count()
    }

    pub fn num_disabled(&self) -> usize {
        self.0.iter().filter(|plan| !plan.enabled).count()
    }

    pub fn num_stuck(&self, now: DateTime<Utc>) -> usize {
        self.0.iter().filter(|plan| plan.is_stuck(now)).count()
    }

    /// Number of sync plans with a non-OK state. Stuck plans are the only
    /// symptom today; this keeps the "any problems" question in one place
    /// should the symptom list grow.
    pub fn num_problem_plans(&self, now: DateTime<Utc>) -> usize {
        self.num_stuck(now)
    }

    pub fn is_ok_state(&self, now: DateTime<Utc>) -> bool {
        self.0.iter().all(|plan| plan.is_ok_state(now))
    }

    /// Plans from this collection in an enabled state.
    pub fn enabled(&self) -> SyncPlans {
        SyncPlans(self.0.iter().filter(|p| p.enabled).cloned().collect())
    }

    /// Plans from this collection in a disabled state.
    pub fn disabled(&self) -> SyncPlans {
        SyncPlans(self.0.iter().filter(|p| !p.enabled).cloned().collect())
    }

    /// Plans from this collection in a stuck state.
    pub fn stuck(&self, now: DateTime<Utc>) -> SyncPlans {
        SyncPlans(self.0.iter().filter(|p| p.is_stuck(now)).cloned().collect())
    }

    pub fn sort_by_name(&mut self) {
        self.0.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

impl From<Vec<SyncPlan>> for SyncPlans {
    fn from(plans: Vec<SyncPlan>) -> Self {
        SyncPlans(plans)
    }
}

impl<'a> IntoIterator for &'a SyncPlans {
    type Item = &'a SyncPlan;
    type IntoIter = std::slice::Iter<'a, SyncPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
