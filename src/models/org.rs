//! Organization records and collection-level state roll-ups.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::datetime::ApiTime;
use super::nullstring::NullString;
use super::state::ServiceState;
use super::syncplan::SyncPlans;

/// An isolated collection of systems, content and other functionality
/// within a Satellite deployment.
///
/// `sync_plans` is not part of the wire payload; the aggregator attaches
/// the retrieved plans after construction.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub id: i64,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: NullString,

    #[serde(default)]
    pub created_at: ApiTime,

    #[serde(default)]
    pub updated_at: ApiTime,

    #[serde(skip)]
    pub sync_plans: SyncPlans,
}

/// A collection of Satellite organizations.
#[derive(Debug, Clone, Default)]
pub struct Organizations(Vec<Organization>);

impl Organizations {
    pub fn new(orgs: Vec<Organization>) -> Self {
        Organizations(orgs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Organization> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Organization> {
        self.0.iter_mut()
    }

    pub fn as_slice(&self) -> &[Organization] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sort_by_name(&mut self) {
        self.0.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn num_orgs(&self) -> usize {
        self.0.len()
    }

    pub fn num_plans(&self) -> usize {
        self.0.iter().map(|org| org.sync_plans.total()).sum()
    }

    pub fn num_plans_enabled(&self) -> usize {
        self.0.iter().map(|org| org.sync_plans.num_enabled()).sum()
    }

    pub fn num_plans_disabled(&self) -> usize {
        self.0.iter().map(|org| org.sync_plans.num_disabled()).sum()
    }

    pub fn num_plans_stuck(&self, now: DateTime<Utc>) -> usize {
        self.0.iter().map(|org| org.sync_plans.num_stuck(now)).sum()
    }

    /// Number of sync plans across all organizations with a non-OK state.
    /// Stuck plans are the only symptom evaluated today; additional
    /// symptoms would be folded in here.
    pub fn num_problem_plans(&self, now: DateTime<Utc>) -> usize {
        self.num_plans_stuck(now)
    }

    /// Indicates whether any organization in the collection was evaluated
    /// to a CRITICAL state.
    ///
    /// Policy stub: a days-stuck threshold check may promote WARNING to
    /// CRITICAL in the future.
    pub fn has_critical_state(&self) -> bool {
        false
    }

    pub fn has_warning_state(&self, now: DateTime<Utc>) -> bool {
        !self.has_critical_state() && self.num_problem_plans(now) > 0
    }

    pub fn is_ok_state(&self, now: DateTime<Utc>) -> bool {
        !self.has_warning_state(now) && !self.has_critical_state()
    }

    /// Service check state for the collection's evaluation results, with
    /// precedence CRITICAL > WARNING > OK > UNKNOWN.
    pub fn service_state(&self, now: DateTime<Utc>) -> ServiceState {
        match () {
            _ if self.has_critical_state() => ServiceState::Critical,
            _ if self.has_warning_state(now) => ServiceState::Warning,
            _ if self.is_ok_state(now) => ServiceState::Ok,
            _ => ServiceState::Unknown,
        }
    }
}

impl From<Vec<Organization>> for Organizations {
    fn from(orgs: Vec<Organization>) -> Self {
        Organizations(orgs)
    }
}

impl<'a> IntoIterator for &'a Organizations {
    type Item = &'a Organization;
    type IntoIter = std::slice::Iter<'a, Organization>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::syncplan::{SyncPlan, SyncPlanPermissions};
    use crate::models::{ApiTime, SyncTime};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn plan(id: i64, enabled: bool, next_sync: Option<DateTime<Utc>>) -> SyncPlan {
        SyncPlan {
            id,
            name: format!("plan-{id}"),
            interval: "daily".to_string(),
            enabled,
            original_sync_date: SyncTime::default(),
            next_sync: next_sync.map(SyncTime::from).unwrap_or_default(),
            created_at: ApiTime::default(),
            updated_at: ApiTime::default(),
            cron_expression: NullString::default(),
            description: NullString::default(),
            recurring_logic_id: 0,
            organization_id: 1,
            organization_name: String::new(),
            organization_label: String::new(),
            organization_title: String::new(),
            products: Vec::new(),
            permissions: SyncPlanPermissions::default(),
        }
    }

    fn org(id: i64, name: &str, plans: Vec<SyncPlan>) -> Organization {
        Organization {
            id,
            label: name.to_string(),
            name: name.to_string(),
            title: name.to_string(),
            description: NullString::default(),
            created_at: ApiTime::default(),
            updated_at: ApiTime::default(),
            sync_plans: SyncPlans::new(plans),
        }
    }

    // Two orgs, each with an enabled plan scheduled in the future, an
    // enabled plan 10 minutes past due and a disabled plan.
    fn fixture() -> Organizations {
        let make_plans = || {
            vec![
                plan(1, true, Some(now() + Duration::hours(1))),
                plan(2, true, Some(now() - Duration::minutes(10))),
                plan(3, false, None),
            ]
        };

        Organizations::new(vec![
            org(1, "Engineering", make_plans()),
            org(2, "Operations", make_plans()),
        ])
    }

    #[test]
    fn test_rollup_counters() {
        let orgs = fixture();
        assert_eq!(orgs.num_orgs(), 2);
        assert_eq!(orgs.num_plans(), 6);
        assert_eq!(orgs.num_plans_enabled(), 4);
        assert_eq!(orgs.num_plans_disabled(), 2);
        assert_eq!(orgs.num_plans_stuck(now()), 2);
        assert_eq!(orgs.num_problem_plans(now()), 2);
    }

    #[test]
    fn test_problem_plans_roll_up_to_warning() {
        let orgs = fixture();
        assert!(orgs.has_warning_state(now()));
        assert!(!orgs.is_ok_state(now()));
        assert_eq!(orgs.service_state(now()), ServiceState::Warning);
        assert_eq!(orgs.service_state(now()).exit_code(), 1);
    }

    #[test]
    fn test_healthy_collection_is_ok() {
        let orgs = Organizations::new(vec![org(
            1,
            "Engineering",
            vec![
                plan(1, true, Some(now() + Duration::hours(1))),
                plan(2, false, None),
            ],
        )]);

        assert!(orgs.is_ok_state(now()));
        assert_eq!(orgs.service_state(now()), ServiceState::Ok);
    }

    #[test]
    fn test_empty_collection_is_ok() {
        let orgs = Organizations::default();
        assert_eq!(orgs.service_state(now()), ServiceState::Ok);
    }

    #[test]
    fn test_critical_state_stays_unreachable() {
        // The days-stuck threshold promotion is a policy stub; until it
        // is implemented no collection evaluates to CRITICAL.
        let orgs = Organizations::new(vec![org(
            1,
            "Engineering",
            vec![plan(1, true, Some(now() - Duration::days(365)))],
        )]);

        assert!(!orgs.has_critical_state());
        assert_eq!(orgs.service_state(now()), ServiceState::Warning);
    }

    #[test]
    fn test_sort_by_name() {
        let mut orgs = Organizations::new(vec![
            org(2, "Operations", Vec::new()),
            org(1, "Engineering", Vec::new()),
        ]);
        orgs.sort_by_name();
        let names: Vec<&str> = orgs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Engineering", "Operations"]);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let payload = r#"{
            "id": 3,
            "label": "eng",
            "name": "Engineering",
            "title": "Engineering",
            "description": null,
            "created_at": "2024-05-09 21:14:51 UTC",
            "updated_at": "2024-05-09 21:14:51 UTC",
            "ancestry": null
        }"#;

        let org: Organization = serde_json::from_str(payload).unwrap();
        assert_eq!(org.id, 3);
        assert!(org.description.is_empty());
        assert!(org.sync_plans.is_empty());
    }
}
