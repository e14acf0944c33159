//! Performance data metrics for monitoring plugin output.

use chrono::{DateTime, Utc};

use crate::models::Organizations;

/// Render the perfdata counters for the evaluated collection in
/// `label=value` pairs, suitable for appending after the `|` separator
/// of plugin output.
pub fn render(orgs: &Organizations, now: DateTime<Utc>) -> String {
    format!(
        "organizations={} sync_plans_total={} sync_plans_enabled={} \
         sync_plans_disabled={} sync_plans_stuck={} sync_plans_problems={}",
        orgs.num_orgs(),
        orgs.num_plans(),
        orgs.num_plans_enabled(),
        orgs.num_plans_disabled(),
        orgs.num_plans_stuck(now),
        orgs.num_problem_plans(now),
    )
}
