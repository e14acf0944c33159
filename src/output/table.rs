//! Table output formatting

use chrono::{DateTime, Utc};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::models::Organizations;

/// One sync plan row in table output.
#[derive(Tabled)]
pub struct PlanRow {
    #[tabled(rename = "ORG")]
    org: String,

    #[tabled(rename = "NAME")]
    name: String,

    #[tabled(rename = "INTERVAL")]
    interval: String,

    #[tabled(rename = "ENABLED")]
    enabled: String,

    #[tabled(rename = "NEXT SYNC")]
    next_sync: String,

    #[tabled(rename = "DAYS STUCK")]
    days_stuck: String,

    #[tabled(rename = "STATUS")]
    status: String,
}

/// Flatten the evaluated collection into display rows, optionally
/// limited to plans in a non-OK state.
pub fn plan_rows(orgs: &Organizations, now: DateTime<Utc>, omit_ok: bool) -> Vec<PlanRow> {
    let mut rows = Vec::with_capacity(orgs.num_plans());

    for org in orgs {
        for plan in &org.sync_plans {
            if omit_ok && plan.is_ok_state(now) {
                continue;
            }

            rows.push(PlanRow {
                org: org.name.clone(),
                name: plan.name.clone(),
                interval: plan.interval.clone(),
                enabled: if plan.enabled { "yes" } else { "no" }.to_string(),
                next_sync: plan.next_sync_display(),
                days_stuck: plan.days_stuck_hr(now),
                status: if plan.is_ok_state(now) { "OK" } else { "STUCK" }.to_string(),
            });
        }
    }

    rows
}

/// Format rows as a plain aligned text table.
pub fn simple_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table.with(Style::ascii());

    table.to_string()
}

/// Format rows as a decorated table with a centered header.
pub fn pretty_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
