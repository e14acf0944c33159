//! Report rendering for evaluated sync plan collections.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::models::{Organizations, ServiceState};

pub mod perfdata;
pub mod table;

/// State label with conventional monitoring colors for interactive
/// output.
pub fn colorize_state(state: ServiceState) -> String {
    let label = state.label();
    match state {
        ServiceState::Ok => label.green().to_string(),
        ServiceState::Warning => label.yellow().to_string(),
        ServiceState::Critical => label.red().to_string(),
        ServiceState::Unknown => label.dimmed().to_string(),
    }
}

/// High-level listing of organizations and the overall state of sync
/// plans in each. Intentionally light on specifics.
pub fn overview_report(orgs: &Organizations, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} orgs, {} sync plans ({} problems)",
        orgs.num_orgs(),
        orgs.num_plans(),
        orgs.num_problem_plans(now),
    );

    for org in orgs {
        let _ = writeln!(
            output,
            "* {} ({} problems, {} enabled, {} disabled)",
            org.name,
            org.sync_plans.num_stuck(now),
            org.sync_plans.num_enabled(),
            org.sync_plans.num_disabled(),
        );
    }

    output
}

/// Per-organization report of sync plans with their evaluated state.
/// Used as the long output of the `check` subcommand and the `verbose`
/// format of the `plans` subcommand.
pub fn verbose_report(orgs: &Organizations, now: DateTime<Utc>, omit_ok: bool) -> String {
    let mut output = String::new();

    for org in orgs {
        let _ = writeln!(
            output,
            "{} ({} sync plans, {} problems):",
            org.name,
            org.sync_plans.total(),
            org.sync_plans.num_stuck(now),
        );

        for plan in &org.sync_plans {
            if omit_ok && plan.is_ok_state(now) {
                continue;
            }

            let state = if plan.is_ok_state(now) { "OK" } else { "STUCK" };
            let _ = writeln!(
                output,
                "  [{state}] {} (interval: {}, enabled: {}, next sync: {}, days stuck: {})",
                plan.name,
                plan.interval,
                plan.enabled,
                plan.next_sync_display(),
                plan.days_stuck_hr(now),
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ApiTime, NullString, Organization, SyncPlan, SyncPlanPermissions, SyncPlans, SyncTime,
    };
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn fixture() -> Organizations {
        let plan = SyncPlan {
            id: 1,
            name: "nightly".to_string(),
            interval: "daily".to_string(),
            enabled: true,
            original_sync_date: SyncTime::default(),
            next_sync: SyncTime::from(now() - Duration::minutes(20)),
            created_at: ApiTime::default(),
            updated_at: ApiTime::default(),
            cron_expression: NullString::default(),
            description: NullString::default(),
            recurring_logic_id: 0,
            organization_id: 1,
            organization_name: "Engineering".to_string(),
            organization_label: "eng".to_string(),
            organization_title: "Engineering".to_string(),
            products: Vec::new(),
            permissions: SyncPlanPermissions::default(),
        };

        Organizations::new(vec![Organization {
            id: 1,
            label: "eng".to_string(),
            name: "Engineering".to_string(),
            title: "Engineering".to_string(),
            description: NullString::default(),
            created_at: ApiTime::default(),
            updated_at: ApiTime::default(),
            sync_plans: SyncPlans::new(vec![plan]),
        }])
    }

    #[test]
    fn test_overview_report_rolls_up_per_org() {
        let report = overview_report(&fixture(), now());
        assert!(report.contains("1 orgs, 1 sync plans (1 problems)"));
        assert!(report.contains("* Engineering (1 problems, 1 enabled, 0 disabled)"));
    }

    #[test]
    fn test_verbose_report_lists_plan_state() {
        let report = verbose_report(&fixture(), now(), false);
        assert!(report.contains("Engineering (1 sync plans, 1 problems):"));
        assert!(report.contains("[STUCK] nightly"));
        assert!(report.contains("days stuck: <1d"));
    }

    #[test]
    fn test_verbose_report_omit_ok_hides_healthy_plans() {
        let mut orgs = fixture();
        for org in orgs.iter_mut() {
            org.sync_plans = SyncPlans::default();
        }
        let report = verbose_report(&orgs, now(), true);
        assert!(!report.contains("[OK]"));
    }
}
