//! Monitoring plugin subcommand.
//!
//! Emits a one-line service summary with perfdata counters, a
//! per-organization long report, and maps the evaluated state to the
//! conventional plugin exit code.

use chrono::Utc;

use crate::client::{SatelliteApi, SatelliteClient};
use crate::config::Settings;
use crate::models::ServiceState;
use crate::output::{perfdata, verbose_report};

/// Run the check subcommand, returning the process exit code.
pub async fn run(settings: &Settings) -> i32 {
    let client = match SatelliteClient::new(settings) {
        Ok(client) => client,
        Err(err) => {
            println!(
                "{}: Error initializing API client: {err}",
                ServiceState::Unknown.label()
            );
            return ServiceState::Unknown.exit_code();
        }
    };

    let deadline = settings.deadline();
    let orgs = match client.organizations_with_sync_plans(&deadline).await {
        Ok(orgs) => orgs,
        Err(err) => {
            println!(
                "{}: Error retrieving Red Hat Satellite sync plans: {err}",
                ServiceState::Critical.label()
            );
            return ServiceState::Critical.exit_code();
        }
    };

    let now = Utc::now();
    let state = orgs.service_state(now);

    let summary = if orgs.is_ok_state(now) {
        format!(
            "No sync plans with non-OK status detected for {} (evaluated {} orgs, {} sync plans)",
            settings.server,
            orgs.num_orgs(),
            orgs.num_plans(),
        )
    } else {
        format!(
            "{} problem sync plans detected for {} (evaluated {} orgs, {} sync plans)",
            orgs.num_problem_plans(now),
            settings.server,
            orgs.num_orgs(),
            orgs.num_plans(),
        )
    };

    println!(
        "{}: {summary} | {}",
        state.label(),
        perfdata::render(&orgs, now)
    );

    // Long output: the per-organization report. Without --verbose only
    // problem plans are listed.
    let report = verbose_report(&orgs, now, !settings.verbose);
    if !report.is_empty() {
        print!("{report}");
    }

    state.exit_code()
}
