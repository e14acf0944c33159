//! Sync plan listing subcommand.

use chrono::Utc;

use crate::cli::OutputFormat;
use crate::client::{SatelliteApi, SatelliteClient};
use crate::config::Settings;
use crate::error::Result;
use crate::output::{colorize_state, overview_report, table, verbose_report};

/// Run the plans listing subcommand.
pub async fn run(settings: &Settings, format: OutputFormat, omit_ok: bool) -> Result<()> {
    let client = SatelliteClient::new(settings)?;
    let deadline = settings.deadline();

    let mut orgs = client.organizations_with_sync_plans(&deadline).await?;
    orgs.sort_by_name();

    let now = Utc::now();

    match format {
        OutputFormat::Overview => {
            print!("{}", overview_report(&orgs, now));
        }
        OutputFormat::SimpleTable => {
            let rows = table::plan_rows(&orgs, now, omit_ok);
            println!("{}", table::simple_table(&rows));
        }
        OutputFormat::PrettyTable => {
            let rows = table::plan_rows(&orgs, now, omit_ok);
            println!("{}", table::pretty_table(&rows));
        }
        OutputFormat::Verbose => {
            print!("{}", verbose_report(&orgs, now, omit_ok));
        }
    }

    println!(
        "\nOverall state: {} ({} problem sync plans)",
        colorize_state(orgs.service_state(now)),
        orgs.num_problem_plans(now),
    );

    Ok(())
}
