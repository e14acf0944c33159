//! satwatch - monitoring companion for Red Hat Satellite sync plans

use clap::Parser;
use env_logger::{Env, Target};

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::{Cli, Commands};
use config::Settings;
use models::ServiceState;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .target(Target::Stderr)
        .init();

    let exit_code = run(cli).await;
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> i32 {
    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            // The check subcommand reports configuration problems as
            // UNKNOWN plugin output; the inspector reports plainly.
            return match cli.command {
                Commands::Check => {
                    println!(
                        "{}: Error initializing application: {err}",
                        ServiceState::Unknown.label()
                    );
                    ServiceState::Unknown.exit_code()
                }
                _ => {
                    eprintln!("Error: {err}");
                    1
                }
            };
        }
    };

    match cli.command {
        Commands::Check => cli::check::run(&settings).await,
        Commands::Plans { format, omit_ok } => {
            match cli::plans::run(&settings, format, omit_ok).await {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("Error: {err}");
                    1
                }
            }
        }
    }
}
