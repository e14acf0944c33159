//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{
    DEFAULT_PER_PAGE, DEFAULT_PORT, DEFAULT_READ_LIMIT, DEFAULT_TIMEOUT_SECONDS, NetworkType,
};

pub mod check;
pub mod plans;

/// satwatch - monitoring companion for Red Hat Satellite sync plans
#[derive(Parser, Debug)]
#[command(name = "satwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// The Satellite server FQDN or IP address
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// The port used by the Satellite server API
    #[arg(long, global = true, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The valid user for the given Satellite server
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// The valid password for the specified user
    #[arg(long, global = true, env = "SATWATCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Custom User-Agent header sent with API requests
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Limit network connections to tcp4 (IPv4-only), tcp6 (IPv6-only)
    /// or auto (either)
    #[arg(long, global = true, value_enum, default_value_t = NetworkType::Auto)]
    pub net_type: NetworkType,

    /// CA certificate used to validate the certificate chain of the
    /// Satellite server
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Trust the server certificate as-is without validation. WARNING:
    /// susceptible to man-in-the-middle attacks
    #[arg(long, global = true)]
    pub trust_cert: bool,

    /// Permit the server to request TLS renegotiation (no effect with
    /// the rustls backend; accepted for compatibility)
    #[arg(long, global = true)]
    pub permit_tls_renegotiation: bool,

    /// Limit in bytes applied when reading response bodies
    #[arg(long, global = true, default_value_t = DEFAULT_READ_LIMIT)]
    pub read_limit: u64,

    /// Number of records requested per page
    #[arg(long, global = true, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Timeout in seconds before the whole retrieval run is abandoned
    #[arg(long, short = 't', global = true, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Display verbose details in output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Base URL override for the API (scheme://host:port), used by tests
    #[arg(long, global = true, env = "SATWATCH_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate sync plans and emit monitoring plugin output
    Check,

    /// List sync plans for all organizations
    Plans {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::PrettyTable)]
        format: OutputFormat,

        /// Limit listed sync plans to those in a non-OK state
        #[arg(long)]
        omit_ok: bool,
    },
}

/// Output formats for the plans listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-organization rollup, light on specifics
    Overview,
    /// Plain aligned text table
    SimpleTable,
    /// Decorated table
    PrettyTable,
    /// Per-organization plan listing with evaluated state
    Verbose,
}
