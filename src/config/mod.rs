//! Runtime settings assembled from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::cli::Cli;
use crate::client::Deadline;
use crate::error::{ConfigError, Result};

/// Default TCP port for the Satellite API.
pub const DEFAULT_PORT: u16 = 443;

/// Default read limit applied to response bodies (1 MiB). Overly generous
/// and unlikely to be met unless something is broken.
pub const DEFAULT_READ_LIMIT: u64 = 1_048_576;

/// Default number of records requested per page.
pub const DEFAULT_PER_PAGE: usize = 100;

/// Default timeout in seconds for a whole retrieval run. Satellite API
/// response times can be slow, so the default is generous.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 240;

/// Address-family preference for connections to the Satellite server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NetworkType {
    /// Either of IPv4 or IPv6.
    #[default]
    Auto,
    /// IPv4-only connections.
    Tcp4,
    /// IPv6-only connections.
    Tcp6,
}

/// Validated runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub user_agent: Option<String>,
    pub net_type: NetworkType,
    pub ca_cert: Option<PathBuf>,
    pub trust_cert: bool,
    pub permit_tls_renegotiation: bool,
    pub read_limit: u64,
    pub per_page: usize,
    pub timeout: Duration,
    pub verbose: bool,

    /// Base URL override (scheme://host:port) used in place of
    /// `https://{server}:{port}`. Intended for tests against local HTTP
    /// fixtures.
    pub api_host: Option<String>,
}

impl Settings {
    /// Build settings from parsed CLI flags, validating required values.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let server = match cli.server.as_deref() {
            Some(server) if !server.trim().is_empty() => server.trim().to_string(),
            _ => return Err(ConfigError::MissingServer.into()),
        };

        let username = match cli.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => return Err(ConfigError::MissingUsername.into()),
        };

        let password = match cli.password.as_deref() {
            Some(password) if !password.is_empty() => password.to_string(),
            _ => return Err(ConfigError::MissingPassword.into()),
        };

        if cli.per_page == 0 {
            return Err(ConfigError::Invalid("--per-page must be greater than zero".to_string()).into());
        }

        if cli.read_limit == 0 {
            return Err(
                ConfigError::Invalid("--read-limit must be greater than zero".to_string()).into(),
            );
        }

        Ok(Settings {
            server,
            port: cli.port,
            username,
            password,
            user_agent: cli.user_agent.clone(),
            net_type: cli.net_type,
            ca_cert: cli.ca_cert.clone(),
            trust_cert: cli.trust_cert,
            permit_tls_renegotiation: cli.permit_tls_renegotiation,
            read_limit: cli.read_limit,
            per_page: cli.per_page,
            timeout: Duration::from_secs(cli.timeout),
            verbose: cli.verbose,
            api_host: cli.api_host.clone(),
        })
    }

    /// User agent sent with API requests: the configured override or the
    /// crate name/version pair.
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        })
    }

    /// Base URL for API endpoints.
    pub fn base_url(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}:{}", self.server, self.port),
        }
    }

    /// Deadline bounding an entire retrieval run.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("args parse")
    }

    #[test]
    fn test_settings_from_complete_flags() {
        let cli = parse(&[
            "satwatch",
            "check",
            "--server",
            "sat.example.com",
            "--username",
            "monitor",
            "--password",
            "hunter2",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.server, "sat.example.com");
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
        assert_eq!(settings.read_limit, DEFAULT_READ_LIMIT);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(settings.base_url(), "https://sat.example.com:443");
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_missing_server_is_a_config_error() {
        let cli = parse(&["satwatch", "check", "--username", "monitor", "--password", "x"]);
        let err = Settings::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("--server"));
    }

    #[test]
    fn test_missing_credentials_are_config_errors() {
        let cli = parse(&["satwatch", "check", "--server", "sat.example.com"]);
        let err = Settings::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("--username"));

        let cli = parse(&[
            "satwatch",
            "check",
            "--server",
            "sat.example.com",
            "--username",
            "monitor",
        ]);
        let err = Settings::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_api_host_override_wins_over_server() {
        let cli = parse(&[
            "satwatch",
            "check",
            "--server",
            "sat.example.com",
            "--username",
            "monitor",
            "--password",
            "x",
            "--api-host",
            "http://127.0.0.1:8080/",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_default_user_agent_names_the_crate() {
        let cli = parse(&[
            "satwatch",
            "check",
            "--server",
            "sat.example.com",
            "--username",
            "monitor",
            "--password",
            "x",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();
        assert!(settings.user_agent().starts_with("satwatch/"));
    }
}
