//! Error types for the satwatch CLI

use thiserror::Error;

/// Result type alias for satwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// API-related errors.
///
/// Each variant corresponds to one class of failure in the retrieval
/// pipeline: transport, protocol or precondition. Callers match on the
/// variant instead of comparing wrapped sentinel values.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("operation timed out before completion")]
    Timeout,

    #[error("unexpected response {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("source {url} contains multiple JSON objects; only one JSON object is supported")]
    MultipleObjects { url: String },

    #[error("failed to decode JSON data from {url}: {cause}")]
    Decode {
        url: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error(
        "page {page} of {url} returned no new results with {remaining} records still reported remaining"
    )]
    UnexpectedEmptyPage {
        url: String,
        page: usize,
        remaining: usize,
    },

    #[error("failed to retrieve organizations: {source}")]
    Organizations {
        #[source]
        source: Box<ApiError>,
    },

    #[error("failed to retrieve sync plans for organization (name: {org_name}, id: {org_id}): {source}")]
    SyncPlansForOrg {
        org_name: String,
        org_id: i64,
        #[source]
        source: Box<ApiError>,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Network(format!("failed to connect to API: {err}"))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server not specified. Use --server to provide the Satellite server FQDN or IP address.")]
    MissingServer,

    #[error("username not specified. Use --username to provide the Satellite API user.")]
    MissingUsername,

    #[error("password not specified. Use --password or the SATWATCH_PASSWORD environment variable.")]
    MissingPassword,

    #[error("failed to load CA certificate from {path}: {cause}")]
    InvalidCaCert { path: String, cause: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
