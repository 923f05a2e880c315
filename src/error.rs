//! Error types for the willitconnect command.
//!
//! Every variant is terminal: the command prints the message and stops.

use thiserror::Error;

/// Accepted invocation forms, echoed by [`CheckError::Usage`] and `--help`.
pub const USAGE_LINES: &str = "willitconnect -host=<host> -port=<port> \
[-proxyHost=<proxyHost> -proxyPort=<proxyPort>] [-route=<route>]\n       \
willitconnect <url>\n       \
willitconnect <host> <port>";

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Usage: {}", USAGE_LINES)]
    Usage,

    #[error("Unable to connect to CF, use cf login first")]
    NoSession,

    #[error("Unable to find valid org, please view cf target")]
    NoOrg,

    #[error("Unable to find valid domain, please view cf domains")]
    NoDomain,

    #[error("-route must be a fqdn")]
    InvalidRoute,

    #[error("Unable to determine CF ApiEndpoint")]
    NoApiEndpoint,

    #[error("Unable to access willitconnect: {0}")]
    ConnectivityUnreachable(String),

    #[error("Invalid response from willitconnect: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<config::ConfigError> for CheckError {
    fn from(err: config::ConfigError) -> Self {
        CheckError::Config(err.to_string())
    }
}
