//! Error types for the export-proxies CLI.

use export_proxies::ProxyError;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
