//! Error types for the export-proxies crate.

use thiserror::Error;

/// Errors that can occur while reading the proxy configuration.
///
/// Missing or disabled protocol entries are not errors; they simply produce
/// no export lines. The only failure is a store that cannot be read at all.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Proxy configuration unavailable from {source_name}: {reason}")]
    ConfigUnavailable { source_name: String, reason: String },
}

impl ProxyError {
    pub(crate) fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ProxyError::ConfigUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for proxy configuration operations.
pub type Result<T> = std::result::Result<T, ProxyError>;
