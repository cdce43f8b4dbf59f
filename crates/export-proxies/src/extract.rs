//! Proxy extraction: raw store entries to resolved `name=value` settings.

use crate::catalog::{ProtocolDescriptor, CATALOG};
use crate::error::{ProxyError, Result};
use crate::source::{ConfigSource, RawProxyEntry};
use serde::Serialize;
use tracing::debug;

/// One environment variable before case expansion, e.g.
/// `http_proxy = http://proxy.local:8080`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSetting {
    pub name: String,
    pub value: String,
}

/// Read every catalog entry from `source` and keep the configured ones.
///
/// URL protocols need `enabled`, a non-empty host and a port. The exceptions
/// list needs at least one pattern. Anything else is skipped, not an error.
///
/// # Errors
///
/// Returns [`ProxyError::ConfigUnavailable`] if the source could not be read.
pub fn extract(source: &dyn ConfigSource) -> Result<Vec<ResolvedSetting>> {
    if !source.is_available() {
        return Err(ProxyError::unavailable(
            source.name(),
            source.unavailable_reason(),
        ));
    }

    let settings = CATALOG
        .iter()
        .filter_map(|descriptor| match descriptor.url_scheme {
            Some(scheme) => {
                resolve_url(descriptor, scheme, &source.protocol_entry(descriptor.kind))
            }
            None => resolve_exceptions(descriptor, &source.exceptions()),
        })
        .collect();

    Ok(settings)
}

fn resolve_url(
    descriptor: &ProtocolDescriptor,
    scheme: &str,
    entry: &RawProxyEntry,
) -> Option<ResolvedSetting> {
    if !entry.enabled {
        debug!("{} proxy disabled", descriptor.kind);
        return None;
    }

    let (Some(host), Some(port)) = (entry.host.as_deref().filter(|h| !h.is_empty()), entry.port)
    else {
        debug!("{} proxy enabled but missing host or port", descriptor.kind);
        return None;
    };

    Some(ResolvedSetting {
        name: descriptor.env_name(),
        value: format!("{}://{}:{}", scheme, host, port),
    })
}

fn resolve_exceptions(
    descriptor: &ProtocolDescriptor,
    patterns: &[String],
) -> Option<ResolvedSetting> {
    if patterns.is_empty() {
        return None;
    }

    let value = patterns
        .iter()
        .map(|pattern| strip_wildcards(pattern))
        .collect::<Vec<_>>()
        .join(",");

    Some(ResolvedSetting {
        name: descriptor.env_name(),
        value,
    })
}

/// Translate a bypass pattern to `no_proxy` syntax: every `*.` becomes `.`,
/// so `*.example.com` matches as the suffix `.example.com`.
#[must_use]
pub fn strip_wildcards(pattern: &str) -> String {
    pattern.replace("*.", ".")
}
