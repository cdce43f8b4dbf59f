//! Owned, serializable copy of a proxy configuration store.
//!
//! Platform readers copy the store into a [`ProxySnapshot`] and release it
//! immediately. Snapshots can also be loaded from JSON, which is how the CLI
//! `--from` option and the tests supply configuration.

use super::ConfigSource;
use crate::catalog::ProtocolKind;
use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One protocol's entry as stored by the OS. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProxyEntry {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl RawProxyEntry {
    /// An enabled entry with both host and port set.
    #[must_use]
    pub fn enabled(host: impl Into<String>, port: u16) -> Self {
        Self {
            enabled: true,
            host: Some(host.into()),
            port: Some(port),
        }
    }
}

/// In-memory picture of the proxy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySnapshot {
    #[serde(default)]
    pub http: RawProxyEntry,
    #[serde(default)]
    pub https: RawProxyEntry,
    #[serde(default)]
    pub ftp: RawProxyEntry,
    #[serde(default)]
    pub socks: RawProxyEntry,
    /// Bypass patterns in store order
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl ProxySnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ProxyError::unavailable("snapshot", format!("invalid JSON: {}", e)))
    }

    /// Load a snapshot from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("Loading proxy snapshot from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
            ProxyError::unavailable(path.display().to_string(), format!("read failed: {}", e))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            ProxyError::unavailable(path.display().to_string(), format!("invalid JSON: {}", e))
        })
    }

    /// Serialize to pretty JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// The stored entry for a URL protocol. `Exceptions` has no entry.
    #[must_use]
    pub fn entry(&self, kind: ProtocolKind) -> Option<&RawProxyEntry> {
        match kind {
            ProtocolKind::Http => Some(&self.http),
            ProtocolKind::Https => Some(&self.https),
            ProtocolKind::Ftp => Some(&self.ftp),
            ProtocolKind::Socks => Some(&self.socks),
            ProtocolKind::Exceptions => None,
        }
    }

    /// Replace the entry for a URL protocol. Ignored for `Exceptions`.
    pub fn set_entry(&mut self, kind: ProtocolKind, entry: RawProxyEntry) {
        match kind {
            ProtocolKind::Http => self.http = entry,
            ProtocolKind::Https => self.https = entry,
            ProtocolKind::Ftp => self.ftp = entry,
            ProtocolKind::Socks => self.socks = entry,
            ProtocolKind::Exceptions => {}
        }
    }

    /// Builder-style variant of [`set_entry`](Self::set_entry).
    #[must_use]
    pub fn with_entry(mut self, kind: ProtocolKind, entry: RawProxyEntry) -> Self {
        self.set_entry(kind, entry);
        self
    }

    /// Builder-style setter for the bypass list.
    #[must_use]
    pub fn with_exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions = exceptions.into_iter().map(Into::into).collect();
        self
    }
}

impl ConfigSource for ProxySnapshot {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn protocol_entry(&self, kind: ProtocolKind) -> RawProxyEntry {
        self.entry(kind).cloned().unwrap_or_default()
    }

    fn exceptions(&self) -> Vec<String> {
        self.exceptions.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json_partial() {
        let snapshot = ProxySnapshot::from_json_str(
            r#"{"socks": {"enabled": true, "host": "s.local", "port": 1080},
                "exceptions": ["*.internal"]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.socks, RawProxyEntry::enabled("s.local", 1080));
        assert_eq!(snapshot.http, RawProxyEntry::default());
        assert_eq!(snapshot.exceptions, vec!["*.internal"]);
    }

    #[test]
    fn test_from_json_missing_fields_default() {
        let snapshot = ProxySnapshot::from_json_str(r#"{"http": {"host": "p"}}"#).unwrap();
        assert!(!snapshot.http.enabled);
        assert_eq!(snapshot.http.host.as_deref(), Some("p"));
        assert_eq!(snapshot.http.port, None);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = ProxySnapshot::from_json_str(r#"{"gopher": {}}"#).unwrap_err();
        assert!(matches!(err, ProxyError::ConfigUnavailable { .. }));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_port() {
        assert!(ProxySnapshot::from_json_str(r#"{"http": {"port": 70000}}"#).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"http": {{"enabled": true, "host": "proxy.local", "port": 8080}}}}"#
        )
        .unwrap();
        let snapshot = ProxySnapshot::from_json_file(file.path()).unwrap();
        assert_eq!(snapshot.http, RawProxyEntry::enabled("proxy.local", 8080));
    }

    #[test]
    fn test_from_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match ProxySnapshot::from_json_file(&path).unwrap_err() {
            ProxyError::ConfigUnavailable { source_name, reason } => {
                assert!(source_name.ends_with("absent.json"));
                assert!(reason.starts_with("read failed"));
            }
        }
    }

    #[test]
    fn test_json_roundtrip_omits_absent_fields() {
        let snapshot = ProxySnapshot::default()
            .with_entry(ProtocolKind::Https, RawProxyEntry::enabled("h", 443));
        let json = snapshot.to_json();
        assert!(!json.contains("null"));
        assert_eq!(ProxySnapshot::from_json_str(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_exceptions_kind_has_no_entry() {
        let mut snapshot = ProxySnapshot::default();
        snapshot.set_entry(ProtocolKind::Exceptions, RawProxyEntry::enabled("x", 1));
        assert_eq!(snapshot, ProxySnapshot::default());
        assert_eq!(
            snapshot.protocol_entry(ProtocolKind::Exceptions),
            RawProxyEntry::default()
        );
    }
}
