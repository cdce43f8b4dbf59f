//! Proxy configuration sources
//!
//! [`ConfigSource`] is the read contract the extractor consumes. Two
//! implementations ship with the crate:
//! - [`ProxySnapshot`]: an owned, in-memory copy (JSON files, tests)
//! - [`SystemSource`]: the active OS configuration, read once on open
//!
//! Platform readers:
//! - macOS: SystemConfiguration dynamic store
//! - Windows: WinINet registry settings
//! - Linux and other Unix: GNOME settings via `gsettings`

use crate::catalog::ProtocolKind;
use crate::error::{ProxyError, Result};
use tracing::{debug, warn};

mod gnome;
#[cfg(target_os = "macos")]
mod macos;
mod snapshot;
mod windows;

pub use snapshot::{ProxySnapshot, RawProxyEntry};

/// Read access to a proxy configuration store.
pub trait ConfigSource {
    /// Human-readable name used in error messages.
    fn name(&self) -> &str;

    /// Whether the store could be opened.
    fn is_available(&self) -> bool;

    /// Entry for a URL protocol. Fields the store does not set are `None`.
    fn protocol_entry(&self, kind: ProtocolKind) -> RawProxyEntry;

    /// Bypass patterns, possibly empty.
    fn exceptions(&self) -> Vec<String>;

    /// Why the store is unavailable. Only meaningful when
    /// [`is_available`](Self::is_available) is false.
    fn unavailable_reason(&self) -> String {
        "configuration store could not be opened".to_string()
    }
}

/// The operating system's active proxy configuration.
///
/// [`SystemSource::open`] reads the platform store exactly once and keeps
/// either the copied snapshot or the failure reason. No OS handle outlives
/// the call.
#[derive(Debug, Clone)]
pub struct SystemSource {
    store: &'static str,
    state: std::result::Result<ProxySnapshot, String>,
}

impl SystemSource {
    /// Read the platform store.
    #[must_use]
    pub fn open() -> Self {
        let store = platform_store_name();
        let state = read_platform();
        match &state {
            Ok(_) => debug!("Read proxy settings from {}", store),
            Err(reason) => warn!("Cannot read proxy settings from {}: {}", store, reason),
        }
        Self { store, state }
    }

    /// The copied snapshot, or `ConfigUnavailable` if the read failed.
    pub fn snapshot(&self) -> Result<&ProxySnapshot> {
        self.state
            .as_ref()
            .map_err(|reason| ProxyError::unavailable(self.store, reason.clone()))
    }
}

impl ConfigSource for SystemSource {
    fn name(&self) -> &str {
        self.store
    }

    fn is_available(&self) -> bool {
        self.state.is_ok()
    }

    fn protocol_entry(&self, kind: ProtocolKind) -> RawProxyEntry {
        self.state
            .as_ref()
            .map(|snapshot| snapshot.protocol_entry(kind))
            .unwrap_or_default()
    }

    fn exceptions(&self) -> Vec<String> {
        self.state
            .as_ref()
            .map(|snapshot| snapshot.exceptions.clone())
            .unwrap_or_default()
    }

    fn unavailable_reason(&self) -> String {
        match &self.state {
            Ok(_) => String::new(),
            Err(reason) => reason.clone(),
        }
    }
}

fn platform_store_name() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "macOS dynamic store"
    }

    #[cfg(windows)]
    {
        "Windows internet settings"
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        "GNOME proxy settings"
    }

    #[cfg(not(any(unix, windows)))]
    {
        "system proxy settings"
    }
}

fn read_platform() -> std::result::Result<ProxySnapshot, String> {
    #[cfg(target_os = "macos")]
    {
        macos::read()
    }

    #[cfg(windows)]
    {
        windows::read()
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        gnome::read()
    }

    #[cfg(not(any(unix, windows)))]
    {
        Err(format!(
            "platform '{}' is not supported",
            std::env::consts::OS
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(reason: &str) -> SystemSource {
        SystemSource {
            store: "test store",
            state: Err(reason.to_string()),
        }
    }

    #[test]
    fn test_unavailable_system_source() {
        let source = unavailable("no session");
        assert!(!source.is_available());
        assert_eq!(source.unavailable_reason(), "no session");
        assert_eq!(source.exceptions(), Vec::<String>::new());
        assert_eq!(
            source.protocol_entry(ProtocolKind::Http),
            RawProxyEntry::default()
        );
        assert!(source.snapshot().is_err());
    }

    #[test]
    fn test_available_system_source_delegates() {
        let snapshot = ProxySnapshot::default()
            .with_entry(ProtocolKind::Ftp, RawProxyEntry::enabled("f", 21))
            .with_exceptions(["a", "b"]);
        let source = SystemSource {
            store: "test store",
            state: Ok(snapshot.clone()),
        };
        assert!(source.is_available());
        assert_eq!(source.name(), "test store");
        assert_eq!(
            source.protocol_entry(ProtocolKind::Ftp),
            RawProxyEntry::enabled("f", 21)
        );
        assert_eq!(source.exceptions(), vec!["a", "b"]);
        assert_eq!(source.snapshot().ok(), Some(&snapshot));
    }
}
