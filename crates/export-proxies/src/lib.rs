//! Shell exports for the operating system's proxy configuration.
//!
//! `export-proxies` reads the active proxy settings and renders them as
//! `export` statements for the conventional variables (`http_proxy`,
//! `https_proxy`, `ftp_proxy`, `all_proxy`, `no_proxy`) in lowercase,
//! uppercase and capitalized spellings.
//!
//! The pipeline is a pure transform over a [`ConfigSource`]:
//!
//! 1. [`extract`](extract::extract) - enabled, fully configured entries become
//!    [`ResolvedSetting`]s in [`CATALOG`] order
//! 2. [`expand`](case::expand) - each setting fans out into three names
//! 3. [`serialize`](export::serialize) - lines are rendered and joined
//!
//! # Example
//!
//! ```
//! use export_proxies::{exports, ProtocolKind, ProxySnapshot, RawProxyEntry};
//!
//! let snapshot = ProxySnapshot::default()
//!     .with_entry(ProtocolKind::Http, RawProxyEntry::enabled("proxy.local", 8080));
//!
//! let text = exports(&snapshot)?;
//! assert!(text.starts_with("export http_proxy=\"http://proxy.local:8080\""));
//! # Ok::<(), export_proxies::ProxyError>(())
//! ```

pub mod case;
pub mod catalog;
pub mod error;
pub mod export;
pub mod extract;
pub mod source;

pub use catalog::{ProtocolDescriptor, ProtocolKind, CATALOG};
pub use error::{ProxyError, Result};
pub use export::ExportLine;
pub use extract::ResolvedSetting;
pub use source::{ConfigSource, ProxySnapshot, RawProxyEntry, SystemSource};

/// Run the whole pipeline against `source`.
///
/// # Errors
///
/// Returns [`ProxyError::ConfigUnavailable`] if the source could not be read;
/// nothing is rendered in that case.
pub fn exports(source: &dyn ConfigSource) -> Result<String> {
    let settings = extract::extract(source)?;
    let lines: Vec<ExportLine> = settings.iter().flat_map(case::expand).collect();
    tracing::debug!(
        "Rendering {} settings as {} export lines",
        settings.len(),
        lines.len()
    );
    Ok(export::serialize(&lines))
}
