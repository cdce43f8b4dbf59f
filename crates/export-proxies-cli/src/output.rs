//! Writing results to stdout
//!
//! stdout carries only sourceable text; logs and errors go to stderr.

use crate::error::Result;
use export_proxies::{ConfigSource, ProxySnapshot};
use std::io::Write;

/// Render the export text for `source` into `out`.
///
/// Non-empty output ends with a single newline so that `eval` and `source`
/// see a terminated last line. Empty output writes nothing.
pub fn write_exports(source: &dyn ConfigSource, out: &mut impl Write) -> Result<()> {
    let text = export_proxies::exports(source)?;
    if !text.is_empty() {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

/// Write a snapshot as pretty JSON.
pub fn write_snapshot(snapshot: &ProxySnapshot, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", snapshot.to_json())?;
    Ok(())
}
