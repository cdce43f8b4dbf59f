//! GNOME proxy settings reader.
//!
//! Reads `org.gnome.system.proxy` through the `gsettings` command. Values come
//! back in GVariant text form (`'host'`, `8080`, `['a', 'b']`), parsed by the
//! helpers below.

#![cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]

use super::{ProxySnapshot, RawProxyEntry};
use crate::catalog::ProtocolKind;
use std::process::Command;
use tracing::debug;

const SCHEMA: &str = "org.gnome.system.proxy";

/// Child schema suffix for each URL protocol.
fn child_schema(kind: ProtocolKind) -> Option<&'static str> {
    match kind {
        ProtocolKind::Http => Some("http"),
        ProtocolKind::Https => Some("https"),
        ProtocolKind::Ftp => Some("ftp"),
        ProtocolKind::Socks => Some("socks"),
        ProtocolKind::Exceptions => None,
    }
}

pub(crate) fn read() -> Result<ProxySnapshot, String> {
    let mode = parse_string(&gsettings_get(SCHEMA, "mode")?).unwrap_or_default();
    let manual = mode == "manual";
    debug!("GNOME proxy mode: {}", mode);

    let mut snapshot = ProxySnapshot::default();
    for kind in ProtocolKind::URL_PROTOCOLS {
        let Some(child) = child_schema(kind) else {
            continue;
        };
        let schema = format!("{}.{}", SCHEMA, child);
        let entry = RawProxyEntry {
            enabled: manual,
            host: parse_string(&gsettings_get(&schema, "host")?).filter(|h| !h.is_empty()),
            port: parse_port(&gsettings_get(&schema, "port")?),
        };
        snapshot.set_entry(kind, entry);
    }

    // ignore-hosts keeps its default list even when no proxy is configured
    if manual {
        snapshot.exceptions = parse_string_list(&gsettings_get(SCHEMA, "ignore-hosts")?);
    }

    Ok(snapshot)
}

fn gsettings_get(schema: &str, key: &str) -> Result<String, String> {
    let output = Command::new("gsettings")
        .args(["get", schema, key])
        .output()
        .map_err(|e| format!("failed to run gsettings: {}", e))?;

    if !output.status.success() {
        return Err(format!(
            "gsettings get {} {} failed: {}",
            schema,
            key,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Parse a GVariant string literal (`'value'` or `"value"`).
pub(crate) fn parse_string(text: &str) -> Option<String> {
    let text = text.trim();
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                value.push(escaped);
            }
        } else {
            value.push(c);
        }
    }
    Some(value)
}

/// Parse a GVariant integer port. `0` means unset.
pub(crate) fn parse_port(text: &str) -> Option<u16> {
    // Typed form: "uint32 8080"
    let number = text.split_whitespace().last()?;
    number.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Parse a GVariant string array (`['a', 'b']`, `@as []`).
pub(crate) fn parse_string_list(text: &str) -> Vec<String> {
    let text = text.trim();
    let text = text.strip_prefix("@as").unwrap_or(text).trim();
    let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) else {
        return Vec::new();
    };

    inner
        .split(',')
        .filter_map(parse_string)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string() {
        assert_eq!(parse_string("'manual'"), Some("manual".to_string()));
        assert_eq!(parse_string("\"it's\""), Some("it's".to_string()));
        assert_eq!(parse_string("'a\\'b'"), Some("a'b".to_string()));
        assert_eq!(parse_string("''"), Some(String::new()));
        assert_eq!(parse_string("manual"), None);
        assert_eq!(parse_string("'"), None);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080"), Some(8080));
        assert_eq!(parse_port("uint32 3128"), Some(3128));
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("99999"), None);
        assert_eq!(parse_port(""), None);
    }

    #[test]
    fn test_parse_string_list() {
        assert_eq!(
            parse_string_list("['localhost', '127.0.0.0/8', '*.corp']"),
            vec!["localhost", "127.0.0.0/8", "*.corp"]
        );
        assert_eq!(parse_string_list("@as []"), Vec::<String>::new());
        assert_eq!(parse_string_list("[]"), Vec::<String>::new());
        assert_eq!(parse_string_list("garbage"), Vec::<String>::new());
    }

    #[test]
    fn test_every_url_protocol_has_child_schema() {
        for kind in ProtocolKind::URL_PROTOCOLS {
            assert!(child_schema(kind).is_some());
        }
        assert!(child_schema(ProtocolKind::Exceptions).is_none());
    }
}
