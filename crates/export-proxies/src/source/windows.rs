//! Windows internet settings reader.
//!
//! WinINet keeps the per-user proxy under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings`:
//! - `ProxyEnable` (DWORD) gates every protocol
//! - `ProxyServer` is `host:port` for HTTP, HTTPS and FTP alike, or a
//!   `proto=host:port;...` list
//! - `ProxyOverride` is a `;`-separated bypass list

#![cfg_attr(not(windows), allow(dead_code))]

use crate::catalog::ProtocolKind;
#[cfg(windows)]
use super::{ProxySnapshot, RawProxyEntry};

#[cfg(windows)]
const INTERNET_SETTINGS: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Internet Settings";

/// Marker in `ProxyOverride` meaning "plain hostnames"; not a host pattern.
const LOCAL_MARKER: &str = "<local>";

#[cfg(windows)]
pub(crate) fn read() -> Result<ProxySnapshot, String> {
    let settings = windows_registry::CURRENT_USER
        .open(INTERNET_SETTINGS)
        .map_err(|e| format!("failed to open HKCU\\{}: {}", INTERNET_SETTINGS, e))?;

    let enabled = settings.get_u32("ProxyEnable").unwrap_or(0) != 0;
    tracing::debug!("ProxyEnable = {}", enabled);

    let mut snapshot = ProxySnapshot::default();
    if let Ok(server) = settings.get_string("ProxyServer") {
        for server in parse_proxy_server(&server) {
            snapshot.set_entry(
                server.kind,
                RawProxyEntry {
                    enabled,
                    host: Some(server.host),
                    port: server.port,
                },
            );
        }
    }

    if enabled {
        if let Ok(overrides) = settings.get_string("ProxyOverride") {
            snapshot.exceptions = parse_proxy_override(&overrides);
        }
    }

    Ok(snapshot)
}

/// One protocol's server parsed out of `ProxyServer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerEntry {
    pub kind: ProtocolKind,
    pub host: String,
    pub port: Option<u16>,
}

/// Parse a `ProxyServer` value.
pub(crate) fn parse_proxy_server(value: &str) -> Vec<ServerEntry> {
    let value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }

    if !value.contains('=') {
        let (host, port) = split_host_port(value);
        if host.is_empty() {
            return Vec::new();
        }
        return [ProtocolKind::Http, ProtocolKind::Https, ProtocolKind::Ftp]
            .into_iter()
            .map(|kind| ServerEntry {
                kind,
                host: host.clone(),
                port,
            })
            .collect();
    }

    value
        .split(';')
        .filter_map(|part| {
            let (proto, address) = part.trim().split_once('=')?;
            let kind = match proto.trim().to_ascii_lowercase().as_str() {
                "http" => ProtocolKind::Http,
                "https" => ProtocolKind::Https,
                "ftp" => ProtocolKind::Ftp,
                "socks" => ProtocolKind::Socks,
                _ => return None,
            };
            let (host, port) = split_host_port(address.trim());
            (!host.is_empty()).then_some(ServerEntry { kind, host, port })
        })
        .collect()
}

/// Parse a `ProxyOverride` value into bypass patterns.
pub(crate) fn parse_proxy_override(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(LOCAL_MARKER))
        .map(str::to_string)
        .collect()
}

fn split_host_port(address: &str) -> (String, Option<u16>) {
    let address = address
        .split_once("://")
        .map_or(address, |(_, rest)| rest)
        .trim_end_matches('/');

    match address.rsplit_once(':') {
        // Bare IPv6 literal without a port
        Some((host, _)) if host.contains(':') && !host.ends_with(']') => {
            (address.to_string(), None)
        }
        Some((host, port)) => (host.to_string(), port.parse().ok()),
        None => (address.to_string(), None),
    }
}
