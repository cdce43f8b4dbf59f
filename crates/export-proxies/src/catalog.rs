//! Static table of the proxy settings we know how to export.
//!
//! The order of [`CATALOG`] drives extraction, so it is also the order of the
//! generated export lines.

use std::fmt;

/// Kind of proxy setting read from the configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolKind {
    Http,
    Https,
    Ftp,
    Socks,
    /// Bypass list, exported as `no_proxy`
    Exceptions,
}

impl ProtocolKind {
    /// Kinds that carry a `host:port` proxy entry.
    pub const URL_PROTOCOLS: [ProtocolKind; 4] = [
        ProtocolKind::Http,
        ProtocolKind::Https,
        ProtocolKind::Ftp,
        ProtocolKind::Socks,
    ];
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProtocolKind::Http => "HTTP",
            ProtocolKind::Https => "HTTPS",
            ProtocolKind::Ftp => "FTP",
            ProtocolKind::Socks => "SOCKS",
            ProtocolKind::Exceptions => "exceptions",
        };
        f.write_str(label)
    }
}

/// How one setting kind maps onto an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolDescriptor {
    pub kind: ProtocolKind,
    /// Variable stem without the `_proxy` suffix (`"all"` for SOCKS, `"no"` for exceptions)
    pub env_base_name: &'static str,
    /// URL scheme of the proxy; `None` for the exceptions list
    pub url_scheme: Option<&'static str>,
}

impl ProtocolDescriptor {
    /// Lowercase environment variable name, e.g. `https_proxy`.
    #[must_use]
    pub fn env_name(&self) -> String {
        format!("{}_proxy", self.env_base_name)
    }
}

/// Every supported setting kind, in export order.
pub static CATALOG: [ProtocolDescriptor; 5] = [
    ProtocolDescriptor {
        kind: ProtocolKind::Http,
        env_base_name: "http",
        url_scheme: Some("http"),
    },
    ProtocolDescriptor {
        kind: ProtocolKind::Https,
        env_base_name: "https",
        url_scheme: Some("https"),
    },
    ProtocolDescriptor {
        kind: ProtocolKind::Ftp,
        env_base_name: "ftp",
        url_scheme: Some("ftp"),
    },
    ProtocolDescriptor {
        kind: ProtocolKind::Socks,
        env_base_name: "all",
        url_scheme: Some("socks"),
    },
    ProtocolDescriptor {
        kind: ProtocolKind::Exceptions,
        env_base_name: "no",
        url_scheme: None,
    },
];

/// Look up the descriptor for a kind.
#[must_use]
pub fn descriptor(kind: ProtocolKind) -> &'static ProtocolDescriptor {
    match kind {
        ProtocolKind::Http => &CATALOG[0],
        ProtocolKind::Https => &CATALOG[1],
        ProtocolKind::Ftp => &CATALOG[2],
        ProtocolKind::Socks => &CATALOG[3],
        ProtocolKind::Exceptions => &CATALOG[4],
    }
}
