//! macOS proxy reader using the SystemConfiguration dynamic store.
//!
//! `SCDynamicStoreCopyProxies` returns the proxy dictionary of the primary
//! network service. Per protocol it carries `<P>Enable` (number), `<P>Proxy`
//! (host string) and `<P>Port` (number); the bypass list is `ExceptionsList`.

use super::{ProxySnapshot, RawProxyEntry};
use crate::catalog::ProtocolKind;
use system_configuration::core_foundation::array::CFArray;
use system_configuration::core_foundation::base::{CFType, TCFType};
use system_configuration::core_foundation::dictionary::CFDictionary;
use system_configuration::core_foundation::number::CFNumber;
use system_configuration::core_foundation::string::{CFString, CFStringRef};
use system_configuration::dynamic_store::SCDynamicStoreBuilder;
use system_configuration::sys::schema_definitions::{
    kSCPropNetProxiesExceptionsList, kSCPropNetProxiesFTPEnable, kSCPropNetProxiesFTPPort,
    kSCPropNetProxiesFTPProxy, kSCPropNetProxiesHTTPEnable, kSCPropNetProxiesHTTPPort,
    kSCPropNetProxiesHTTPProxy, kSCPropNetProxiesHTTPSEnable, kSCPropNetProxiesHTTPSPort,
    kSCPropNetProxiesHTTPSProxy, kSCPropNetProxiesSOCKSEnable, kSCPropNetProxiesSOCKSPort,
    kSCPropNetProxiesSOCKSProxy,
};
use tracing::debug;

type ProxyDictionary = CFDictionary<CFString, CFType>;

/// Dictionary keys for one protocol.
struct ProtocolKeys {
    kind: ProtocolKind,
    enable: CFStringRef,
    host: CFStringRef,
    port: CFStringRef,
}

fn protocol_keys() -> [ProtocolKeys; 4] {
    // SAFETY: the schema constants are immutable CFStrings exported by the
    // SystemConfiguration framework and live for the whole process.
    unsafe {
        [
            ProtocolKeys {
                kind: ProtocolKind::Http,
                enable: kSCPropNetProxiesHTTPEnable,
                host: kSCPropNetProxiesHTTPProxy,
                port: kSCPropNetProxiesHTTPPort,
            },
            ProtocolKeys {
                kind: ProtocolKind::Https,
                enable: kSCPropNetProxiesHTTPSEnable,
                host: kSCPropNetProxiesHTTPSProxy,
                port: kSCPropNetProxiesHTTPSPort,
            },
            ProtocolKeys {
                kind: ProtocolKind::Ftp,
                enable: kSCPropNetProxiesFTPEnable,
                host: kSCPropNetProxiesFTPProxy,
                port: kSCPropNetProxiesFTPPort,
            },
            ProtocolKeys {
                kind: ProtocolKind::Socks,
                enable: kSCPropNetProxiesSOCKSEnable,
                host: kSCPropNetProxiesSOCKSProxy,
                port: kSCPropNetProxiesSOCKSPort,
            },
        ]
    }
}

pub(crate) fn read() -> Result<ProxySnapshot, String> {
    let store = SCDynamicStoreBuilder::new("export-proxies")
        .build()
        .ok_or_else(|| "failed to create dynamic store session".to_string())?;
    let proxies = store
        .get_proxies()
        .ok_or_else(|| "dynamic store returned no proxy dictionary".to_string())?;

    let mut snapshot = ProxySnapshot::default();
    for keys in protocol_keys() {
        let entry = RawProxyEntry {
            enabled: number(&proxies, keys.enable).is_some_and(|flag| flag != 0),
            host: string(&proxies, keys.host).filter(|host| !host.is_empty()),
            port: number(&proxies, keys.port).and_then(|port| u16::try_from(port).ok()),
        };
        debug!("{}: {:?}", keys.kind, entry);
        snapshot.set_entry(keys.kind, entry);
    }

    // SAFETY: see protocol_keys
    snapshot.exceptions = string_list(&proxies, unsafe { kSCPropNetProxiesExceptionsList });

    Ok(snapshot)
}

fn find(proxies: &ProxyDictionary, key: CFStringRef) -> Option<CFType> {
    // SAFETY: key is a valid, immortal CFString constant
    let key = unsafe { CFString::wrap_under_get_rule(key) };
    proxies.find(&key).map(|value| (*value).clone())
}

fn number(proxies: &ProxyDictionary, key: CFStringRef) -> Option<i64> {
    find(proxies, key)?.downcast::<CFNumber>()?.to_i64()
}

fn string(proxies: &ProxyDictionary, key: CFStringRef) -> Option<String> {
    find(proxies, key)?
        .downcast::<CFString>()
        .map(|value| value.to_string())
}

fn string_list(proxies: &ProxyDictionary, key: CFStringRef) -> Vec<String> {
    let Some(array) = find(proxies, key).and_then(|value| value.downcast::<CFArray>()) else {
        return Vec::new();
    };

    array
        .iter()
        .filter_map(|item| {
            // SAFETY: array items are CFTypeRefs retained by the array
            unsafe { CFType::wrap_under_get_rule(*item) }.downcast::<CFString>()
        })
        .map(|value| value.to_string())
        .collect()
}
