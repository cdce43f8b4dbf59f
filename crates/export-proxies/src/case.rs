//! Case expansion of variable names.
//!
//! Tools disagree on which spelling they read (`http_proxy`, `HTTP_PROXY`,
//! occasionally `Http_Proxy`), so every setting is exported three times.

use crate::export::ExportLine;
use crate::extract::ResolvedSetting;

/// Fan a setting out into lowercase, uppercase and capitalized names, in
/// that order. The value is never touched.
#[must_use]
pub fn expand(setting: &ResolvedSetting) -> [ExportLine; 3] {
    [
        setting.name.to_lowercase(),
        setting.name.to_uppercase(),
        capitalize(&setting.name),
    ]
    .map(|name| ExportLine {
        name,
        value: setting.value.clone(),
    })
}

/// Title-case each `_`-separated segment: `http_proxy` -> `Http_Proxy`.
#[must_use]
pub fn capitalize(name: &str) -> String {
    name.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("_")
}
