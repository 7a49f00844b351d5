// ── Field catalog ──
//
// Human-facing metadata for the fields worth showing in a status view.
// Anything not listed here still renders, with a label built from its key.

use serde::Serialize;
use strum::{Display, EnumString};

/// Grouping used to order the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldCategory {
    Network,
    System,
    Traffic,
    Wireless,
    Diagnostic,
}

/// Display metadata for one field or derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub category: FieldCategory,
}

const fn spec(
    key: &'static str,
    label: &'static str,
    unit: Option<&'static str>,
    category: FieldCategory,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        unit,
        category,
    }
}

/// Known fields, in display order. `load_1min` and `mem_free_kb` are
/// derived metrics rather than raw fields.
pub const FIELDS: &[FieldSpec] = &[
    spec("wan_ipaddr", "WAN IP", None, FieldCategory::Network),
    spec("wan_shortproto", "WAN Protocol", None, FieldCategory::Network),
    spec("lan_ip", "LAN IP", None, FieldCategory::Network),
    spec("uptime", "Uptime", None, FieldCategory::System),
    spec("load_1min", "Load Average (1min)", None, FieldCategory::System),
    spec("cpu_temp0", "CPU Temperature", Some("°C"), FieldCategory::System),
    spec("mem_free_kb", "Memory Free", Some("kB"), FieldCategory::System),
    spec("ttraff_in", "Total Traffic In", Some("MB"), FieldCategory::Traffic),
    spec("ttraff_out", "Total Traffic Out", Some("MB"), FieldCategory::Traffic),
    spec("rate_in_kbps", "Download Rate", Some("KiB/s"), FieldCategory::Traffic),
    spec("rate_out_kbps", "Upload Rate", Some("KiB/s"), FieldCategory::Traffic),
    spec("wl_ssid", "Wl Ssid", None, FieldCategory::Wireless),
    spec("wl_channel", "Wl Channel", None, FieldCategory::Wireless),
];

pub fn lookup(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Catalog label, or the key title-cased word by word (`wl_ssid` -> `Wl Ssid`).
pub fn label_for(key: &str) -> String {
    lookup(key).map_or_else(|| title_case(key), |f| f.label.to_owned())
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_field() {
        let f = lookup("cpu_temp0");
        assert_eq!(f.map(|f| f.unit), Some(Some("°C")));
        assert_eq!(label_for("wan_ipaddr"), "WAN IP");
    }

    #[test]
    fn fallback_label() {
        assert_eq!(label_for("wan_gateway"), "Wan Gateway");
        assert_eq!(label_for("WL_mode"), "Wl Mode");
        assert_eq!(label_for("odd__key_"), "Odd Key");
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = FIELDS.iter().map(|f| f.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), FIELDS.len());
    }
}
