// ── Memory usage ──
//
// `mem_info` is a flat list of /proc/meminfo tokens: a label followed by
// its value (and sometimes a unit), e.g. `'MemTotal:','131072','kB'`.

use serde::{Deserialize, Serialize};

const TOTAL_LABEL: &str = "MemTotal:";
const FREE_LABEL: &str = "MemFree:";

/// Memory figures in kilobytes. Each is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total_kb: Option<u64>,
    pub free_kb: Option<u64>,
    pub used_kb: Option<u64>,
    pub used_percent: Option<f64>,
}

/// Value token following `label`.
///
/// An exact match wins; otherwise the first token that starts with the
/// label (sans trailing colon) is used.
pub fn lookup(tokens: &[String], label: &str) -> Option<u64> {
    let stem = label.trim_end_matches(':');
    let idx = tokens
        .iter()
        .position(|t| t.trim() == label)
        .or_else(|| tokens.iter().position(|t| t.trim().starts_with(stem)))?;
    tokens.get(idx + 1)?.trim().parse().ok()
}

/// Derive total/free/used figures from a `mem_info` list.
pub fn parse_memory(tokens: &[String]) -> MemoryUsage {
    let total_kb = lookup(tokens, TOTAL_LABEL);
    let free_kb = lookup(tokens, FREE_LABEL);

    let (used_kb, used_percent) = match (total_kb, free_kb) {
        (Some(total), Some(free)) if total > 0 => match total.checked_sub(free) {
            Some(used) => (Some(used), Some(percent(used, total))),
            None => (None, None),
        },
        _ => (None, None),
    };

    MemoryUsage {
        total_kb,
        free_kb,
        used_kb,
        used_percent,
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: u64, whole: u64) -> f64 {
    super::round1(part as f64 / whole as f64 * 100.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn half_used() {
        let mem = parse_memory(&tokens(&["MemTotal:", "131072", "MemFree:", "65536"]));
        assert_eq!(mem.total_kb, Some(131_072));
        assert_eq!(mem.free_kb, Some(65_536));
        assert_eq!(mem.used_kb, Some(65_536));
        assert_eq!(mem.used_percent, Some(50.0));
    }

    #[test]
    fn units_and_prefix_labels() {
        let mem = parse_memory(&tokens(&[
            "total:", "used:", "free:", "MemTotal", "125480", "kB", "MemFree", "38000", "kB",
        ]));
        assert_eq!(mem.total_kb, Some(125_480));
        assert_eq!(mem.free_kb, Some(38_000));
        assert_eq!(mem.used_percent, Some(69.7));
    }

    #[test]
    fn exact_label_beats_prefix() {
        let t = tokens(&["MemFreeish:", "1", "MemFree:", "2"]);
        assert_eq!(lookup(&t, "MemFree:"), Some(2));
    }

    #[test]
    fn missing_free_only_blanks_dependents() {
        let mem = parse_memory(&tokens(&["MemTotal:", "1000"]));
        assert_eq!(mem.total_kb, Some(1000));
        assert_eq!(mem.free_kb, None);
        assert_eq!(mem.used_kb, None);
        assert_eq!(mem.used_percent, None);
    }

    #[test]
    fn zero_total_has_no_percentage() {
        let mem = parse_memory(&tokens(&["MemTotal:", "0", "MemFree:", "0"]));
        assert_eq!(mem.total_kb, Some(0));
        assert_eq!(mem.used_percent, None);
    }

    #[test]
    fn label_at_end_or_bad_number() {
        assert_eq!(lookup(&tokens(&["MemTotal:"]), "MemTotal:"), None);
        assert_eq!(lookup(&tokens(&["MemTotal:", "lots"]), "MemTotal:"), None);
    }
}
