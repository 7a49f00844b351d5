// ── Derived metrics ──
//
// Values that no single field carries directly: load averages parsed out
// of the uptime string, memory figures from the meminfo list, and traffic
// rates that need the previous cycle's counters.

pub mod load;
pub mod memory;
pub mod rate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Snapshot;

pub use load::{LoadAverage, parse_load_average};
pub use memory::{MemoryUsage, parse_memory};
pub use rate::{RateState, bandwidth_rate};

pub const UPTIME_FIELD: &str = "uptime";
pub const MEMINFO_FIELD: &str = "mem_info";
pub const TRAFFIC_IN_FIELD: &str = "ttraff_in";
pub const TRAFFIC_OUT_FIELD: &str = "ttraff_out";

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rate state for the two WAN traffic counters.
#[derive(Debug, Clone, Default)]
pub struct TrafficRates {
    pub inbound: RateState,
    pub outbound: RateState,
}

impl TrafficRates {
    /// Feed both counters from `snapshot` into their rate states.
    ///
    /// A counter that is missing or not numeric reports `None` and leaves
    /// its state untouched.
    pub fn sample(&mut self, snapshot: &Snapshot, now: DateTime<Utc>) -> (Option<f64>, Option<f64>) {
        let inbound = counter(snapshot, TRAFFIC_IN_FIELD)
            .map(|v| bandwidth_rate(&mut self.inbound, v, now));
        let outbound = counter(snapshot, TRAFFIC_OUT_FIELD)
            .map(|v| bandwidth_rate(&mut self.outbound, v, now));
        (inbound, outbound)
    }
}

/// Numeric counter value. Placeholder tokens and non-finite numbers are absent.
fn counter(snapshot: &Snapshot, key: &str) -> Option<f64> {
    crate::normalize::clean(snapshot.scalar(key)?)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Every derived metric for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub load: Option<LoadAverage>,
    pub memory: MemoryUsage,
    /// Inbound WAN rate, KiB/s.
    pub rate_in_kbps: Option<f64>,
    /// Outbound WAN rate, KiB/s.
    pub rate_out_kbps: Option<f64>,
}

impl DerivedMetrics {
    /// Compute all metrics, advancing the traffic rate states.
    pub fn compute(snapshot: &Snapshot, rates: &mut TrafficRates, now: DateTime<Utc>) -> Self {
        let load = snapshot.scalar(UPTIME_FIELD).and_then(parse_load_average);
        let memory = snapshot
            .list(MEMINFO_FIELD)
            .map(parse_memory)
            .unwrap_or_default();
        let (rate_in_kbps, rate_out_kbps) = rates.sample(snapshot, now);

        Self {
            load,
            memory,
            rate_in_kbps,
            rate_out_kbps,
        }
    }

    /// Flat `name -> value` view for key/value consumers.
    #[allow(clippy::cast_precision_loss)]
    pub fn named(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("load_1min", self.load.map(|l| l.one)),
            ("load_5min", self.load.map(|l| l.five)),
            ("load_15min", self.load.map(|l| l.fifteen)),
            ("mem_total_kb", self.memory.total_kb.map(|v| v as f64)),
            ("mem_free_kb", self.memory.free_kb.map(|v| v as f64)),
            ("mem_used_kb", self.memory.used_kb.map(|v| v as f64)),
            ("mem_used_percent", self.memory.used_percent),
            ("rate_in_kbps", self.rate_in_kbps),
            ("rate_out_kbps", self.rate_out_kbps),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::model::Snapshot;
    use chrono::{Duration, TimeZone};

    fn snapshot(page: &str) -> Snapshot {
        decode(page).into_iter().collect()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn computes_everything_from_one_page() {
        let snap = snapshot(
            "{uptime:: 12:17:59 up 134 days, load average: 0.10, 0.05, 0.01}\
             {mem_info::'MemTotal:','131072','kB','MemFree:','65536','kB'}\
             {ttraff_in::100}{ttraff_out::40}",
        );
        let mut rates = TrafficRates::default();
        let first = DerivedMetrics::compute(&snap, &mut rates, t0());

        assert_eq!(first.load.map(|l| l.five), Some(0.05));
        assert_eq!(first.memory.used_percent, Some(50.0));
        assert_eq!(first.rate_in_kbps, Some(0.0));
        assert_eq!(first.rate_out_kbps, Some(0.0));

        let next = snapshot("{ttraff_in::150}{ttraff_out::41}");
        let second = DerivedMetrics::compute(&next, &mut rates, t0() + Duration::seconds(1));
        assert_eq!(second.rate_in_kbps, Some(51_200.0));
        assert_eq!(second.rate_out_kbps, Some(1024.0));
        assert!(second.load.is_none());
        assert_eq!(second.memory, MemoryUsage::default());
    }

    #[test]
    fn missing_counter_leaves_state_alone() {
        let mut rates = TrafficRates::default();
        let (inbound, outbound) = rates.sample(&snapshot("{ttraff_in::n.a.}"), t0());
        assert_eq!(inbound, None);
        assert_eq!(outbound, None);
        assert_eq!(rates.inbound, RateState::default());
    }

    #[test]
    fn non_numeric_counter_tokens_are_absent() {
        let mut rates = TrafficRates::default();
        let (nan, inf) = rates.sample(&snapshot("{ttraff_in::nan}{ttraff_out::inf}"), t0());
        assert_eq!(nan, None);
        assert_eq!(inf, None);
        assert_eq!(rates.inbound, RateState::default());
        assert_eq!(rates.outbound, RateState::default());

        let (first, _) = rates.sample(&snapshot("{ttraff_in::150}"), t0() + Duration::seconds(1));
        assert_eq!(first, Some(0.0));
        let (second, _) =
            rates.sample(&snapshot("{ttraff_in::&nbsp;250}"), t0() + Duration::seconds(2));
        assert_eq!(second, Some(102_400.0));
    }

    #[test]
    fn named_view_lists_every_metric() {
        let names: Vec<_> = DerivedMetrics::default()
            .named()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"mem_used_percent"));
    }

    #[test]
    fn rounding() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
        assert_eq!(round1(0.0), 0.0);
    }
}
