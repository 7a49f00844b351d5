// ── Bandwidth rate ──
//
// The router only exposes cumulative traffic counters (`ttraff_in`,
// `ttraff_out`, in megabytes). A rate needs the previous sample, so each
// counter carries a `RateState` across poll cycles.

use chrono::{DateTime, Utc};

/// Carried-forward sample for one counter.
///
/// Starts empty; never resets on its own. A counter decrease (rollover or
/// router reboot) re-bases it on the new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateState {
    last_value: Option<f64>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_timestamp
    }

    fn record(&mut self, value: f64, at: DateTime<Utc>) {
        self.last_value = Some(value);
        self.last_timestamp = Some(at);
    }
}

/// Rate in KiB/s for a megabyte counter, advancing `state`.
///
/// - first sample: records it, reports 0
/// - no time elapsed (or clock went backwards): reports 0, state untouched
/// - counter went down: re-bases on the new value, reports 0
/// - otherwise: `delta * 1024 / seconds`, rounded to one decimal
pub fn bandwidth_rate(state: &mut RateState, current: f64, now: DateTime<Utc>) -> f64 {
    let (Some(previous), Some(since)) = (state.last_value, state.last_timestamp) else {
        state.record(current, now);
        return 0.0;
    };

    let elapsed = seconds_between(since, now);
    if elapsed <= 0.0 {
        return 0.0;
    }

    let delta = current - previous;
    state.record(current, now);
    if delta < 0.0 {
        return 0.0;
    }

    super::round1(delta * 1024.0 / elapsed)
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0)
            .single()
            .unwrap_or_default()
    }

    fn run(samples: &[(f64, i64)]) -> Vec<f64> {
        let mut state = RateState::new();
        samples
            .iter()
            .map(|&(v, secs)| bandwidth_rate(&mut state, v, t0() + Duration::seconds(secs)))
            .collect()
    }

    #[test]
    fn first_sample_reports_zero_then_rate() {
        assert_eq!(run(&[(100.0, 0), (150.0, 1)]), vec![0.0, 51_200.0]);
    }

    #[test]
    fn rollover_rebases() {
        assert_eq!(
            run(&[(200.0, 0), (50.0, 1), (80.0, 2)]),
            vec![0.0, 0.0, 30_720.0]
        );
    }

    #[test]
    fn zero_elapsed_is_a_no_op_tick() {
        let mut state = RateState::new();
        assert_eq!(bandwidth_rate(&mut state, 10.0, t0()), 0.0);
        assert_eq!(bandwidth_rate(&mut state, 20.0, t0()), 0.0);
        assert_eq!(state.last_value(), Some(10.0));
        // Next real tick measures from the original sample.
        assert_eq!(
            bandwidth_rate(&mut state, 20.0, t0() + Duration::seconds(10)),
            1024.0
        );
    }

    #[test]
    fn rate_is_rounded_to_one_decimal() {
        // 1 MB over 3 s = 341.333.. KiB/s
        assert_eq!(run(&[(0.0, 0), (1.0, 3)]), vec![0.0, 341.3]);
    }

    #[test]
    fn flat_counter_reports_zero_and_advances() {
        let mut state = RateState::new();
        bandwidth_rate(&mut state, 5.0, t0());
        let later = t0() + Duration::seconds(60);
        assert_eq!(bandwidth_rate(&mut state, 5.0, later), 0.0);
        assert_eq!(state.last_timestamp(), Some(later));
    }
}
