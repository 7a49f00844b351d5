// ── Load averages ──

use serde::{Deserialize, Serialize};

const MARKER: &str = "load average:";

/// 1/5/15-minute load averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Parse load averages out of a raw `uptime` value.
///
/// Expects `... load average: a, b, c`. A missing marker or any token that
/// doesn't parse yields `None` for all three.
pub fn parse_load_average(uptime: &str) -> Option<LoadAverage> {
    let (_, rest) = uptime.split_once(MARKER)?;
    let mut tokens = rest.split(',').map(|t| t.trim().parse::<f64>());
    let one = tokens.next()?.ok()?;
    let five = tokens.next()?.ok()?;
    let fifteen = tokens.next()?.ok()?;
    Some(LoadAverage { one, five, fifteen })
}
