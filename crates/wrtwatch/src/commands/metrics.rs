//! `metrics`: derived load, memory, and WAN throughput.
//!
//! Throughput needs two counter samples, so this polls twice `--sample`
//! seconds apart (once when the sample window is zero).

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tabled::Tabled;

use wrtwatch_core::{DerivedMetrics, Monitor, catalog};

use crate::cli::{GlobalOpts, MetricsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
pub struct MetricEntry {
    pub name: &'static str,
    pub value: Option<f64>,
    pub unit: Option<&'static str>,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn unit_for(name: &str) -> Option<&'static str> {
    match name {
        "mem_total_kb" | "mem_free_kb" | "mem_used_kb" => Some("kB"),
        "mem_used_percent" => Some("%"),
        other => catalog::lookup(other).and_then(|s| s.unit),
    }
}

pub fn entries(metrics: &DerivedMetrics) -> Vec<MetricEntry> {
    metrics
        .named()
        .into_iter()
        .map(|(name, value)| MetricEntry {
            name,
            value,
            unit: unit_for(name),
        })
        .collect()
}

pub async fn handle(monitor: &Monitor, args: MetricsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let first = util::poll(monitor).await?;
    let mut metrics = monitor.metrics(&first, Utc::now()).await;

    if args.sample > 0 {
        tokio::time::sleep(Duration::from_secs(args.sample)).await;
        let second = util::poll(monitor).await?;
        metrics = monitor.metrics(&second, Utc::now()).await;
    }

    let data = entries(&metrics);
    let out = output::render_list(
        global.output,
        &data,
        |e| MetricRow {
            name: e.name,
            value: util::with_unit(e.value, e.unit),
        },
        |e| format!("{}={}", e.name, e.value.map(|v| v.to_string()).unwrap_or_default()),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_has_an_entry() {
        let data = entries(&DerivedMetrics::default());
        assert_eq!(data.len(), 9);
        assert!(data.iter().all(|e| e.value.is_none()));
        let rate = data.iter().find(|e| e.name == "rate_in_kbps");
        assert_eq!(rate.and_then(|e| e.unit), Some("KiB/s"));
        let pct = data.iter().find(|e| e.name == "mem_used_percent");
        assert_eq!(pct.and_then(|e| e.unit), Some("%"));
    }
}
