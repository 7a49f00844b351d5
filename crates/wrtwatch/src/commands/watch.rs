//! `watch`: poll on an interval and print one line per cycle.
//!
//! A failed cycle is logged and skipped; only rejected credentials stop
//! the loop. Ctrl-C ends it cleanly.

use std::time::Duration;

use bytesize::ByteSize;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use wrtwatch_core::{CoreError, DerivedMetrics, Monitor};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Sample {
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    metrics: DerivedMetrics,
    wan_connected: Option<bool>,
    devices: usize,
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.1}"))
}

fn line(sample: &Sample) -> String {
    let load = sample.metrics.load.map_or_else(
        || "-".into(),
        |l| format!("{:.2} {:.2} {:.2}", l.one, l.five, l.fifteen),
    );
    let mem = match (sample.metrics.memory.used_percent, sample.metrics.memory.free_kb) {
        (Some(pct), Some(free)) => format!("{pct:.1}% ({} free)", ByteSize::kib(free)),
        (Some(pct), None) => format!("{pct:.1}%"),
        _ => "-".into(),
    };
    format!(
        "{}  load {load}  mem {mem}  down {} KiB/s  up {} KiB/s  devices {}",
        sample.timestamp.with_timezone(&Local).format("%H:%M:%S"),
        fmt_opt(sample.metrics.rate_in_kbps),
        fmt_opt(sample.metrics.rate_out_kbps),
        sample.devices,
    )
}

fn render(sample: &Sample, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table => line(sample),
        // One JSON object per line so the stream stays parseable
        OutputFormat::Json | OutputFormat::JsonCompact => serde_json::to_string(sample)?,
        OutputFormat::Yaml => format!("---\n{}", serde_yaml::to_string(sample)?),
        OutputFormat::Plain => sample
            .metrics
            .named()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", v.map(|v| v.to_string()).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(" "),
    })
}

async fn cycle(monitor: &Monitor) -> Result<Sample, CoreError> {
    let snapshot = monitor.refresh().await?;
    let now = Utc::now();
    let metrics = monitor.metrics(&snapshot, now).await;
    Ok(Sample {
        timestamp: now,
        metrics,
        wan_connected: monitor.status(&snapshot).wan_connected,
        devices: monitor.devices(&snapshot).len(),
    })
}

pub async fn handle(monitor: &Monitor, args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let period = args
        .interval
        .map_or_else(|| monitor.config().poll_interval(), |s| Duration::from_secs(s.max(1)));
    info!(interval = %humantime::format_duration(period), "watching {}", monitor.config().url);

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut done = 0_u64;
    loop {
        if args.count.is_some_and(|max| done >= max) {
            return Ok(());
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                return Ok(());
            }
        }

        match cycle(monitor).await {
            Ok(sample) => output::print_output(&render(&sample, global.output)?, global.quiet),
            Err(e) if e.is_auth() => return Err(e.into()),
            Err(e) => warn!(error = %e, "poll cycle failed"),
        }
        done += 1;
    }
}
