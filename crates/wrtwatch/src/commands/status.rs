//! `status`: one poll, the catalog fields, and the two status flags.

use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

use wrtwatch_core::catalog::{self, FieldSpec};
use wrtwatch_core::{DerivedMetrics, Monitor, Snapshot};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct StatusView {
    router: String,
    fields: IndexMap<&'static str, Option<String>>,
    wan_connected: Option<bool>,
    radio_active: Option<bool>,
    devices: usize,
}

/// Rates need two samples; a single status poll can't produce them.
fn shown(spec: &FieldSpec) -> bool {
    !spec.key.starts_with("rate_")
}

fn value_for(key: &str, snapshot: &Snapshot, metrics: &DerivedMetrics) -> Option<String> {
    metrics
        .named()
        .into_iter()
        .find(|(name, _)| *name == key)
        .map_or_else(|| snapshot.display_value(key), |(_, v)| v.map(|v| v.to_string()))
}

fn build(monitor: &Monitor, snapshot: &Snapshot, metrics: &DerivedMetrics) -> StatusView {
    let flags = monitor.status(snapshot);
    StatusView {
        router: monitor.config().url.to_string(),
        fields: catalog::FIELDS
            .iter()
            .filter(|s| shown(s))
            .map(|s| (s.key, value_for(s.key, snapshot, metrics)))
            .collect(),
        wan_connected: flags.wan_connected,
        radio_active: flags.radio_active,
        devices: monitor.devices(snapshot).len(),
    }
}

fn detail(view: &StatusView, color: bool) -> String {
    let mut pairs = vec![("Router".to_owned(), view.router.clone())];
    for (key, value) in &view.fields {
        let unit = catalog::lookup(key).and_then(|s| s.unit);
        let shown = match (value, unit) {
            (Some(v), Some(u)) => format!("{v} {u}"),
            (Some(v), None) => v.clone(),
            (None, _) => "-".into(),
        };
        pairs.push((catalog::label_for(key), shown));
    }
    pairs.push(("Internet Connection".into(), output::flag(view.wan_connected, color)));
    pairs.push(("Wi-Fi Radio".into(), output::flag(view.radio_active, color)));
    pairs.push(("Devices".into(), view.devices.to_string()));
    output::render_pairs(&pairs)
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = util::poll(monitor).await?;
    let metrics = monitor.metrics(&snapshot, Utc::now()).await;
    let view = build(monitor, &snapshot, &metrics);

    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &view,
        |v| detail(v, color),
        |v| {
            v.fields
                .iter()
                .map(|(k, val)| format!("{k}={}", val.as_deref().unwrap_or("")))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
