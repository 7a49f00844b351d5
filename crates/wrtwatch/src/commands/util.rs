//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use wrtwatch_core::{FieldValue, Monitor, Snapshot};

use crate::error::CliError;

/// Run one poll cycle and return the fresh snapshot.
pub async fn poll(monitor: &Monitor) -> Result<Arc<Snapshot>, CliError> {
    Ok(monitor.refresh().await?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Single-line rendering of a raw field value.
pub fn raw_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Scalar(s) => s.clone(),
        FieldValue::List(items) => items
            .iter()
            .map(|i| format!("'{i}'"))
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Format a metric value with its unit, `-` when unknown.
pub fn with_unit(value: Option<f64>, unit: Option<&str>) -> String {
    match (value, unit) {
        (Some(v), Some(u)) => format!("{v} {u}"),
        (Some(v), None) => v.to_string(),
        (None, _) => "-".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_quotes_lists() {
        let list = FieldValue::List(vec!["a".into(), String::new()]);
        assert_eq!(raw_value(&list), "'a',''");
        assert_eq!(raw_value(&FieldValue::Scalar("x".into())), "x");
    }

    #[test]
    fn units() {
        assert_eq!(with_unit(Some(1.5), Some("KiB/s")), "1.5 KiB/s");
        assert_eq!(with_unit(Some(2.0), None), "2");
        assert_eq!(with_unit(None, Some("kB")), "-");
    }
}
