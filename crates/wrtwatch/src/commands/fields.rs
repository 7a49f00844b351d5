//! `fields`: every decoded field from one poll.

use serde::Serialize;
use tabled::Tabled;

use wrtwatch_core::{FieldValue, Monitor};

use crate::cli::{FieldsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct FieldEntry {
    name: String,
    value: FieldValue,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Display form: scalars normalized, lists joined.
fn cleaned(name: &str, value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Scalar(raw) => {
            FieldValue::Scalar(wrtwatch_core::normalize(name, raw).unwrap_or_default())
        }
        FieldValue::List(items) => FieldValue::List(
            items
                .iter()
                .map(|i| i.trim().to_owned())
                .filter(|i| !i.is_empty())
                .collect(),
        ),
    }
}

fn cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Scalar(s) => s.clone(),
        FieldValue::List(items) => items.join(", "),
    }
}

pub async fn handle(monitor: &Monitor, args: FieldsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = util::poll(monitor).await?;

    let entries: Vec<FieldEntry> = snapshot
        .iter()
        .filter(|(name, _)| args.filter.as_deref().is_none_or(|f| name.contains(f)))
        .map(|(name, value)| FieldEntry {
            name: name.to_owned(),
            value: if args.raw {
                value.clone()
            } else {
                cleaned(name, value)
            },
        })
        .collect();

    let raw = args.raw;
    let out = output::render_list(
        global.output,
        &entries,
        |e| FieldRow {
            name: e.name.clone(),
            value: if raw { util::raw_value(&e.value) } else { cell(&e.value) },
        },
        |e| format!("{}={}", e.name, util::raw_value(&e.value)),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaned_normalizes_scalars_and_drops_blank_items() {
        let ip = cleaned("wan_ipaddr", &FieldValue::Scalar("1.2.3.4/24".into()));
        assert_eq!(ip, FieldValue::Scalar("1.2.3.4".into()));

        let list = cleaned("arp_table", &FieldValue::List(vec!["a".into(), " ".into()]));
        assert_eq!(list, FieldValue::List(vec!["a".into()]));

        let absent = cleaned("wan_gateway", &FieldValue::Scalar("n.a.".into()));
        assert_eq!(absent, FieldValue::Scalar(String::new()));
    }
}
