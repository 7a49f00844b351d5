//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one line per item.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// `yes` / `no` / `-` for a tri-state flag, colored when enabled.
pub fn flag(value: Option<bool>, color: bool) -> String {
    match (value, color) {
        (Some(true), true) => "yes".green().to_string(),
        (Some(false), true) => "no".red().to_string(),
        (Some(true), false) => "yes".into(),
        (Some(false), false) => "no".into(),
        (None, _) => "-".into(),
    }
}

/// Placeholder for a missing value in tables.
pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `line_fn` on each item to emit one line per item
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&line_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, which returns a pre-formatted string.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(plain_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// `label: value` lines, labels padded to a common width.
pub(crate) fn render_pairs(pairs: &[(String, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
        value: u32,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn items() -> Vec<Item> {
        vec![Item { name: "a", value: 1 }, Item { name: "b", value: 2 }]
    }

    #[test]
    fn plain_is_one_line_per_item() {
        let out = render_list(
            OutputFormat::Plain,
            &items(),
            |i| Row { name: i.name.into() },
            |i| format!("{}={}", i.name, i.value),
        )
        .unwrap();
        assert_eq!(out, "a=1\nb=2");
    }

    #[test]
    fn compact_json() {
        let out = render_list(OutputFormat::JsonCompact, &items(), |i| Row { name: i.name.into() }, |_| String::new())
            .unwrap();
        assert_eq!(out, r#"[{"name":"a","value":1},{"name":"b","value":2}]"#);
    }

    #[test]
    fn table_has_header() {
        let out = render_list(OutputFormat::Table, &items(), |i| Row { name: i.name.into() }, |_| String::new())
            .unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains('b'));
    }

    #[test]
    fn pairs_are_aligned() {
        let out = render_pairs(&[("WAN IP".into(), "1.2.3.4".into()), ("Uptime".into(), "x".into())]);
        assert_eq!(out, "WAN IP  1.2.3.4\nUptime  x");
    }

    #[test]
    fn flags_without_color() {
        assert_eq!(flag(Some(true), false), "yes");
        assert_eq!(flag(None, true), "-");
    }
}
