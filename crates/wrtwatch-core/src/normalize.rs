// ── Field normalizer ──
//
// Turns raw scalar payloads into display values. Rules are keyed by field
// name: a field with no specific rule only gets the common cleanup.
// Nothing here mutates the snapshot; callers normalize on access.

use std::sync::LazyLock;

use regex::Regex;

/// First run of digits with an optional fractional part.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\d+(?:\.\d+)?").unwrap()
});

/// Leading text label such as `IP:`.
static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z][A-Za-z ]*:\s*").unwrap()
});

/// Placeholder tokens the firmware prints for "no value".
const ABSENT_TOKENS: [&str; 4] = ["n.a", "n.a.", "nan", "unknown"];

/// Normalization rule for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Common cleanup only.
    Plain,
    /// `a.b.c.d/nn`: keep the address.
    IpWithPrefix,
    /// `hh:mm:ss up <duration>, ..., load average: ...`: keep the duration.
    Uptime,
    /// `<duration>, <rest>`: keep the duration.
    SecondaryUptime,
    /// `51.2 °C`: keep the number.
    Temperature,
    /// `IP: 10.0.0.1`: drop the label.
    LabelledInfo,
}

impl FieldKind {
    pub fn for_field(name: &str) -> Self {
        match name {
            "wan_ipaddr" | "lan_ip" => Self::IpWithPrefix,
            "uptime" => Self::Uptime,
            "wan_uptime" => Self::SecondaryUptime,
            "ipinfo" => Self::LabelledInfo,
            n if n.starts_with("cpu_temp") || n.starts_with("wl_temp") => Self::Temperature,
            _ => Self::Plain,
        }
    }
}

/// Strip HTML non-breaking spaces and surrounding whitespace, and map
/// placeholder tokens (and empty text) to `None`.
pub fn clean(raw: &str) -> Option<String> {
    let text = raw.replace("&nbsp;", " ").replace("&#160;", " ");
    let text = text.trim();
    if text.is_empty() || is_absent_token(text) {
        None
    } else {
        Some(text.to_owned())
    }
}

fn is_absent_token(text: &str) -> bool {
    ABSENT_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t))
}

/// Display value for a scalar field, or `None` when it carries nothing.
pub fn normalize(name: &str, raw: &str) -> Option<String> {
    let text = clean(raw)?;
    let shaped = match FieldKind::for_field(name) {
        FieldKind::Plain => return Some(text),
        FieldKind::IpWithPrefix => before(&text, '/').to_owned(),
        FieldKind::Uptime => uptime_duration(&text).to_owned(),
        FieldKind::SecondaryUptime => before(&text, ',').to_owned(),
        FieldKind::Temperature => NUMBER.find(&text)?.as_str().to_owned(),
        FieldKind::LabelledInfo => LABEL.replace(&text, "").into_owned(),
    };
    clean(&shaped)
}

fn before(text: &str, sep: char) -> &str {
    text.split_once(sep).map_or(text, |(head, _)| head)
}

/// Segment between `" up "` and the next comma; the whole text when the
/// marker is missing.
fn uptime_duration(text: &str) -> &str {
    match text.split_once(" up ") {
        Some((_, rest)) => before(rest, ','),
        None => text,
    }
}
