// ── Live-page micro-format decoder ──
//
// DD-WRT `*.live.asp` pages embed status fields as `{name::payload}`.
// A payload is either a bare scalar or a JS-ish list of single-quoted
// strings (`'a','b','c'`). Decoding never fails: anything that doesn't
// match the pattern is simply not a field.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{FieldMap, FieldValue};

/// `{identifier::payload}` where the payload runs up to the next `}`.
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\{(\w+)::([^}]*)\}").unwrap()
});

/// One single-quoted item inside a list payload.
static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"'([^']*)'").unwrap()
});

/// Decode every `{name::payload}` field in a page body.
///
/// Duplicate names keep the last occurrence. Empty or unrelated text yields
/// an empty map.
pub fn decode(text: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for cap in FIELD.captures_iter(text) {
        let (Some(name), Some(payload)) = (cap.get(1), cap.get(2)) else {
            continue;
        };
        fields.insert(name.as_str().to_owned(), decode_payload(payload.as_str()));
    }
    fields
}

/// Decode a single payload into a scalar or list.
///
/// A list payload with no complete `'...'` pair (e.g. an unterminated
/// quote) comes back as a one-element list holding the raw trimmed text.
pub fn decode_payload(payload: &str) -> FieldValue {
    let payload = payload.trim();
    if !payload.starts_with('\'') {
        return FieldValue::Scalar(payload.to_owned());
    }

    let items: Vec<String> = QUOTED
        .captures_iter(payload)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_owned()))
        .collect();

    if items.is_empty() {
        FieldValue::List(vec![payload.to_owned()])
    } else {
        FieldValue::List(items)
    }
}
