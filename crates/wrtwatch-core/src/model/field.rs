// ── Decoded field values ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One decoded `{key::value}` payload.
///
/// A payload that starts with a single quote is a JS-style list of quoted
/// strings; everything else is kept verbatim as a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_owned())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Fields decoded from a single page.
pub type FieldMap = HashMap<String, FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_json_shapes() {
        let scalar = serde_json::to_string(&FieldValue::from("dhcp")).unwrap_or_default();
        assert_eq!(scalar, "\"dhcp\"");

        let list = FieldValue::List(vec!["br0".into(), "wl0".into()]);
        assert_eq!(serde_json::to_string(&list).unwrap_or_default(), "[\"br0\",\"wl0\"]");
    }
}
