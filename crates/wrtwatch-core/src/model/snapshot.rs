// ── Poll-cycle snapshot ──
//
// The merged field map of one poll cycle. Built by the aggregator,
// published behind an `Arc`, and never mutated afterwards: the next cycle
// replaces it wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::FieldValue;

/// Merged result of every page polled in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    fields: BTreeMap<String, FieldValue>,
}

impl Snapshot {
    pub(crate) fn from_fields(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Raw scalar value, before any normalization.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    /// Raw list value.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_list)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Display-ready value of a scalar field (see [`crate::normalize`]).
    ///
    /// `None` when the field is missing, is a list, or normalizes to
    /// nothing.
    pub fn display_value(&self, key: &str) -> Option<String> {
        self.scalar(key)
            .and_then(|raw| crate::normalize::normalize(key, raw))
    }
}

impl FromIterator<(String, FieldValue)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        [
            ("wan_ipaddr".to_owned(), FieldValue::from("203.0.113.7/24")),
            (
                "arp_table".to_owned(),
                FieldValue::from(vec!["host".to_owned(), "10.0.0.2".to_owned()]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn scalar_and_list_accessors_respect_variant() {
        let snap = sample();
        assert_eq!(snap.scalar("wan_ipaddr"), Some("203.0.113.7/24"));
        assert!(snap.list("wan_ipaddr").is_none());
        assert_eq!(snap.list("arp_table").map(<[String]>::len), Some(2));
        assert!(snap.scalar("arp_table").is_none());
    }

    #[test]
    fn display_value_normalizes_lazily() {
        let snap = sample();
        assert_eq!(snap.display_value("wan_ipaddr").as_deref(), Some("203.0.113.7"));
        // The raw value is untouched.
        assert_eq!(snap.scalar("wan_ipaddr"), Some("203.0.113.7/24"));
    }

    #[test]
    fn iteration_is_key_ordered() {
        let keys: Vec<_> = sample().iter().map(|(k, _)| k.to_owned()).collect();
        assert_eq!(keys, vec!["arp_table", "wan_ipaddr"]);
    }
}
