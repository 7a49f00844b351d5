// ── MacAddress ──
//
// Router tables spell MACs in upper or lower case; everything keyed by MAC
// goes through this type so lookups are case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MAC address, normalized to uppercase colon-separated form (AA:BB:CC:DD:EE:FF).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MacAddress(String);

#[derive(Debug, Error)]
#[error("not a colon-separated MAC address: {0:?}")]
pub struct InvalidMac(String);

impl MacAddress {
    /// Parse a token in the canonical six-group colon-hex shape.
    ///
    /// Returns `None` for anything else, including dash-separated or bare
    /// hex forms, since router tables only ever use colons.
    pub fn parse(token: &str) -> Option<Self> {
        is_mac(token).then(|| Self(token.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw table token.
    pub fn matches(&self, token: &str) -> bool {
        self.0.eq_ignore_ascii_case(token.trim())
    }
}

/// `true` if `token` is exactly 17 chars of six two-hex-digit groups
/// joined by five colons.
pub fn is_mac(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 17
        && bytes.iter().enumerate().all(|(i, b)| {
            if i % 3 == 2 {
                *b == b':'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = InvalidMac;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| InvalidMac(s.to_owned()))
    }
}
