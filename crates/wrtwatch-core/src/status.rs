// ── Status flags ──
//
// Two on/off indicators derived from free-text status fields. `None`
// means the router didn't report the field this cycle.

use serde::{Deserialize, Serialize};

use crate::model::Snapshot;

pub const WAN_STATUS_FIELD: &str = "wan_status";
pub const RADIO_FIELD: &str = "wl_radio";

/// `wan_status` reads e.g. `Connected <a href=...>` or `Disconnected`.
pub fn wan_connected(snapshot: &Snapshot) -> Option<bool> {
    let raw = snapshot.scalar(WAN_STATUS_FIELD)?;
    Some(raw.trim().to_lowercase().starts_with("connected"))
}

/// `wl_radio` is `Radio is On` on some builds and `active` on others; only
/// the latter is treated as on.
pub fn radio_active(snapshot: &Snapshot) -> Option<bool> {
    let raw = snapshot.scalar(RADIO_FIELD)?;
    Some(raw.trim().eq_ignore_ascii_case("active"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    pub wan_connected: Option<bool>,
    pub radio_active: Option<bool>,
}

impl StatusFlags {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            wan_connected: wan_connected(snapshot),
            radio_active: radio_active(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;

    fn snap(page: &str) -> Snapshot {
        decode(page).into_iter().collect()
    }

    #[test]
    fn wan_status_prefix() {
        assert_eq!(wan_connected(&snap("{wan_status::Connected <a>}")), Some(true));
        assert_eq!(wan_connected(&snap("{wan_status:: connected}")), Some(true));
        assert_eq!(wan_connected(&snap("{wan_status::Disconnected}")), Some(false));
        assert_eq!(wan_connected(&snap("{uptime::x}")), None);
    }

    #[test]
    fn radio_exact_match() {
        assert_eq!(radio_active(&snap("{wl_radio::active}")), Some(true));
        assert_eq!(radio_active(&snap("{wl_radio::Radio is On}")), Some(false));
        assert_eq!(radio_active(&snap("")), None);
    }

    #[test]
    fn flags_from_snapshot() {
        let flags = StatusFlags::from_snapshot(&snap("{wan_status::Connected}"));
        assert_eq!(
            flags,
            StatusFlags {
                wan_connected: Some(true),
                radio_active: None,
            }
        );
    }
}
