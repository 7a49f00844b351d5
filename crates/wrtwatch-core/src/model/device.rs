// ── Tracked device types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::mac::MacAddress;

/// Which router table a device was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceSource {
    Wireless,
    Dhcp,
}

/// A device seen by the router during one extraction pass.
///
/// Derived from the snapshot on every access and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub mac: MacAddress,
    pub source: DeviceSource,
    /// Interface the device was seen on (`wl0`, `br0`, ...), if the table had one.
    pub interface: Option<String>,
    pub display_name: String,
    /// Lease address. Only DHCP entries carry one.
    pub ip: Option<String>,
}

impl DeviceRecord {
    /// Name used when the source table has no hostname.
    pub fn placeholder_name(mac: &MacAddress) -> String {
        format!("Device {mac}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_lowercase_source_and_uppercase_mac() {
        let mac = MacAddress::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let record = DeviceRecord {
            display_name: DeviceRecord::placeholder_name(&mac),
            mac,
            source: DeviceSource::Dhcp,
            interface: Some("br0".into()),
            ip: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["mac"], "AA:BB:CC:DD:EE:FF");
        assert_eq!(json["source"], "dhcp");
        assert_eq!(json["display_name"], "Device AA:BB:CC:DD:EE:FF");
        assert!(json["ip"].is_null());
    }
}
