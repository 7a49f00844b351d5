// ── Device extraction ──
//
// Rebuilds per-device records from the router's flat client tables. Neither
// table has a usable schema, so both parsers key off MAC-shaped tokens and
// read neighbours by position. Everything here is a pure function of the
// input lists and the interface allow-list.

use indexmap::IndexMap;

use crate::model::{DeviceRecord, DeviceSource, MacAddress, Snapshot};

pub const ACTIVE_WIRELESS_FIELD: &str = "active_wireless";
pub const DHCP_LEASES_FIELD: &str = "dhcp_leases";
pub const ARP_TABLE_FIELD: &str = "arp_table";

/// `true` when the device's interface passes the allow-list.
///
/// An empty allow-list accepts everything, and so does an unknown
/// interface.
fn allowed(interface: Option<&str>, allow_list: &[String]) -> bool {
    match interface {
        Some(iface) => allow_list.is_empty() || allow_list.iter().any(|a| a == iface),
        None => true,
    }
}

fn non_empty(token: Option<&String>) -> Option<String> {
    token
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

// ── Wireless clients ────────────────────────────────────────────────

/// Tokens seen after a MAC, up to the next one.
struct Run<'a> {
    mac: MacAddress,
    attrs: Vec<&'a String>,
}

impl Run<'_> {
    fn into_record(self) -> DeviceRecord {
        // Attribute runs look like: '', 'wl0', '8:20:00', '5.500M', ...
        let interface = non_empty(self.attrs.get(1).copied());
        DeviceRecord {
            display_name: DeviceRecord::placeholder_name(&self.mac),
            mac: self.mac,
            source: DeviceSource::Wireless,
            interface,
            ip: None,
        }
    }
}

/// Parse the `active_wireless` list.
///
/// Every MAC token opens a new client; the tokens that follow belong to it.
/// Tokens before the first MAC are ignored. The interface is the second
/// attribute of the run.
pub fn parse_wireless_clients(raw: &[String], allow_list: &[String]) -> Vec<DeviceRecord> {
    let (mut runs, last) = raw.iter().fold(
        (Vec::new(), None::<Run<'_>>),
        |(mut runs, current), token| match MacAddress::parse(token) {
            Some(mac) => {
                runs.extend(current);
                (runs, Some(Run { mac, attrs: Vec::new() }))
            }
            None => {
                let current = current.map(|mut run| {
                    run.attrs.push(token);
                    run
                });
                (runs, current)
            }
        },
    );
    runs.extend(last);

    runs.into_iter()
        .map(Run::into_record)
        .filter(|d| allowed(d.interface.as_deref(), allow_list))
        .collect()
}

// ── DHCP leases ─────────────────────────────────────────────────────

/// Parse the `dhcp_leases` list.
///
/// Leases are 7-token records (name, IP, MAC, type, id, interface, blank).
/// For a MAC at index `i`: name is `i-2`, IP `i-1`, interface `i+3`.
/// Out-of-range neighbours are treated as unknown.
pub fn parse_dhcp_leases(raw: &[String], allow_list: &[String]) -> Vec<DeviceRecord> {
    raw.iter()
        .enumerate()
        .filter_map(|(i, token)| {
            let mac = MacAddress::parse(token)?;
            let at = |offset: isize| i.checked_add_signed(offset).and_then(|j| raw.get(j));

            let interface = non_empty(at(3));
            if !allowed(interface.as_deref(), allow_list) {
                return None;
            }

            let display_name = non_empty(at(-2))
                .filter(|n| n != "*")
                .unwrap_or_else(|| DeviceRecord::placeholder_name(&mac));

            Some(DeviceRecord {
                ip: non_empty(at(-1)),
                mac,
                source: DeviceSource::Dhcp,
                interface,
                display_name,
            })
        })
        .collect()
}

// ── Merge ───────────────────────────────────────────────────────────

/// Merge both tables into one record per MAC.
///
/// Wireless entries go in first and the first record for a MAC wins, so a
/// lease for an already-seen wireless client is dropped.
pub fn extract_devices(
    wireless: Option<&[String]>,
    dhcp: Option<&[String]>,
    allow_list: &[String],
) -> Vec<DeviceRecord> {
    let mut by_mac: IndexMap<MacAddress, DeviceRecord> = IndexMap::new();

    let wireless = wireless
        .map(|raw| parse_wireless_clients(raw, allow_list))
        .unwrap_or_default();
    let leases = dhcp
        .map(|raw| parse_dhcp_leases(raw, allow_list))
        .unwrap_or_default();

    for record in wireless.into_iter().chain(leases) {
        by_mac.entry(record.mac.clone()).or_insert(record);
    }
    by_mac.into_values().collect()
}

/// Devices in a snapshot, filtered by the allow-list.
pub fn devices_in(snapshot: &Snapshot, allow_list: &[String]) -> Vec<DeviceRecord> {
    extract_devices(
        snapshot.list(ACTIVE_WIRELESS_FIELD),
        snapshot.list(DHCP_LEASES_FIELD),
        allow_list,
    )
}

/// Whether a MAC is currently associated or present in the ARP table.
///
/// A DHCP lease alone doesn't count: leases outlive the connection.
pub fn is_connected(snapshot: &Snapshot, mac: &MacAddress) -> bool {
    [ACTIVE_WIRELESS_FIELD, ARP_TABLE_FIELD]
        .iter()
        .filter_map(|key| snapshot.list(key))
        .any(|items| items.iter().any(|t| mac.matches(t)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn mac(s: &str) -> MacAddress {
        MacAddress::parse(s).unwrap()
    }

    #[test]
    fn wireless_allow_list() {
        let raw = strings(&["AA:BB:CC:DD:EE:FF", "", "wl0", "8:20:00"]);

        let kept = parse_wireless_clients(&raw, &strings(&["wl0"]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].interface.as_deref(), Some("wl0"));
        assert_eq!(kept[0].source, DeviceSource::Wireless);
        assert_eq!(kept[0].display_name, "Device AA:BB:CC:DD:EE:FF");

        assert!(parse_wireless_clients(&raw, &strings(&["eth0"])).is_empty());
        assert_eq!(parse_wireless_clients(&raw, &[]).len(), 1);
    }

    #[test]
    fn repeated_wireless_mac_keeps_first_run() {
        let raw = strings(&[
            "AA:BB:CC:DD:EE:FF", "", "wl0", "8:20:00",
            "11:22:33:44:55:66", "", "wl0", "0:10:00",
            "aa:bb:cc:dd:ee:ff", "", "wl1", "0:00:05",
        ]);
        let devices = extract_devices(Some(raw.as_slice()), None, &[]);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].mac, mac("AA:BB:CC:DD:EE:FF"));
        assert_eq!(devices[0].interface.as_deref(), Some("wl0"));
        assert_eq!(devices[1].mac, mac("11:22:33:44:55:66"));
    }

    #[test]
    fn wireless_runs_split_on_macs() {
        let raw = strings(&[
            "junk",
            "24:D7:EB:92:59:F4", "", "wl0", "8:20:00", "5.500M", "6.0M", "-52",
            "14:2b:2f:d9:a5:33", "", "wl1", "0:01:10",
            "00:11:22:33:44:55",
        ]);
        let clients = parse_wireless_clients(&raw, &[]);
        let summary: Vec<_> = clients
            .iter()
            .map(|d| (d.mac.as_str().to_owned(), d.interface.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("24:D7:EB:92:59:F4".to_owned(), Some("wl0".to_owned())),
                ("14:2B:2F:D9:A5:33".to_owned(), Some("wl1".to_owned())),
                ("00:11:22:33:44:55".to_owned(), None),
            ]
        );
    }

    #[test]
    fn wireless_unknown_interface_passes_filter() {
        let raw = strings(&["AA:BB:CC:DD:EE:FF", "only-one"]);
        let kept = parse_wireless_clients(&raw, &strings(&["wl0"]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].interface, None);
    }

    #[test]
    fn dhcp_records_by_position() {
        let raw = strings(&[
            "slzb-06", "192.168.10.102", "14:2B:2F:D9:A5:33", "Static", "102", "br0", "",
            "*", "192.168.10.150", "AA:BB:CC:00:11:22", "Dynamic", "150", "br1", "",
        ]);
        let leases = parse_dhcp_leases(&raw, &[]);
        assert_eq!(leases.len(), 2);

        assert_eq!(leases[0].display_name, "slzb-06");
        assert_eq!(leases[0].ip.as_deref(), Some("192.168.10.102"));
        assert_eq!(leases[0].interface.as_deref(), Some("br0"));
        assert_eq!(leases[0].source, DeviceSource::Dhcp);

        assert_eq!(leases[1].display_name, "Device AA:BB:CC:00:11:22");
        assert_eq!(leases[1].interface.as_deref(), Some("br1"));

        let only_br1 = parse_dhcp_leases(&raw, &strings(&["br1"]));
        assert_eq!(only_br1.len(), 1);
        assert_eq!(only_br1[0].mac, mac("aa:bb:cc:00:11:22"));
    }

    #[test]
    fn dhcp_bounds_are_checked() {
        let raw = strings(&["AA:BB:CC:DD:EE:FF", "Static"]);
        let leases = parse_dhcp_leases(&raw, &strings(&["br0"]));
        assert_eq!(leases.len(), 1);
        let lease = &leases[0];
        assert_eq!(lease.ip, None);
        assert_eq!(lease.interface, None);
        assert_eq!(lease.display_name, "Device AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn wireless_wins_over_dhcp_case_insensitively() {
        let wireless = strings(&["aa:bb:cc:dd:ee:ff", "", "wl0"]);
        let dhcp = strings(&[
            "laptop", "10.0.0.5", "AA:BB:CC:DD:EE:FF", "Dynamic", "5", "br0", "",
            "printer", "10.0.0.6", "11:22:33:44:55:66", "Static", "6", "br0", "",
        ]);
        let devices = extract_devices(Some(&wireless), Some(&dhcp), &[]);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].source, DeviceSource::Wireless);
        assert_eq!(devices[0].mac, mac("AA:BB:CC:DD:EE:FF"));
        assert_eq!(devices[1].display_name, "printer");
    }

    #[test]
    fn filtered_wireless_entry_lets_lease_through() {
        let wireless = strings(&["AA:BB:CC:DD:EE:FF", "", "wl1"]);
        let dhcp = strings(&["laptop", "10.0.0.5", "AA:BB:CC:DD:EE:FF", "Dynamic", "5", "br0", ""]);
        let devices = extract_devices(Some(&wireless), Some(&dhcp), &strings(&["br0"]));
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].source, DeviceSource::Dhcp);
    }

    #[test]
    fn snapshot_helpers() {
        let snap: Snapshot = decode(
            "{active_wireless::'AA:BB:CC:DD:EE:FF','','wl0','1:00:00'}\
             {arp_table::'nas','10.0.0.9','11:22:33:44:55:66','1'}\
             {dhcp_leases::'nas','10.0.0.9','11:22:33:44:55:66','Static','9','br0',''}",
        )
        .into_iter()
        .collect();

        assert_eq!(devices_in(&snap, &[]).len(), 2);
        assert!(is_connected(&snap, &mac("aa:bb:cc:dd:ee:ff")));
        assert!(is_connected(&snap, &mac("11:22:33:44:55:66")));
        assert!(!is_connected(&snap, &mac("99:99:99:99:99:99")));
    }

    #[test]
    fn no_tables_no_devices() {
        assert!(extract_devices(None, None, &[]).is_empty());
    }
}
