// Well-known DD-WRT live pages.
//
// Every `*.live.asp` page renders a block of `{key::value}` fields that the
// web UI polls. The four `Status_*` pages together carry everything the
// monitor needs; `Statusinfo` and `Networking` are only used for
// credential checks and interface discovery.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A DD-WRT live status page, addressed by its path under the web root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum Page {
    /// cpu_temp, mem_info, uptime, router_time
    #[strum(serialize = "Status_Router.live.asp")]
    StatusRouter,
    /// wan_status, wan_ipaddr, ttraff_in / ttraff_out
    #[strum(serialize = "Status_Internet.live.asp")]
    StatusInternet,
    /// arp_table, dhcp_leases, lan_ip
    #[strum(serialize = "Status_Lan.live.asp")]
    StatusLan,
    /// active_wireless, wl_radio, wl_ssid, wl_channel
    #[strum(serialize = "Status_Wireless.live.asp")]
    StatusWireless,
    /// Landing page; carries `uptime` and `ipinfo`.
    #[strum(serialize = "Statusinfo.live.asp")]
    StatusInfo,
    /// Bridge and interface tables.
    #[strum(serialize = "Networking.live.asp")]
    Networking,
}

impl Page {
    /// The pages polled every cycle, in fetch order.
    pub fn polled() -> impl Iterator<Item = Page> {
        Page::iter().filter(|p| !matches!(p, Page::StatusInfo | Page::Networking))
    }

    /// Path relative to the router's web root.
    pub fn path(self) -> &'static str {
        match self {
            Self::StatusRouter => "Status_Router.live.asp",
            Self::StatusInternet => "Status_Internet.live.asp",
            Self::StatusLan => "Status_Lan.live.asp",
            Self::StatusWireless => "Status_Wireless.live.asp",
            Self::StatusInfo => "Statusinfo.live.asp",
            Self::Networking => "Networking.live.asp",
        }
    }
}

/// Default page list as owned paths, ready to drop into configuration.
pub fn default_pages() -> Vec<String> {
    Page::polled().map(|p| p.path().to_owned()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn polled_pages_keep_fetch_order() {
        let pages: Vec<_> = Page::polled().collect();
        assert_eq!(
            pages,
            vec![
                Page::StatusRouter,
                Page::StatusInternet,
                Page::StatusLan,
                Page::StatusWireless,
            ]
        );
    }

    #[test]
    fn page_round_trips_through_its_path() {
        let page: Page = "Status_Lan.live.asp".parse().unwrap();
        assert_eq!(page, Page::StatusLan);
        assert_eq!(page.to_string(), page.path());
        assert_eq!(page.as_ref(), "Status_Lan.live.asp");
    }

    #[test]
    fn default_pages_are_paths() {
        let pages = default_pages();
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[0], "Status_Router.live.asp");
    }
}
