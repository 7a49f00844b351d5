//! `devices`: records from the wireless and DHCP tables.

use serde::Serialize;
use tabled::Tabled;

use wrtwatch_core::{DeviceRecord, Monitor, devices, is_connected};

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct DeviceView {
    #[serde(flatten)]
    record: DeviceRecord,
    connected: bool,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Connected")]
    connected: String,
}

impl From<&DeviceView> for DeviceRow {
    fn from(v: &DeviceView) -> Self {
        Self {
            mac: v.record.mac.to_string(),
            name: v.record.display_name.clone(),
            ip: output::or_dash(v.record.ip.as_deref()),
            interface: output::or_dash(v.record.interface.as_deref()),
            source: v.record.source.to_string(),
            connected: if v.connected { "yes" } else { "no" }.into(),
        }
    }
}

pub async fn handle(monitor: &Monitor, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = util::poll(monitor).await?;

    let records = if args.interfaces.is_empty() {
        monitor.devices(&snapshot)
    } else {
        devices::devices_in(&snapshot, &args.interfaces)
    };

    let views: Vec<DeviceView> = records
        .into_iter()
        .map(|record| DeviceView {
            connected: is_connected(&snapshot, &record.mac),
            record,
        })
        .filter(|v| !args.connected || v.connected)
        .collect();

    let out = output::render_list(
        global.output,
        &views,
        |v| DeviceRow::from(v),
        |v| format!("{}\t{}", v.record.mac, v.record.display_name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
