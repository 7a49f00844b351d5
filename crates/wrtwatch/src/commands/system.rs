//! Router operations: interface discovery, credential check, reboot.

use serde::Serialize;
use tabled::Tabled;

use wrtwatch_core::Monitor;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Interface")]
    name: String,
    #[tabled(rename = "Tracked")]
    tracked: String,
}

pub async fn interfaces(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let found = monitor.discover_interfaces().await;
    let allow = &monitor.config().tracker_interfaces;

    let out = output::render_list(
        global.output,
        &found,
        |name| InterfaceRow {
            name: name.clone(),
            tracked: if allow.is_empty() || allow.contains(name) { "yes" } else { "no" }.into(),
        },
        Clone::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[derive(Debug, Serialize)]
struct Verified {
    router: String,
    verified: bool,
}

pub async fn verify(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    monitor.verify().await?;
    let result = Verified {
        router: monitor.config().url.to_string(),
        verified: true,
    };
    let out = output::render_single(
        global.output,
        &result,
        |r| format!("✓ Credentials accepted by {}", r.router),
        |r| r.verified.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn reboot(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let router = monitor.config().url.to_string();
    if !util::confirm(&format!("Reboot the router at {router}?"), "reboot", global.yes)? {
        return Ok(());
    }
    monitor.reboot().await?;
    if !global.quiet {
        eprintln!("✓ Reboot requested for {router}");
    }
    Ok(())
}
