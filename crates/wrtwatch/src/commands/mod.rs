//! Command handlers, one module per top-level command.

pub mod config_cmd;
pub mod devices;
pub mod fields;
pub mod metrics;
pub mod probe;
pub mod status;
pub mod system;
pub mod util;
pub mod watch;

use wrtwatch_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a router-bound command to its handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(monitor, global).await,
        Command::Fields(args) => fields::handle(monitor, args, global).await,
        Command::Metrics(args) => metrics::handle(monitor, args, global).await,
        Command::Devices(args) => devices::handle(monitor, args, global).await,
        Command::Watch(args) => watch::handle(monitor, args, global).await,
        Command::Interfaces => system::interfaces(monitor, global).await,
        Command::Verify => system::verify(monitor, global).await,
        Command::Reboot => system::reboot(monitor, global).await,
        // Handled in main before a monitor is built
        Command::Config(_) | Command::Completions(_) | Command::Probe(_) => Ok(()),
    }
}
