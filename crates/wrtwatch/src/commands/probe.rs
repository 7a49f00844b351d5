//! `probe`: locate the DD-WRT web UI on a host.

use std::time::Duration;

use serde::Serialize;

use wrtwatch_api::{TlsMode, TransportConfig};

use crate::cli::{GlobalOpts, ProbeArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ProbeResult {
    host: String,
    url: String,
}

pub async fn handle(args: ProbeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut transport = TransportConfig {
        tls: TlsMode::DangerAcceptInvalid,
        ..TransportConfig::default()
    };
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    let url = wrtwatch_api::probe(&args.host, args.port, &transport).await?;
    let result = ProbeResult {
        host: args.host,
        url: url.to_string(),
    };

    let out = output::render_single(
        global.output,
        &result,
        |r| format!("DD-WRT web interface found at {}", r.url),
        |r| r.url.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
