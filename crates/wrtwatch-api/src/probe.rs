// Web UI discovery
//
// Figures out which scheme/port combination a router answers on before any
// credentials are known. Any status below 500 counts: a 401 still proves
// the web UI is there.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::page::Page;
use crate::transport::TransportConfig;

/// Per-candidate timeout while probing.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Scheme/port pairs to try, in order.
///
/// With an explicit port: HTTP then HTTPS on that port. Without one: the
/// stock HTTP and HTTPS ports.
pub fn candidates(port: Option<u16>) -> Vec<(&'static str, u16)> {
    match port {
        Some(p) => vec![("http", p), ("https", p)],
        None => vec![("http", 80), ("https", 443)],
    }
}

/// Find the base URL the router's web UI answers on.
///
/// Returns the first candidate whose `Statusinfo.live.asp` answers with a
/// status below 500.
pub async fn probe(host: &str, port: Option<u16>, transport: &TransportConfig) -> Result<Url, Error> {
    let http = transport.clone().with_timeout(PROBE_TIMEOUT).build_client()?;

    for (scheme, port) in candidates(port) {
        let base = Url::parse(&format!("{scheme}://{host}:{port}/"))?;
        let url = base.join(Page::StatusInfo.path())?;
        debug!(%url, "probing");

        match http.get(url).send().await {
            Ok(resp) if resp.status().as_u16() < 500 => {
                debug!(%base, status = resp.status().as_u16(), "web UI found");
                return Ok(base);
            }
            Ok(resp) => debug!(status = resp.status().as_u16(), "server error, next candidate"),
            Err(e) => debug!(error = %e, "unreachable, next candidate"),
        }
    }

    Err(Error::Unreachable { host: host.into() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_port_tries_http_first() {
        assert_eq!(candidates(Some(8080)), vec![("http", 8080), ("https", 8080)]);
    }

    #[test]
    fn default_ports_without_explicit_port() {
        assert_eq!(candidates(None), vec![("http", 80), ("https", 443)]);
    }
}
