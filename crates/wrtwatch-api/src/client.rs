// Router HTTP client
//
// Wraps `reqwest::Client` with DD-WRT URL construction and Basic auth.
// Page bodies are returned as raw text; decoding the `{key::value}`
// micro-format is the core crate's job.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::page::Page;
use crate::transport::TransportConfig;

/// Quoted interface-ish tokens inside `Networking.live.asp`.
static QUOTED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"'([a-z0-9.]+)'").unwrap()
});

/// Interface names offered when the networking page can't be scanned.
const FALLBACK_INTERFACES: [&str; 5] = ["br0", "eth0", "eth1", "wl0", "wl1"];

/// Markers proving a status page really is DD-WRT live output.
const LIVE_MARKERS: [&str; 2] = ["{uptime::", "{ipinfo::"];

/// HTTP Basic credentials for the router web UI.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Outcome of fetching one page during a poll cycle.
#[derive(Debug)]
pub struct PageFetch {
    /// Page path, as requested.
    pub page: String,
    /// Raw body on success.
    pub outcome: Result<String, Error>,
}

/// Raw HTTP client for a DD-WRT router's live pages.
pub struct RouterClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl RouterClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the web UI root, e.g. `http://192.168.1.1` or
    /// `https://router.lan:8443`.
    pub fn new(
        base_url: Url,
        credentials: Option<Credentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full URL for a page path under the web root.
    pub fn page_url(&self, page: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let page = page.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{page}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(creds) => {
                builder.basic_auth(&creds.username, Some(creds.password.expose_secret()))
            }
            None => builder,
        }
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let url = resp.url().to_string();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "router rejected the configured credentials".into(),
            });
        }

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        resp.text().await.map_err(Error::Transport)
    }

    // ── Pages ────────────────────────────────────────────────────────

    /// Fetch one page and return its raw body.
    ///
    /// `GET /{page}` with Basic auth when credentials are configured.
    pub async fn fetch_page(&self, page: &str) -> Result<String, Error> {
        let url = self.page_url(page)?;
        debug!("GET {}", url);

        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        let body = Self::read_body(resp).await?;
        trace!(page, bytes = body.len(), "page fetched");
        Ok(body)
    }

    /// Fetch every page in order, recording each outcome.
    ///
    /// A failing page never stops the sweep; the aggregator decides whether
    /// the cycle as a whole produced enough data.
    pub async fn fetch_pages<S: AsRef<str>>(&self, pages: &[S]) -> Vec<PageFetch> {
        let mut results = Vec::with_capacity(pages.len());
        for page in pages {
            let page = page.as_ref();
            let outcome = self.fetch_page(page).await;
            if let Err(ref e) = outcome {
                debug!(page, error = %e, "page fetch failed");
            }
            results.push(PageFetch {
                page: page.to_owned(),
                outcome,
            });
        }
        results
    }

    // ── Setup helpers ────────────────────────────────────────────────

    /// Check that the credentials unlock real DD-WRT live data.
    ///
    /// `GET /Statusinfo.live.asp` must answer 200 with an `uptime` or
    /// `ipinfo` field in the body.
    pub async fn verify_credentials(&self) -> Result<(), Error> {
        let page = Page::StatusInfo.path();
        let url = self.page_url(page)?;
        debug!("GET {} (credential check)", url);

        let resp = self
            .authorize(self.http.get(url.clone()))
            .send()
            .await
            .map_err(Error::Transport)?;
        // Exactly 200; 401 and error statuses fall through to read_body
        if resp.status().is_success() && resp.status() != reqwest::StatusCode::OK {
            return Err(Error::Http {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = Self::read_body(resp).await?;
        if LIVE_MARKERS.iter().any(|m| body.contains(m)) {
            debug!("credentials verified");
            Ok(())
        } else {
            Err(Error::NotDdwrt {
                url: url.to_string(),
            })
        }
    }

    /// Best-effort scan of interface names for the tracker allow-list.
    ///
    /// Reads `Networking.live.asp` and collects short quoted tokens from it
    /// when the bridge table is present. Falls back to a stock list when the
    /// page is missing or yields nothing. Result is sorted and deduplicated.
    pub async fn discover_interfaces(&self) -> Vec<String> {
        let mut found = BTreeSet::new();

        match self.fetch_page(Page::Networking.path()).await {
            Ok(body) if body.contains("{bridges_table::") => {
                for cap in QUOTED_TOKEN.captures_iter(&body) {
                    if let Some(m) = cap.get(1) {
                        if m.as_str().len() < 10 {
                            found.insert(m.as_str().to_owned());
                        }
                    }
                }
            }
            Ok(_) => debug!("networking page has no bridge table"),
            Err(e) => debug!(error = %e, "interface discovery failed"),
        }

        if found.is_empty() {
            found.extend(FALLBACK_INTERFACES.iter().map(|s| (*s).to_owned()));
        }
        found.into_iter().collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Ask the router to reboot.
    ///
    /// `POST /apply.cgi` with form `action=Reboot`.
    pub async fn reboot(&self) -> Result<(), Error> {
        let url = self.page_url("apply.cgi")?;
        debug!("POST {} (reboot)", url);

        let resp = self
            .authorize(self.http.post(url).form(&[("action", "Reboot")]))
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::read_body(resp).await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> RouterClient {
        RouterClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap(), None)
    }

    #[test]
    fn page_url_joins_without_double_slash() {
        let c = client("http://192.168.1.1/");
        assert_eq!(
            c.page_url("/Status_Lan.live.asp").unwrap().as_str(),
            "http://192.168.1.1/Status_Lan.live.asp"
        );
    }

    #[test]
    fn page_url_keeps_port_and_scheme() {
        let c = client("https://router.lan:8443");
        assert_eq!(
            c.page_url("apply.cgi").unwrap().as_str(),
            "https://router.lan:8443/apply.cgi"
        );
    }
}
