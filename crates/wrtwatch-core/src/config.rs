// ── Runtime connection configuration ──
//
// These types describe how to reach one router and what to poll. They
// carry credentials and tuning but never touch disk: the CLI builds a
// `RouterConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wrtwatch_api::{Credentials, TlsMode, TransportConfig};

pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP Basic credentials for the router web UI.
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    pub username: String,
    pub password: SecretString,
}

impl From<&AuthCredentials> for Credentials {
    fn from(auth: &AuthCredentials) -> Self {
        Credentials {
            username: auth.username.clone(),
            password: auth.password.clone(),
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Router web UIs are almost always self-signed.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Configuration for monitoring a single router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Web UI root (e.g., `http://192.168.1.1`).
    pub url: Url,
    /// `None` for routers with the status pages left public.
    pub credentials: Option<AuthCredentials>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pages polled each cycle, in merge order.
    pub pages: Vec<String>,
    /// Interface allow-list for device tracking. Empty accepts everything.
    pub tracker_interfaces: Vec<String>,
    pub poll_interval_secs: u64,
}

impl RouterConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            pages: wrtwatch_api::default_pages(),
            tracker_interfaces: Vec::new(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.credentials = Some(AuthCredentials {
            username: username.into(),
            password,
        });
        self
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RouterConfig::new("http://192.168.1.1".parse().unwrap());
        assert_eq!(cfg.pages.len(), 4);
        assert!(cfg.credentials.is_none());
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    fn transport_carries_tls_and_timeout() {
        let mut cfg = RouterConfig::new("https://r.lan".parse().unwrap());
        cfg.tls = TlsVerification::CustomCa("/etc/ca.pem".into());
        cfg.timeout = Duration::from_secs(3);
        let t = cfg.transport();
        assert!(matches!(t.tls, TlsMode::CustomCa(ref p) if p.to_str() == Some("/etc/ca.pem")));
        assert_eq!(t.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut cfg = RouterConfig::new("http://r".parse().unwrap());
        cfg.poll_interval_secs = 0;
        assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
    }
}
