//! Shared configuration for wrtwatch.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `wrtwatch_core::RouterConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use wrtwatch_core::config::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_USERNAME};
use wrtwatch_core::{AuthCredentials, RouterConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "wrtwatch";

/// Environment variable consulted for the router password.
pub const PASSWORD_ENV: &str = "WRTWATCH_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| ConfigError::UnknownProfile {
            name: name.into(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Router web UIs ship self-signed certificates, so this starts on.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Request timeout, seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Poll interval for `watch`, seconds.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: default_insecure(),
            timeout: default_timeout(),
            interval: default_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    10
}
fn default_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// A named router profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Web UI root (e.g., "http://192.168.1.1").
    pub router: String,

    /// Web UI username. Defaults to `root`.
    pub username: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,

    pub interval: Option<u64>,

    /// Pages to poll, in merge order. Unset means the stock four.
    pub pages: Option<Vec<String>>,

    /// Device tracker interface allow-list. Empty tracks everything.
    #[serde(default)]
    pub interfaces: Vec<String>,
}

impl Profile {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wrtwatch", "wrtwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wrtwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file, layered over defaults and under `WRTWATCH_*`.
///
/// Nested keys use a double underscore: `WRTWATCH_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WRTWATCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the router password: `password_env` → `WRTWATCH_PASSWORD` →
/// keyring → plaintext. `None` means the router is polled without auth.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    match keyring_entry(profile_name).and_then(|e| e.get_password().map_err(Into::into)) {
        Ok(pw) => return Some(SecretString::from(pw)),
        Err(e) => debug!(profile = profile_name, error = %e, "no keyring password"),
    }

    // 4. Plaintext in config
    profile.password.clone().map(SecretString::from)
}

/// Resolve username + password for a profile, if any password is available.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Option<AuthCredentials> {
    resolve_password(profile, profile_name).map(|password| AuthCredentials {
        username: profile.username().to_owned(),
        password,
    })
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(password)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

impl From<keyring::Error> for ConfigError {
    fn from(err: keyring::Error) -> Self {
        Self::Keyring(err.to_string())
    }
}

// ── Translation to core config ──────────────────────────────────────

/// Parse a router address, assuming `http://` when no scheme is given.
pub fn parse_router_url(raw: &str) -> Result<url::Url, ConfigError> {
    let raw = raw.trim();
    let with_scheme = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("http://{raw}")
    };
    url::Url::parse(&with_scheme).map_err(|e| ConfigError::Validation {
        field: "router".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })
}

/// Build a `RouterConfig` from a profile and already-resolved credentials.
///
/// Profile values win over `[defaults]`.
pub fn profile_to_router_config(
    profile: &Profile,
    defaults: &Defaults,
    credentials: Option<AuthCredentials>,
) -> Result<RouterConfig, ConfigError> {
    if profile.router.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "router".into(),
            reason: "no router address configured".into(),
        });
    }
    let url = parse_router_url(&profile.router)?;

    let tls = match (profile.insecure.unwrap_or(defaults.insecure), &profile.ca_cert) {
        (true, _) => TlsVerification::DangerAcceptInvalid,
        (false, Some(ca)) => TlsVerification::CustomCa(ca.clone()),
        (false, None) => TlsVerification::SystemDefaults,
    };

    let mut config = RouterConfig::new(url);
    config.credentials = credentials;
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.poll_interval_secs = profile.interval.unwrap_or(defaults.interval);
    config.tracker_interfaces.clone_from(&profile.interfaces);
    if let Some(ref pages) = profile.pages {
        config.pages.clone_from(pages);
    }
    Ok(config)
}
