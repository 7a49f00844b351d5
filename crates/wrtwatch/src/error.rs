//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use wrtwatch_config::ConfigError;
use wrtwatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NO_DATA: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to router at {url}")]
    #[diagnostic(
        code(wrtwatch::connection_failed),
        help(
            "Check that the router web interface is reachable.\n\
             Try: wrtwatch probe <host>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} is not a DD-WRT web interface")]
    #[diagnostic(
        code(wrtwatch::not_ddwrt),
        help("The host answered but returned no DD-WRT live data. Check the address and port.")
    )]
    NotDdwrt { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(wrtwatch::auth_failed),
        help(
            "The router rejected the web UI credentials.\n\
             Run: wrtwatch config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("No status data received ({pages} pages polled)")]
    #[diagnostic(
        code(wrtwatch::no_data),
        help("Every status page failed or was empty. Run with -v to see per-page errors.")
    )]
    NoData { pages: usize },

    #[error("Router error: {message}")]
    #[diagnostic(code(wrtwatch::router_error))]
    Router {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wrtwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wrtwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wrtwatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No router configured")]
    #[diagnostic(
        code(wrtwatch::no_config),
        help(
            "Pass --router <address>, or create a profile with: wrtwatch config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(wrtwatch::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(wrtwatch::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request to the router timed out")]
    #[diagnostic(
        code(wrtwatch::timeout),
        help("Increase timeout with --timeout or check router responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(wrtwatch::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(wrtwatch::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::NotDdwrt { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NoData { .. } => exit_code::NO_DATA,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NoConfig { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to an authentication failure.
    pub fn with_profile(self, profile: &str) -> Self {
        match self {
            Self::AuthFailed { .. } => Self::AuthFailed {
                profile: profile.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::AuthenticationFailed { message: _ } => CliError::AuthFailed {
                profile: "default".into(),
            },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NoData { pages } => CliError::NoData { pages },
            CoreError::NotDdwrt { url } => CliError::NotDdwrt { url },
            CoreError::Api { message, status } => CliError::Router { message, status },
            CoreError::Config { message } => CliError::Validation {
                field: "router".into(),
                reason: message,
            },
        }
    }
}

impl From<wrtwatch_api::Error> for CliError {
    fn from(err: wrtwatch_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        assert_eq!(CliError::from(CoreError::NoData { pages: 4 }).exit_code(), 4);
        assert_eq!(CliError::Timeout.exit_code(), 8);
        assert_eq!(
            CliError::from(CoreError::AuthenticationFailed {
                message: String::new()
            })
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::NonInteractiveRequiresYes {
                action: "reboot".into()
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn core_errors_map_to_specific_cli_errors() {
        let bad_url = CliError::from(CoreError::Config {
            message: "relative URL without a base".into(),
        });
        assert!(matches!(bad_url, CliError::Validation { ref field, .. } if field == "router"));
        assert_eq!(bad_url.exit_code(), 2);

        let api = CliError::from(CoreError::Api {
            message: "HTTP 500".into(),
            status: Some(500),
        });
        assert!(matches!(api, CliError::Router { status: Some(500), .. }));
        assert_eq!(api.exit_code(), 1);
    }

    #[test]
    fn profile_is_attached_to_auth_errors() {
        let err = CliError::AuthFailed {
            profile: "default".into(),
        }
        .with_profile("home");
        assert!(matches!(err, CliError::AuthFailed { ref profile } if profile == "home"));
    }
}
