// ── Core error types ──
//
// User-facing errors from wrtwatch-core. Consumers never see reqwest
// errors or raw status codes directly; `From<wrtwatch_api::Error>`
// translates transport-layer failures into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Router request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    /// Every page failed or decoded to nothing.
    #[error("No data received from any status page ({pages} polled)")]
    NoData { pages: usize },

    #[error("{url} is not a DD-WRT web interface")]
    NotDdwrt { url: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Router error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wrtwatch_api::Error> for CoreError {
    fn from(err: wrtwatch_api::Error) -> Self {
        use wrtwatch_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::Http { status, url } => CoreError::Api {
                message: format!("HTTP {status} from {url}"),
                status: Some(status),
            },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::NotDdwrt { url } => CoreError::NotDdwrt { url },
            ApiError::Unreachable { host } => CoreError::ConnectionFailed {
                url: host,
                reason: "no HTTP or HTTPS port answered".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_maps_to_authentication_failed() {
        let err: CoreError = wrtwatch_api::Error::Authentication {
            message: "401".into(),
        }
        .into();
        assert!(err.is_auth());
    }

    #[test]
    fn http_status_is_kept() {
        let err: CoreError = wrtwatch_api::Error::Http {
            status: 503,
            url: "http://r/x".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(503), .. }));
    }

    #[test]
    fn no_data_message() {
        assert_eq!(
            CoreError::NoData { pages: 4 }.to_string(),
            "No data received from any status page (4 polled)"
        );
    }
}
