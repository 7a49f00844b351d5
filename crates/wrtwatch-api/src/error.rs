use thiserror::Error;

/// Top-level error type for the `wrtwatch-api` crate.
///
/// Covers every failure mode of talking to a router: authentication,
/// HTTP status, transport, and "this is not a DD-WRT box".
/// `wrtwatch-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Router rejected the Basic auth credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-success HTTP status for a page request.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Discovery ───────────────────────────────────────────────────
    /// The endpoint answered, but not with DD-WRT live data.
    #[error("{url} does not look like a DD-WRT status page")]
    NotDdwrt { url: String },

    /// No protocol/port combination answered during probing.
    #[error("No DD-WRT web interface reachable at {host}")]
    Unreachable { host: String },
}

impl Error {
    /// Returns `true` if the router rejected our credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying next cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the page does not exist on this firmware.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            url: "http://router/Status_Lan.live.asp".into(),
        };
        assert!(err.is_transient());
        assert!(!err.is_auth());
    }

    #[test]
    fn missing_page_is_not_found_but_not_transient() {
        let err = Error::Http {
            status: 404,
            url: "http://router/Status_Wireless.live.asp".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_transient());
    }

    #[test]
    fn auth_error_is_flagged() {
        let err = Error::Authentication {
            message: "bad password".into(),
        };
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Authentication failed: bad password");
    }
}
