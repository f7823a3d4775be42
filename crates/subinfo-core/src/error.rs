// ── Core error types ──
//
// User-facing errors from subinfo-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<subinfo_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach panel at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Panel request timed out")]
    Timeout,

    // ── Panel errors ─────────────────────────────────────────────────
    #[error("Subscription not found on the panel")]
    SubscriptionNotFound,

    #[error("Panel refused the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Panel sent an unreadable payload: {message}")]
    MalformedPayload { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Loader errors ────────────────────────────────────────────────
    /// A newer load started before this one finished; its result was dropped.
    #[error("Load superseded by a newer request")]
    Superseded,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<subinfo_api::Error> for CoreError {
    fn from(err: subinfo_api::Error) -> Self {
        if err.is_not_found() {
            return CoreError::SubscriptionNotFound;
        }
        match err {
            subinfo_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            subinfo_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            subinfo_api::Error::UnsupportedUrl(url) => CoreError::Config {
                message: format!("Unsupported subscription URL: {url}"),
            },
            subinfo_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            subinfo_api::Error::Http { status, message } => {
                CoreError::Rejected { status, message }
            }
            subinfo_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedPayload { message }
            }
        }
    }
}
