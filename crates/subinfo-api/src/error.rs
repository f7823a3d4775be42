use thiserror::Error;

/// Top-level error type for the `subinfo-api` crate.
///
/// Covers every failure mode of the two panel endpoints: transport,
/// URL handling, HTTP status, and payload decoding.
/// `subinfo-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL parses but cannot carry endpoint paths (e.g. `mailto:`).
    #[error("Unsupported subscription URL: {0}")]
    UnsupportedUrl(String),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Panel ───────────────────────────────────────────────────────
    /// The panel answered with a non-success status.
    #[error("Panel returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the panel does not know the subscription.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}
