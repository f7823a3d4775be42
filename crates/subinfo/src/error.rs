//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use subinfo_config::ConfigError;
use subinfo_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the panel at {url}")]
    #[diagnostic(
        code(subinfo::connection_failed),
        help(
            "Check that the subscription URL is correct and the panel is online.\n\
             Self-signed panel? Try: subinfo show --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(subinfo::timeout),
        help("Increase timeout with --timeout or check the panel's responsiveness.")
    )]
    Timeout,

    // ── Panel ────────────────────────────────────────────────────────
    #[error("Subscription not found")]
    #[diagnostic(
        code(subinfo::not_found),
        help("The subscription token may have been revoked. Ask your provider for a new link.")
    )]
    SubscriptionNotFound,

    #[error("Panel refused the request (HTTP {status}): {message}")]
    #[diagnostic(code(subinfo::rejected))]
    Rejected { status: u16, message: String },

    #[error("Panel sent an unreadable payload: {message}")]
    #[diagnostic(
        code(subinfo::malformed),
        help("Make sure the URL is a subscription link, not the panel dashboard.")
    )]
    MalformedPayload { message: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(subinfo::lookup),
        help("Available: {available}")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        available: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(subinfo::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(subinfo::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: subinfo config init --sub-url <URL> --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Profile '{name}' already exists")]
    #[diagnostic(
        code(subinfo::profile_exists),
        help("Use --force to overwrite it.")
    )]
    ProfileExists { name: String },

    #[error("No subscription URL configured")]
    #[diagnostic(
        code(subinfo::no_config),
        help(
            "Pass --url <URL>, set SUBINFO_URL, or create a profile with:\n\
             subinfo config init --sub-url <URL>\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Cannot load app catalog: {message}")]
    #[diagnostic(code(subinfo::catalog))]
    Catalog { message: String },

    #[error(transparent)]
    #[diagnostic(code(subinfo::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(subinfo::serialization))]
    Serialization(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(subinfo::internal))]
    Internal(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::SubscriptionNotFound
            | Self::NotFound { .. }
            | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::PERMISSION,
            Self::ProfileExists { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
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
            CoreError::Timeout => CliError::Timeout,
            CoreError::SubscriptionNotFound => CliError::SubscriptionNotFound,
            CoreError::Rejected { status, message } => CliError::Rejected { status, message },
            CoreError::MalformedPayload { message } => CliError::MalformedPayload { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Superseded => CliError::Internal("load was superseded".into()),
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::Catalog(message) => CliError::Catalog { message },
            ConfigError::Serialization(e) => CliError::Serialization(e.to_string()),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
