//! Shared configuration for the subinfo CLI.
//!
//! TOML profiles, section toggles, and translation to
//! `subinfo_core::PanelConfig` / `DisplayConfig`. The CLI layers its
//! command-line flags on top of what this crate resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use subinfo_core::{AppCatalog, DisplayConfig, Locale, PanelConfig, Sections, TlsVerification};

/// JSON object of section toggles, e.g. `{"appsBox":true,"configs":true}`.
pub const SECTIONS_ENV: &str = "SUBINFO_SECTIONS";

const ENV_PREFIX: &str = "SUBINFO_";

/// Variables the CLI reads directly; kept out of the figment env layer.
const CLI_ENV_KEYS: &[&str] = &[
    "url", "panel_domain", "sections", "profile", "output", "lang", "insecure", "timeout",
];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: String },

    #[error("cannot load app catalog: {0}")]
    Catalog(String),

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
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named subscription profiles.
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

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub lang: Locale,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            lang: Locale::default(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named subscription profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Subscription URL (e.g., "https://panel.example.com/sub/TOKEN").
    pub url: String,

    /// Replaces scheme and host of the subscription link shown to users.
    pub panel_domain: Option<String>,

    /// Support contact link.
    pub support_url: Option<String>,

    /// Section toggles. Unlisted sections are shown.
    pub sections: Option<Sections>,

    /// App catalog JSON replacing the built-in one.
    pub apps_catalog: Option<PathBuf>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override the HTTP user agent.
    pub user_agent: Option<String>,

    /// Override display language.
    pub lang: Option<Locale>,
}

impl Config {
    /// Sorted, comma-separated profile names (for diagnostics).
    pub fn profile_names(&self) -> String {
        self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profile_names(),
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "subinfo", "subinfo").map_or_else(
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
    p.push("subinfo");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file
/// yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(CLI_ENV_KEYS).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
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

// ── Section toggles ─────────────────────────────────────────────────

/// Pick the section toggles: the JSON env value wins over the profile.
///
/// An env value that fails to parse logs an error and shows every
/// section, matching the behavior panel operators already rely on.
pub fn resolve_sections(configured: Option<Sections>, env_value: Option<&str>) -> Sections {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(json) => Sections::from_json(json).unwrap_or_else(|e| {
            error!(error = %e, "failed to parse {SECTIONS_ENV}, showing all sections");
            Sections::all(true)
        }),
        None => configured.unwrap_or_default(),
    }
}

/// [`resolve_sections`] against the live `SUBINFO_SECTIONS` variable.
pub fn sections_from_env(configured: Option<Sections>) -> Sections {
    resolve_sections(configured, std::env::var(SECTIONS_ENV).ok().as_deref())
}

// ── Translation to core config ──────────────────────────────────────

pub fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build a `PanelConfig` from a profile, no CLI flag overrides.
pub fn profile_to_panel_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<PanelConfig, ConfigError> {
    let url = parse_url("url", &profile.url)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(PanelConfig {
        url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        user_agent: profile.user_agent.clone(),
    })
}

/// Build a `DisplayConfig` from a profile. Section toggles come from
/// `SUBINFO_SECTIONS` when set.
pub fn profile_to_display_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DisplayConfig, ConfigError> {
    let panel_url = parse_url("url", &profile.url)?;
    Ok(DisplayConfig {
        panel_url,
        panel_domain: profile.panel_domain.clone(),
        support_url: profile.support_url.clone(),
        sections: sections_from_env(profile.sections),
        locale: profile.lang.unwrap_or(defaults.lang),
    })
}

/// Load the profile's app catalog, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<AppCatalog, ConfigError> {
    match path {
        Some(path) => AppCatalog::load(path).map_err(|e| ConfigError::Catalog(e.to_string())),
        None => Ok(AppCatalog::builtin()),
    }
}
