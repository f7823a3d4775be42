//! CLI-side configuration: layers command-line flags over the active
//! profile and translates the result into core types.
//!
//! Core never reads config files -- it receives a pre-built `PanelConfig`
//! and `DisplayConfig`.

use subinfo_config::{Config, Profile};
use subinfo_core::{AppCatalog, DisplayConfig, Locale, PanelConfig};

use crate::cli::{GlobalOpts, Lang};
use crate::error::CliError;

pub use subinfo_config::{config_path, load_config, load_config_or_default, save_config};

/// Everything a panel command needs.
#[derive(Debug)]
pub struct Resolved {
    pub panel: PanelConfig,
    pub display: DisplayConfig,
    pub catalog: AppCatalog,
}

impl From<Lang> for Locale {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::Fa => Locale::Fa,
            Lang::En => Locale::En,
        }
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The active profile with flag overrides applied.
///
/// A `--url` without a matching profile runs on flags alone. Naming a
/// profile explicitly that doesn't exist is an error.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);

    let mut profile = if let Some(profile) = config.profiles.get(&name) {
        profile.clone()
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name,
            available: config.profile_names(),
        });
    } else if global.url.is_some() {
        Profile::default()
    } else {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    };

    if let Some(url) = &global.url {
        profile.url.clone_from(url);
    }
    if let Some(domain) = &global.panel_domain {
        profile.panel_domain = Some(domain.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(lang) = global.lang {
        profile.lang = Some(lang.into());
    }
    Ok(profile)
}

/// Build core configuration from the config file, profile, and CLI flags.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let config = load_config_or_default();
    resolve_with(global, &config)
}

pub fn resolve_with(global: &GlobalOpts, config: &Config) -> Result<Resolved, CliError> {
    let profile = effective_profile(global, config)?;
    let panel = subinfo_config::profile_to_panel_config(&profile, &config.defaults)?;
    let display = subinfo_config::profile_to_display_config(&profile, &config.defaults)?;
    let catalog = subinfo_config::load_catalog(profile.apps_catalog.as_deref())?;
    Ok(Resolved {
        panel,
        display,
        catalog,
    })
}
