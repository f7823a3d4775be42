// ── Runtime configuration ──
//
// These types describe how to reach a panel and what to show. They never
// touch disk: the CLI resolves its config file and flags into them once
// at startup and hands them in.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::i18n::Locale;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed panels).
    DangerAcceptInvalid,
}

/// How to reach a single subscription on a panel.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// The user's subscription URL. Info lives at `{url}/info`.
    pub url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Overrides the default `subinfo/{version}` user agent.
    pub user_agent: Option<String>,
}

impl PanelConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

/// Which panel sections are shown.
///
/// Every section defaults to shown when deserialized from a config file.
/// [`Sections::from_json`] follows the environment-variable convention
/// instead, where a missing key hides the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Sections {
    pub apps_box: bool,
    pub logo_box: bool,
    pub time_box: bool,
    pub usage_box: bool,
    pub user_box: bool,
    pub support_box: bool,
    pub configs: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self::all(true)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
struct ExplicitSections {
    #[serde(default)]
    apps_box: bool,
    #[serde(default)]
    logo_box: bool,
    #[serde(default)]
    time_box: bool,
    #[serde(default)]
    usage_box: bool,
    #[serde(default)]
    user_box: bool,
    #[serde(default)]
    support_box: bool,
    #[serde(default)]
    configs: bool,
}

impl Sections {
    pub fn all(shown: bool) -> Self {
        Self {
            apps_box: shown,
            logo_box: shown,
            time_box: shown,
            usage_box: shown,
            user_box: shown,
            support_box: shown,
            configs: shown,
        }
    }

    /// Parse a JSON toggle object such as `{"appsBox":true,"configs":true}`.
    /// Keys that are not listed are hidden.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ExplicitSections = serde_json::from_str(json)?;
        Ok(Self {
            apps_box: raw.apps_box,
            logo_box: raw.logo_box,
            time_box: raw.time_box,
            usage_box: raw.usage_box,
            user_box: raw.user_box,
            support_box: raw.support_box,
            configs: raw.configs,
        })
    }
}

/// Presentation settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Configured subscription URL. Its origin prefixes path-only links,
    /// and it stands in when the panel sends no subscription link.
    pub panel_url: Url,
    /// Replaces the scheme and host of the subscription link.
    pub panel_domain: Option<String>,
    pub support_url: Option<String>,
    pub sections: Sections,
    pub locale: Locale,
}

impl DisplayConfig {
    pub fn new(panel_url: Url) -> Self {
        Self {
            panel_url,
            panel_domain: None,
            support_url: None,
            sections: Sections::default(),
            locale: Locale::default(),
        }
    }

    /// `scheme://host[:port]` of the configured panel URL.
    pub fn panel_origin(&self) -> String {
        self.panel_url.origin().ascii_serialization()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_toggles_hide_missing_keys() {
        let sections = Sections::from_json(r#"{"appsBox": true, "configs": true}"#).unwrap();
        assert!(sections.apps_box);
        assert!(sections.configs);
        assert!(!sections.usage_box);
        assert!(!sections.user_box);
    }

    #[test]
    fn json_toggles_reject_garbage() {
        assert!(Sections::from_json("{appsBox: yes}").is_err());
        assert!(Sections::from_json(r#"{"appsBox": "yes"}"#).is_err());
    }

    #[test]
    fn config_file_sections_default_to_shown() {
        let sections: Sections = serde_json::from_str(r#"{"timeBox": false}"#).unwrap();
        assert_eq!(
            sections,
            Sections {
                time_box: false,
                ..Sections::all(true)
            }
        );
    }

    #[test]
    fn origin_drops_path() {
        let display = DisplayConfig::new("https://panel.example.com:8443/sub/abc".parse().unwrap());
        assert_eq!(display.panel_origin(), "https://panel.example.com:8443");
    }
}
