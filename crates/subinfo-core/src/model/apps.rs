// ── Client app catalog ──
//
// Recommended client apps grouped by operating system. The JSON shape
// (camelCase keys) is shared with the catalogs panel operators already
// maintain, so an operator file can replace the built-in one as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::CoreError;

const BUILTIN_CATALOG: &str = include_str!("../../assets/os.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCatalog {
    #[serde(default)]
    pub operating_systems: Vec<OperatingSystem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystem {
    /// Localized name; `eng_name` is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub eng_name: String,
    #[serde(default)]
    pub apps: Vec<ClientApp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientApp {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fa_description: Option<String>,
    /// `"0"` means free.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub is_ad: bool,
    #[serde(default)]
    pub download_link: Option<String>,
    /// Deep-link template; `{url}` is replaced by the subscription link.
    #[serde(default)]
    pub config_link: Option<String>,
    #[serde(default)]
    pub tutorial_steps: Vec<TutorialStep>,
    #[serde(default)]
    pub video_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    #[serde(default)]
    pub step_text: Option<String>,
    #[serde(default)]
    pub fa_step_text: Option<String>,
    #[serde(default)]
    pub step_image: Option<String>,
}

impl AppCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
            error!(error = %e, "built-in app catalog is invalid");
            Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load an operator-supplied catalog file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| CoreError::Config {
            message: format!("cannot read app catalog {}: {e}", path.display()),
        })?;
        Self::from_json(&json).map_err(|e| CoreError::Config {
            message: format!("invalid app catalog {}: {e}", path.display()),
        })
    }

    /// Case-insensitive lookup by English OS name.
    pub fn find_os(&self, eng_name: &str) -> Option<&OperatingSystem> {
        self.operating_systems
            .iter()
            .find(|os| os.eng_name.eq_ignore_ascii_case(eng_name))
    }
}
