// ── Configuration link entries ──

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::links::decode_base64_text;

/// One proxy configuration link, with a display name pulled from the URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub index: usize,
    pub name: String,
    pub protocol: String,
    pub uri: String,
}

impl ConfigEntry {
    pub fn new(index: usize, uri: &str) -> Self {
        let protocol = protocol_of(uri);
        let name = display_name(uri).unwrap_or_else(|| format!("{protocol} #{}", index + 1));
        Self {
            index,
            name,
            protocol,
            uri: uri.to_owned(),
        }
    }

    /// Build entries for a whole list, keeping order.
    pub fn from_links(links: &[String]) -> Vec<Self> {
        links
            .iter()
            .enumerate()
            .map(|(index, uri)| Self::new(index, uri))
            .collect()
    }
}

/// Lowercased URI scheme, or `"unknown"`.
fn protocol_of(uri: &str) -> String {
    uri.split_once("://")
        .map(|(scheme, _)| scheme.trim())
        .filter(|scheme| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
        })
        .map_or_else(|| "unknown".into(), str::to_ascii_lowercase)
}

/// Human label embedded in the link.
///
/// `vmess://` carries base64 JSON whose `ps` field is the name; every other
/// scheme uses the URL fragment.
fn display_name(uri: &str) -> Option<String> {
    if let Some(payload) = uri.strip_prefix("vmess://") {
        let encoded = payload.split(['?', '#']).next().unwrap_or_default();
        if let Some(name) = vmess_name(encoded) {
            return Some(name);
        }
    }

    let (_, fragment) = uri.rsplit_once('#')?;
    let decoded = percent_decode_str(fragment).decode_utf8_lossy();
    let name = decoded.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

fn vmess_name(encoded: &str) -> Option<String> {
    let json = decode_base64_text(encoded).ok()?;
    let value: serde_json::Value = serde_json::from_str(&json).ok()?;
    value
        .get("ps")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
