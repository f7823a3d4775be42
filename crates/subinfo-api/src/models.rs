// Panel response types
//
// Wire model for the subscription info endpoint. Panels built on different
// backends disagree on field presence and types, so every field is optional
// and a value of the wrong type counts as absent instead of failing the
// whole payload.

use serde::{Deserialize, Deserializer, Serialize};

// ── Info payload ─────────────────────────────────────────────────────

/// Raw JSON object returned by `GET {subscription_url}/info`.
///
/// ```json
/// { "username": "alice", "used_traffic": 1073741824, "data_limit": null,
///   "expire": 1735689600, "status": "active",
///   "subscription_url": "/sub/abc", "links": ["vless://...", "False"] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,

    /// Bytes consumed in the current period.
    #[serde(default, deserialize_with = "lenient_number")]
    pub used_traffic: Option<f64>,
    /// Byte quota; `null` means unlimited.
    #[serde(default, deserialize_with = "lenient_number")]
    pub data_limit: Option<f64>,

    /// Expiry as epoch seconds.
    #[serde(default, deserialize_with = "lenient_number")]
    pub expire: Option<f64>,
    /// Expiry under the alternate field name; seconds or a datetime string.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub expire_date: Option<WireTimestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<WireTimestamp>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub expired: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub data_limit_reached: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: Option<bool>,
    /// `None` = field absent, `Some(None)` = explicit `null`.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub activated: Option<Option<serde_json::Value>>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub subscription_url: Option<String>,
    /// Non-string elements are dropped.
    #[serde(default, deserialize_with = "lenient_links")]
    pub links: Option<Vec<String>>,

    /// Catch-all for backend-specific fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A timestamp as the panel sends it: epoch seconds or a datetime string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Seconds(f64),
    Text(String),
}

// ── Lenient field decoders ───────────────────────────────────────────

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn lenient_links<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<WireTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64().map(WireTimestamp::Seconds),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(WireTimestamp::Text(s)),
        _ => None,
    }))
}

#[allow(clippy::option_option)]
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<serde_json::Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Value>::deserialize(deserializer).map(Some)
}
