// ── Subscription domain type ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::status::SubscriptionStatus;

/// One user's subscription as the panel reported it.
///
/// Immutable once built; a re-fetch produces a new value rather than
/// patching this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionInfo {
    pub username: Option<String>,
    /// Bytes used. `None` when the panel omitted it.
    pub used_traffic: Option<f64>,
    /// Byte quota. `None` means unlimited.
    pub data_limit: Option<f64>,
    /// Resolved from `expire`, falling back to `expire_date`.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: SubscriptionStatus,
    /// Subscription link as sent by the panel (absolute or path-only).
    pub subscription_url: Option<String>,
    /// Direct link list. `None` means the configs endpoint supplies it.
    pub links: Option<Vec<String>>,
}

impl SubscriptionInfo {
    /// Page title: `"{username} Sub Info"`, or the brand fallback.
    pub fn title(&self) -> String {
        match self.username.as_deref().filter(|u| !u.is_empty()) {
            Some(username) => format!("{username} Sub Info"),
            None => "Lightway Sub Info".into(),
        }
    }
}
