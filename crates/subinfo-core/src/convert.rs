// ── Wire → domain conversion ──
//
// Maps `subinfo_api::InfoResponse` into `SubscriptionInfo`: resolves the
// expiry from its two possible fields, parses timestamps, and derives
// the status from flags when the panel doesn't send one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use subinfo_api::{InfoResponse, WireTimestamp};
use tracing::debug;

use crate::model::status::{StatusFlags, derive_status};
use crate::model::SubscriptionInfo;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl From<InfoResponse> for SubscriptionInfo {
    fn from(raw: InfoResponse) -> Self {
        let flags = StatusFlags {
            expired: raw.expired,
            data_limit_reached: raw.data_limit_reached,
            enabled: raw.enabled,
            is_active: raw.is_active,
            activated_null: matches!(raw.activated, Some(None)),
        };
        let status = derive_status(raw.status.as_deref(), &flags);

        // `expire` wins when set; zero means "not set" on most panels.
        let expires_at = raw
            .expire
            .filter(|secs| *secs != 0.0)
            .and_then(from_epoch_seconds)
            .or_else(|| raw.expire_date.as_ref().and_then(parse_timestamp));

        Self {
            username: raw.username,
            used_traffic: raw.used_traffic.filter(|v| v.is_finite()),
            data_limit: raw.data_limit.filter(|v| v.is_finite()),
            expires_at,
            created_at: raw.created_at.as_ref().and_then(parse_timestamp),
            status,
            subscription_url: raw.subscription_url.filter(|u| !u.trim().is_empty()),
            links: raw.links,
        }
    }
}

/// Interpret a wire timestamp. Datetime strings without an offset are UTC.
pub fn parse_timestamp(ts: &WireTimestamp) -> Option<DateTime<Utc>> {
    match ts {
        WireTimestamp::Seconds(secs) => from_epoch_seconds(*secs),
        WireTimestamp::Text(text) => parse_datetime_text(text.trim()),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}

fn parse_datetime_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if let Ok(secs) = text.parse::<f64>() {
        return from_epoch_seconds(secs);
    }
    debug!(value = text, "unparseable timestamp ignored");
    None
}
