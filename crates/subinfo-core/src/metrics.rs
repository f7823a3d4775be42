// ── Derived display metrics ──
//
// Pure functions over a `SubscriptionInfo`: percentages, remaining and
// total strings for the usage and time gauges. `None` percentages mean
// "unlimited" and render as the infinity label.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::i18n::Translator;
use crate::model::{SubscriptionInfo, Tone};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Period assumed for the time gauge when the start date is unknown.
pub const ASSUMED_PERIOD_DAYS: i64 = 30;

/// Traffic gauge values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageMetrics {
    /// Percent of the quota used. `None` when unlimited.
    pub percentage: Option<f64>,
    pub remaining: String,
    pub total: String,
    pub tone: Tone,
}

/// Time gauge values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeMetrics {
    /// Percent of the period elapsed. `None` when there is no expiry.
    pub percentage: Option<f64>,
    pub remaining: String,
    pub remaining_days: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub tone: Tone,
}

impl UsageMetrics {
    pub fn compute(info: &SubscriptionInfo, tr: &Translator) -> Self {
        let percentage = usage_percentage(info.used_traffic, info.data_limit);
        Self {
            percentage,
            remaining: usage_remaining(info.used_traffic, info.data_limit, tr),
            total: format_traffic(info.data_limit, tr),
            tone: severity(percentage),
        }
    }
}

impl TimeMetrics {
    pub fn compute(info: &SubscriptionInfo, now: DateTime<Utc>, tr: &Translator) -> Self {
        let percentage = time_percentage(info.expires_at, info.created_at, now);
        Self {
            percentage,
            remaining: time_remaining(info.expires_at, now, tr),
            remaining_days: remaining_days(info.expires_at, now),
            expires_at: info.expires_at,
            tone: severity(percentage),
        }
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `used / limit * 100`, two decimals. Any non-finite intermediate
/// (missing values, zero limit) means unlimited.
pub fn usage_percentage(used: Option<f64>, limit: Option<f64>) -> Option<f64> {
    let pct = used? / limit? * 100.0;
    pct.is_finite().then(|| round2(pct))
}

/// Bytes as gibibytes with two decimals; missing or non-finite values
/// render as the infinity label.
pub fn format_traffic(bytes: Option<f64>, tr: &Translator) -> String {
    match bytes.filter(|b| b.is_finite()) {
        Some(bytes) => format!("{:.2} {}", bytes / BYTES_PER_GIB, tr.t("gigabytes")),
        None => tr.t("infinity").to_owned(),
    }
}

/// Quota left. Overuse shows as a negative amount.
pub fn usage_remaining(used: Option<f64>, limit: Option<f64>, tr: &Translator) -> String {
    let Some(limit) = limit else {
        return format_traffic(None, tr);
    };
    format_traffic(used.map(|used| limit - used), tr)
}

/// Elapsed share of the subscription period, capped at 100.
///
/// The period runs from `created_at` when it precedes the expiry, else
/// from `ASSUMED_PERIOD_DAYS` before it. The result is not floored, so an
/// expiry further out than the assumed period gives a negative value.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn time_percentage(
    expires_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<f64> {
    let expires_at = expires_at?;
    let start = match created_at.filter(|created| *created < expires_at) {
        Some(created) => created,
        // Expiries at the edge of the representable range have no start.
        None => expires_at.checked_sub_signed(Duration::days(ASSUMED_PERIOD_DAYS))?,
    };

    let total = (expires_at - start).num_seconds() as f64;
    let elapsed = (now - start).num_seconds() as f64;
    let pct = (elapsed / total * 100.0).min(100.0);
    pct.is_finite().then(|| round2(pct))
}

/// Whole days until expiry, rounded up. Negative once expired.
pub fn remaining_days(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    let secs = (expires_at? - now).num_seconds();
    let days = secs / SECONDS_PER_DAY;
    Some(if secs % SECONDS_PER_DAY > 0 { days + 1 } else { days })
}

pub fn time_remaining(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tr: &Translator,
) -> String {
    match remaining_days(expires_at, now) {
        Some(days) => format!("{days} {}", tr.t("days")),
        None => tr.t("infinity").to_owned(),
    }
}

/// Gauge tone: up to 30% good, up to 70% warning, beyond that critical.
pub fn severity(percentage: Option<f64>) -> Tone {
    match percentage {
        None => Tone::Good,
        Some(p) if p <= 30.0 => Tone::Good,
        Some(p) if p <= 70.0 => Tone::Warning,
        Some(_) => Tone::Critical,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::i18n::Locale;

    const GIB: f64 = BYTES_PER_GIB;

    fn en() -> Translator {
        Translator::new(Locale::En)
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn half_used() {
        assert_eq!(usage_percentage(Some(50.0), Some(100.0)), Some(50.0));
    }

    #[test]
    fn two_decimal_rounding() {
        assert_eq!(usage_percentage(Some(1.0), Some(3.0)), Some(33.33));
        assert_eq!(usage_percentage(Some(2.0), Some(3.0)), Some(66.67));
    }

    #[test]
    fn unlimited_or_missing_is_none() {
        assert_eq!(usage_percentage(Some(0.0), None), None);
        assert_eq!(usage_percentage(None, Some(100.0)), None);
        assert_eq!(usage_percentage(Some(5.0), Some(0.0)), None);
        assert_eq!(usage_percentage(Some(0.0), Some(0.0)), None);
    }

    #[test]
    fn overuse_exceeds_one_hundred() {
        assert_eq!(usage_percentage(Some(150.0), Some(100.0)), Some(150.0));
    }

    #[test]
    fn traffic_formatting() {
        let tr = en();
        assert_eq!(format_traffic(Some(1.5 * GIB), &tr), "1.50 GB");
        assert_eq!(format_traffic(Some(0.0), &tr), "0.00 GB");
        assert_eq!(format_traffic(None, &tr), "Unlimited");
        assert_eq!(format_traffic(Some(f64::NAN), &tr), "Unlimited");
    }

    #[test]
    fn formatting_is_idempotent() {
        let tr = Translator::default();
        let first = format_traffic(Some(12_345_678_901.0), &tr);
        let second = format_traffic(Some(12_345_678_901.0), &tr);
        assert_eq!(first, second);
        assert_eq!(
            usage_percentage(Some(7.0), Some(9.0)),
            usage_percentage(Some(7.0), Some(9.0))
        );
    }

    #[test]
    fn remaining_traffic() {
        let tr = en();
        assert_eq!(usage_remaining(Some(GIB), Some(3.0 * GIB), &tr), "2.00 GB");
        assert_eq!(usage_remaining(Some(4.0 * GIB), Some(3.0 * GIB), &tr), "-1.00 GB");
        assert_eq!(usage_remaining(Some(GIB), None, &tr), "Unlimited");
        assert_eq!(usage_remaining(None, Some(GIB), &tr), "Unlimited");
    }

    #[test]
    fn time_percentage_with_assumed_period() {
        // 15 of 30 days elapsed.
        let expires = at(31);
        let now = expires - Duration::days(15);
        assert_eq!(time_percentage(Some(expires), None, now), Some(50.0));
    }

    #[test]
    fn time_percentage_uses_created_at() {
        assert_eq!(time_percentage(Some(at(11)), Some(at(1)), at(3)), Some(20.0));
    }

    #[test]
    fn created_after_expiry_is_ignored() {
        let expires = at(31);
        let now = expires - Duration::days(15);
        assert_eq!(time_percentage(Some(expires), Some(at(31)), now), Some(50.0));
    }

    #[test]
    fn time_percentage_caps_but_does_not_floor() {
        assert_eq!(time_percentage(Some(at(1)), None, at(20)), Some(100.0));
        let far = at(1) + Duration::days(60);
        assert_eq!(time_percentage(Some(far), None, at(1)), Some(-100.0));
        assert_eq!(time_percentage(None, None, at(1)), None);
    }

    #[test]
    fn expiry_at_range_edge_is_unlimited() {
        let now = at(1);
        assert_eq!(time_percentage(Some(DateTime::<Utc>::MIN_UTC), None, now), None);
        assert!(remaining_days(Some(DateTime::<Utc>::MIN_UTC), now).is_some());
        assert!(time_percentage(Some(DateTime::<Utc>::MAX_UTC), None, now).is_some());
    }

    #[test]
    fn remaining_days_round_up() {
        let now = at(1);
        assert_eq!(remaining_days(Some(now + Duration::hours(1)), now), Some(1));
        assert_eq!(remaining_days(Some(now + Duration::days(2)), now), Some(2));
        assert_eq!(remaining_days(Some(now - Duration::hours(36)), now), Some(-1));
        assert_eq!(remaining_days(None, now), None);
    }

    #[test]
    fn time_remaining_labels() {
        let tr = en();
        let now = at(1);
        assert_eq!(time_remaining(Some(at(11)), now, &tr), "10 days");
        assert_eq!(time_remaining(None, now, &tr), "Unlimited");
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(severity(None), Tone::Good);
        assert_eq!(severity(Some(30.0)), Tone::Good);
        assert_eq!(severity(Some(30.01)), Tone::Warning);
        assert_eq!(severity(Some(70.0)), Tone::Warning);
        assert_eq!(severity(Some(70.5)), Tone::Critical);
    }
}
