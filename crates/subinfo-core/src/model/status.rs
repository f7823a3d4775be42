// ── Subscription status ──

use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display};

/// Display tone shared by status badges and usage gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Good,
    Warning,
    Critical,
    Muted,
    Neutral,
}

/// Account state as shown on the user card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Disabled,
    OnHold,
    Limited,
    /// Nothing in the payload determined a state.
    Unknown,
    /// An explicit status the panel sent that we don't recognize, kept verbatim.
    Other(String),
}

impl SubscriptionStatus {
    /// Interpret an explicit status string from the panel.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "expired" => Self::Expired,
            "disabled" => Self::Disabled,
            "on_hold" => Self::OnHold,
            "limited" => Self::Limited,
            "" | "unknown" => Self::Unknown,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire/translation key (`status.{key}`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Disabled => "disabled",
            Self::OnHold => "on_hold",
            Self::Limited => "limited",
            Self::Unknown => "unknown",
            Self::Other(raw) => raw,
        }
    }

    pub fn label_key(&self) -> String {
        format!("status.{}", self.as_str())
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Good,
            Self::Expired | Self::Limited => Tone::Critical,
            Self::OnHold => Tone::Warning,
            Self::Disabled => Tone::Muted,
            Self::Unknown | Self::Other(_) => Tone::Neutral,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SubscriptionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Boolean hints some panels send instead of an explicit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StatusFlags {
    pub expired: Option<bool>,
    pub data_limit_reached: Option<bool>,
    pub enabled: Option<bool>,
    pub is_active: Option<bool>,
    /// `activated` was present and explicitly `null`.
    pub activated_null: bool,
}

/// Resolve the displayed status. Priority order, first match wins:
/// explicit status, expired/limit-reached, disabled, active, on hold.
pub fn derive_status(explicit: Option<&str>, flags: &StatusFlags) -> SubscriptionStatus {
    if let Some(raw) = explicit.filter(|s| !s.is_empty()) {
        return SubscriptionStatus::parse(raw);
    }
    if flags.expired == Some(true) || flags.data_limit_reached == Some(true) {
        SubscriptionStatus::Expired
    } else if flags.enabled == Some(false) {
        SubscriptionStatus::Disabled
    } else if flags.is_active == Some(true) {
        SubscriptionStatus::Active
    } else if flags.activated_null {
        SubscriptionStatus::OnHold
    } else {
        SubscriptionStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_status_wins() {
        let flags = StatusFlags {
            expired: Some(true),
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(Some("active"), &flags), SubscriptionStatus::Active);
    }

    #[test]
    fn empty_explicit_status_is_ignored() {
        let flags = StatusFlags {
            is_active: Some(true),
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(Some(""), &flags), SubscriptionStatus::Active);
    }

    #[test]
    fn expired_flag() {
        let flags = StatusFlags {
            expired: Some(true),
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(None, &flags), SubscriptionStatus::Expired);
    }

    #[test]
    fn data_limit_reached_counts_as_expired() {
        let flags = StatusFlags {
            data_limit_reached: Some(true),
            enabled: Some(false),
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(None, &flags), SubscriptionStatus::Expired);
    }

    #[test]
    fn disabled_before_active() {
        let flags = StatusFlags {
            enabled: Some(false),
            is_active: Some(true),
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(None, &flags), SubscriptionStatus::Disabled);
    }

    #[test]
    fn active_flag() {
        let flags = StatusFlags {
            is_active: Some(true),
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(None, &flags), SubscriptionStatus::Active);
    }

    #[test]
    fn null_activation_is_on_hold() {
        let flags = StatusFlags {
            activated_null: true,
            ..StatusFlags::default()
        };
        assert_eq!(derive_status(None, &flags), SubscriptionStatus::OnHold);
    }

    #[test]
    fn nothing_known_is_unknown() {
        let status = derive_status(None, &StatusFlags::default());
        assert_eq!(status, SubscriptionStatus::Unknown);
        assert_eq!(status.tone(), Tone::Neutral);
    }

    #[test]
    fn unrecognized_status_is_kept() {
        let status = SubscriptionStatus::parse("suspended");
        assert_eq!(status.as_str(), "suspended");
        assert_eq!(status.label_key(), "status.suspended");
        assert_eq!(status.tone(), Tone::Neutral);
    }

    #[test]
    fn tones() {
        assert_eq!(SubscriptionStatus::Limited.tone(), Tone::Critical);
        assert_eq!(SubscriptionStatus::OnHold.tone(), Tone::Warning);
        assert_eq!(SubscriptionStatus::Disabled.tone(), Tone::Muted);
        assert_eq!(Tone::Critical.to_string(), "critical");
    }
}
