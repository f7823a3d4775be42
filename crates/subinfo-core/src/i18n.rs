// ── Display labels ──
//
// Static translation tables. Lookups never fail: an unknown key comes
// back unchanged so it still renders as something.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Fa,
    En,
}

/// Label lookup bound to one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate `key`, falling back to the key itself.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let found = match self.locale {
            Locale::Fa => fa(key),
            Locale::En => en(key),
        };
        found.unwrap_or(key)
    }
}

fn fa(key: &str) -> Option<&'static str> {
    Some(match key {
        "status.active" => "فعال",
        "status.expired" => "منقضی شده",
        "status.disabled" => "غیرفعال",
        "status.on_hold" => "در انتظار",
        "status.limited" => "محدود شده",
        "status.unknown" => "نامشخص",

        "remaining_volume" => "حجم باقی‌مانده",
        "initial_volume" => "حجم اولیه",
        "remaining_time" => "زمان باقی‌مانده",
        "initial_time" => "زمان اولیه",
        "gigabytes" => "گیگابایت",
        "days" => "روز",
        "infinity" => "نامحدود",

        "support" => "پشتیبانی",
        "subscriptionLink" => "لینک اشتراک",
        "username" => "نام کاربری",
        "status" => "وضعیت",
        "expiresOn" => "تاریخ انقضا",

        "operatingSystems" => "سیستم‌عامل‌ها",
        "download" => "دانلود",
        "configuration" => "پیکربندی",
        "watchVideo" => "مشاهده ویدیو",
        "free" => "رایگان",
        "ad" => "تبلیغات",

        "configsList" => "لیست کانفیگ‌ها",
        "copyAll" => "کپی کردن همه",
        "subQRCode" => "کد QR اشتراک",
        "noConfigs" => "کانفیگی موجود نیست",

        "tutorialTitle" => "آموزش نصب",
        "noTutorial" => "آموزشی موجود نیست",

        "copyLink" => "کپی لینک",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "status.active" => "Active",
        "status.expired" => "Expired",
        "status.disabled" => "Disabled",
        "status.on_hold" => "On hold",
        "status.limited" => "Limited",
        "status.unknown" => "Unknown",

        "remaining_volume" => "Remaining volume",
        "initial_volume" => "Initial volume",
        "remaining_time" => "Remaining time",
        "initial_time" => "Initial time",
        "gigabytes" => "GB",
        "days" => "days",
        "infinity" => "Unlimited",

        "support" => "Support",
        "subscriptionLink" => "Subscription link",
        "username" => "Username",
        "status" => "Status",
        "expiresOn" => "Expires on",

        "operatingSystems" => "Operating systems",
        "download" => "Download",
        "configuration" => "Configuration",
        "watchVideo" => "Watch video",
        "free" => "Free",
        "ad" => "Ad",

        "configsList" => "Configs",
        "copyAll" => "Copy all",
        "subQRCode" => "Subscription QR code",
        "noConfigs" => "No configs available",

        "tutorialTitle" => "Setup guide",
        "noTutorial" => "No tutorial available",

        "copyLink" => "Copy link",
        _ => return None,
    })
}
