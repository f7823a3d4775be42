// ── View-model builder ──
//
// Assembles everything a renderer needs from one loaded subscription:
// labels are already translated, sections switched off in `Sections` are
// `None`, and app deep links point at the adjusted subscription link.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{DisplayConfig, Sections};
use crate::i18n::{Locale, Translator};
use crate::links::{LinkSource, ResolvedLinks};
use crate::metrics::{TimeMetrics, UsageMetrics};
use crate::model::{
    AppCatalog, ClientApp, ConfigEntry, OperatingSystem, SubscriptionInfo, SubscriptionStatus,
    Tone, TutorialStep,
};

const SHADOWROCKET: &str = "Shadowrocket";

/// Everything shown for one subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub title: String,
    pub username: Option<String>,
    pub status: Option<StatusView>,
    pub subscription_link: String,
    pub support_url: Option<String>,
    pub usage: Option<UsageMetrics>,
    pub time: Option<TimeMetrics>,
    pub apps: Option<Vec<OsView>>,
    pub configs: Option<Vec<ConfigEntry>>,
    pub config_source: LinkSource,
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub key: String,
    pub label: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsView {
    pub name: String,
    pub eng_name: String,
    pub apps: Vec<AppView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppView {
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub price_label: Option<String>,
    pub is_ad: bool,
    /// Hidden for ads.
    pub download_link: Option<String>,
    /// One-tap import link carrying the subscription.
    pub config_link: Option<String>,
    pub video_link: Option<String>,
    pub tutorial: Vec<TutorialView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialView {
    pub text: Option<String>,
    pub image: Option<String>,
}

impl StatusView {
    pub fn new(status: &SubscriptionStatus, tr: &Translator) -> Self {
        Self {
            key: status.as_str().to_owned(),
            label: tr.t(&status.label_key()).to_owned(),
            tone: status.tone(),
        }
    }
}

/// Build the view-model. Deterministic for the same inputs and `now`.
pub fn build_view(
    info: &SubscriptionInfo,
    links: &ResolvedLinks,
    display: &DisplayConfig,
    catalog: &AppCatalog,
    now: DateTime<Utc>,
) -> PanelView {
    let tr = Translator::new(display.locale);
    let sections = display.sections;
    let subscription_link = adjust_subscription_url(info.subscription_url.as_deref(), display);

    let apps = sections.apps_box.then(|| {
        catalog
            .operating_systems
            .iter()
            .map(|os| os_view(os, &subscription_link, &tr))
            .collect()
    });

    PanelView {
        title: info.title(),
        username: info.username.clone().filter(|_| sections.user_box),
        status: sections
            .user_box
            .then(|| StatusView::new(&info.status, &tr)),
        support_url: display.support_url.clone().filter(|_| sections.support_box),
        usage: sections
            .usage_box
            .then(|| UsageMetrics::compute(info, &tr)),
        time: sections
            .time_box
            .then(|| TimeMetrics::compute(info, now, &tr)),
        apps,
        configs: sections
            .configs
            .then(|| ConfigEntry::from_links(&links.links)),
        config_source: links.source,
        subscription_link,
        sections,
    }
}

// ── Subscription link ────────────────────────────────────────────────

/// The subscription link users should import.
///
/// With a panel-domain override, the link's `http(s)://host` prefix is
/// swapped for the override (path-only links get it prepended). Without
/// one, absolute links pass through and path-only links are joined onto
/// the configured panel's origin. A missing link falls back to the
/// configured subscription URL.
pub fn adjust_subscription_url(link: Option<&str>, display: &DisplayConfig) -> String {
    let configured = display.panel_url.as_str();
    let link = link.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(configured);

    if let Some(domain) = display
        .panel_domain
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        return match host_prefix_span(link) {
            Some((start, end)) => format!("{}{domain}{}", &link[..start], &link[end..]),
            None => join_origin(domain, link),
        };
    }

    if is_absolute(link) {
        link.to_owned()
    } else {
        join_origin(&display.panel_origin(), link)
    }
}

/// Shadowrocket import link: `sub://` + base64 of the subscription link.
pub fn shadowrocket_link(subscription_link: &str) -> String {
    format!("sub://{}", STANDARD.encode(subscription_link))
}

fn is_absolute(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Byte span of the first `http(s)://host[:port]` in `link`.
fn host_prefix_span(link: &str) -> Option<(usize, usize)> {
    let lower = link.to_ascii_lowercase();
    let start = match (lower.find("https://"), lower.find("http://")) {
        (Some(a), Some(b)) => a.min(b),
        (a, b) => a.or(b)?,
    };
    let scheme_len = if lower[start..].starts_with("https://") { 8 } else { 7 };
    let host_start = start + scheme_len;
    let host_len = link[host_start..].find('/').unwrap_or(link.len() - host_start);
    (host_len > 0).then_some((start, host_start + host_len))
}

fn join_origin(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

// ── Apps ─────────────────────────────────────────────────────────────

fn os_view(os: &OperatingSystem, subscription_link: &str, tr: &Translator) -> OsView {
    let name = match tr.locale() {
        Locale::Fa => os.name.clone().unwrap_or_else(|| os.eng_name.clone()),
        Locale::En => os.eng_name.clone(),
    };
    OsView {
        name,
        eng_name: os.eng_name.clone(),
        apps: os
            .apps
            .iter()
            .map(|app| app_view(app, subscription_link, tr))
            .collect(),
    }
}

/// Price badge: free, ad, or `"{price} $"`.
pub fn price_label(app: &ClientApp, tr: &Translator) -> Option<String> {
    match app.price.as_deref() {
        Some("0") => Some(tr.t("free").to_owned()),
        _ if app.is_ad => Some(tr.t("ad").to_owned()),
        Some(price) => Some(format!("{price} $")),
        None => None,
    }
}

/// Deep link that imports the subscription into `app`.
pub fn app_config_link(app: &ClientApp, subscription_link: &str) -> Option<String> {
    match &app.config_link {
        Some(template) => Some(template.replace("{url}", subscription_link)),
        None if app.name == SHADOWROCKET => Some(shadowrocket_link(subscription_link)),
        None => None,
    }
}

fn app_view(app: &ClientApp, subscription_link: &str, tr: &Translator) -> AppView {
    let description = localized(
        tr.locale(),
        app.fa_description.as_deref(),
        app.description.as_deref(),
    );
    AppView {
        name: app.name.clone(),
        logo: app.logo.clone(),
        description,
        price_label: price_label(app, tr),
        is_ad: app.is_ad,
        download_link: app.download_link.clone().filter(|_| !app.is_ad),
        config_link: app_config_link(app, subscription_link),
        video_link: app.video_link.clone(),
        tutorial: app
            .tutorial_steps
            .iter()
            .map(|step| tutorial_view(step, tr.locale()))
            .collect(),
    }
}

fn tutorial_view(step: &TutorialStep, locale: Locale) -> TutorialView {
    TutorialView {
        text: localized(locale, step.fa_step_text.as_deref(), step.step_text.as_deref()),
        image: step.step_image.clone(),
    }
}

fn localized(locale: Locale, fa: Option<&str>, en: Option<&str>) -> Option<String> {
    let (first, second) = match locale {
        Locale::Fa => (fa, en),
        Locale::En => (en, fa),
    };
    first.filter(|s| !s.is_empty()).or(second).map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

    fn display() -> DisplayConfig {
        let mut display =
            DisplayConfig::new("https://panel.example.com/sub/abc".parse().unwrap());
        display.locale = Locale::En;
        display
    }

    fn info() -> SubscriptionInfo {
        SubscriptionInfo {
            username: Some("alice".into()),
            used_traffic: Some(GIB),
            data_limit: Some(4.0 * GIB),
            expires_at: Some(now() + Duration::days(10)),
            created_at: None,
            status: SubscriptionStatus::Active,
            subscription_url: Some("/sub/abc".into()),
            links: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn links() -> ResolvedLinks {
        ResolvedLinks {
            source: LinkSource::Base64,
            links: vec!["vless://a#one".into(), "trojan://b".into()],
        }
    }

    fn app(name: &str) -> ClientApp {
        ClientApp {
            name: name.into(),
            logo: None,
            description: Some("desc".into()),
            fa_description: Some("توضیح".into()),
            price: Some("0".into()),
            is_ad: false,
            download_link: Some("https://example.com/dl".into()),
            config_link: None,
            tutorial_steps: Vec::new(),
            video_link: None,
        }
    }

    #[test]
    fn full_view() {
        let view = build_view(&info(), &links(), &display(), &AppCatalog::builtin(), now());

        assert_eq!(view.title, "alice Sub Info");
        let status = view.status.as_ref().unwrap();
        assert_eq!(status.label, "Active");
        assert_eq!(status.tone, Tone::Good);
        assert_eq!(view.subscription_link, "https://panel.example.com/sub/abc");

        let usage = view.usage.unwrap();
        assert_eq!(usage.percentage, Some(25.0));
        assert_eq!(usage.remaining, "3.00 GB");
        assert_eq!(usage.total, "4.00 GB");

        let time = view.time.unwrap();
        assert_eq!(time.remaining, "10 days");

        let configs = view.configs.unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].name, "one");
        assert_eq!(view.config_source, LinkSource::Base64);
        assert!(!view.apps.unwrap().is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        let catalog = AppCatalog::builtin();
        let a = build_view(&info(), &links(), &display(), &catalog, now());
        let b = build_view(&info(), &links(), &display(), &catalog, now());
        assert_eq!(a, b);
    }

    #[test]
    fn disabled_sections_are_none() {
        let mut display = display();
        display.sections = Sections::all(false);
        display.support_url = Some("https://t.me/support".into());

        let view = build_view(&info(), &links(), &display, &AppCatalog::builtin(), now());

        assert!(view.usage.is_none());
        assert!(view.time.is_none());
        assert!(view.apps.is_none());
        assert!(view.configs.is_none());
        assert!(view.support_url.is_none());
        assert!(view.username.is_none());
        assert!(view.status.is_none());
    }

    #[test]
    fn unlimited_usage_is_good() {
        let mut info = info();
        info.data_limit = None;
        let view = build_view(&info, &links(), &display(), &AppCatalog::default(), now());
        let usage = view.usage.unwrap();
        assert_eq!(usage.percentage, None);
        assert_eq!(usage.total, "Unlimited");
        assert_eq!(usage.tone, Tone::Good);
    }

    #[test]
    fn relative_link_gets_panel_origin() {
        assert_eq!(
            adjust_subscription_url(Some("/sub/xyz"), &display()),
            "https://panel.example.com/sub/xyz"
        );
    }

    #[test]
    fn absolute_link_passes_through() {
        assert_eq!(
            adjust_subscription_url(Some("https://other.example.net/sub/xyz"), &display()),
            "https://other.example.net/sub/xyz"
        );
    }

    #[test]
    fn domain_override_replaces_host() {
        let mut display = display();
        display.panel_domain = Some("https://cdn.example.org".into());
        assert_eq!(
            adjust_subscription_url(Some("http://10.0.0.1:8000/sub/xyz"), &display),
            "https://cdn.example.org/sub/xyz"
        );
        assert_eq!(
            adjust_subscription_url(Some("/sub/xyz"), &display),
            "https://cdn.example.org/sub/xyz"
        );
    }

    #[test]
    fn missing_link_uses_configured_url() {
        assert_eq!(
            adjust_subscription_url(None, &display()),
            "https://panel.example.com/sub/abc"
        );
    }

    #[test]
    fn config_link_template() {
        let mut app = app("v2rayNG");
        app.config_link = Some("v2rayng://install-config?url={url}".into());
        assert_eq!(
            app_config_link(&app, "https://p/sub/a").as_deref(),
            Some("v2rayng://install-config?url=https://p/sub/a")
        );
    }

    #[test]
    fn shadowrocket_gets_sub_scheme() {
        let link = app_config_link(&app("Shadowrocket"), "https://p/sub/a").unwrap();
        assert_eq!(link, format!("sub://{}", STANDARD.encode("https://p/sub/a")));
        assert_eq!(app_config_link(&app("Hiddify"), "https://p/sub/a"), None);
    }

    #[test]
    fn price_labels() {
        let tr = Translator::new(Locale::En);
        assert_eq!(price_label(&app("a"), &tr).as_deref(), Some("Free"));

        let mut paid = app("b");
        paid.price = Some("2.99".into());
        assert_eq!(price_label(&paid, &tr).as_deref(), Some("2.99 $"));

        let mut ad = app("c");
        ad.price = Some("5".into());
        ad.is_ad = true;
        assert_eq!(price_label(&ad, &tr).as_deref(), Some("Ad"));
    }

    #[test]
    fn ads_hide_download_link() {
        let mut ad = app("c");
        ad.is_ad = true;
        let view = app_view(&ad, "https://p/sub/a", &Translator::new(Locale::En));
        assert_eq!(view.download_link, None);
    }

    #[test]
    fn descriptions_follow_locale() {
        let a = app("x");
        let fa = app_view(&a, "", &Translator::new(Locale::Fa));
        let en = app_view(&a, "", &Translator::new(Locale::En));
        assert_eq!(fa.description.as_deref(), Some("توضیح"));
        assert_eq!(en.description.as_deref(), Some("desc"));
    }
}
