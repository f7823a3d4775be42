//! `subinfo show`: the whole panel as one detail view.

use subinfo_core::{LinkSource, PanelView, Translator};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub fn handle(view: &PanelView, tr: &Translator, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        view,
        |v| detail(v, tr, color),
        |v| v.subscription_link.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(view: &PanelView, tr: &Translator, color: bool) -> String {
    let mut lines = Vec::new();

    if view.sections.logo_box {
        lines.push(output::heading(&view.title, color));
        lines.push(String::new());
    }

    if let Some(username) = &view.username {
        lines.push(format!("{}: {username}", tr.t("username")));
    }
    if let Some(status) = &view.status {
        lines.push(format!(
            "{}: {}",
            tr.t("status"),
            output::paint(&status.label, status.tone, color)
        ));
    }
    if view.sections.user_box {
        lines.push(format!(
            "{}: {}",
            tr.t("subscriptionLink"),
            view.subscription_link
        ));
    }

    if let Some(support) = &view.support_url {
        lines.push(format!("{}: {support}", tr.t("support")));
    }

    if let Some(usage) = &view.usage {
        lines.push(format!(
            "{}: {} ({})",
            tr.t("remaining_volume"),
            output::paint(&usage.remaining, usage.tone, color),
            percent(usage.percentage, tr)
        ));
        lines.push(format!("{}: {}", tr.t("initial_volume"), usage.total));
    }

    if let Some(time) = &view.time {
        lines.push(format!(
            "{}: {} ({})",
            tr.t("remaining_time"),
            output::paint(&time.remaining, time.tone, color),
            percent(time.percentage, tr)
        ));
        if let Some(expires_at) = time.expires_at {
            lines.push(format!(
                "{}: {}",
                tr.t("expiresOn"),
                expires_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
    }

    if let Some(configs) = &view.configs {
        let note = match view.config_source {
            LinkSource::Unavailable => " (configs endpoint unreachable)",
            LinkSource::Undecodable => " (configs body could not be decoded)",
            _ => "",
        };
        lines.push(format!("{}: {}{note}", tr.t("configsList"), configs.len()));
    }

    lines.join("\n")
}

fn percent(value: Option<f64>, tr: &Translator) -> String {
    value.map_or_else(|| tr.t("infinity").to_owned(), |p| format!("{p:.2}%"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use subinfo_core::{
        AppCatalog, DisplayConfig, Locale, ResolvedLinks, Sections, SubscriptionInfo,
        SubscriptionStatus, build_view,
    };

    use super::*;

    fn view(locale: Locale, sections: Sections) -> PanelView {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let info = SubscriptionInfo {
            username: Some("alice".into()),
            used_traffic: Some(1.0),
            data_limit: None,
            expires_at: Some(now + Duration::days(3)),
            created_at: None,
            status: SubscriptionStatus::Active,
            subscription_url: Some("/sub/abc".into()),
            links: None,
        };
        let mut display =
            DisplayConfig::new("https://panel.example.com/sub/abc".parse().unwrap());
        display.locale = locale;
        display.sections = sections;
        build_view(
            &info,
            &ResolvedLinks::empty(LinkSource::Direct),
            &display,
            &AppCatalog::default(),
            now,
        )
    }

    #[test]
    fn detail_labels_follow_locale() {
        let fa = Translator::new(Locale::Fa);
        let text = detail(&view(Locale::Fa, Sections::all(true)), &fa, false);
        assert!(text.contains(&format!("{}: alice", fa.t("username"))));
        assert!(text.contains(fa.t("status")));
        assert!(text.contains(&format!("{}: 2025-06-04 00:00 UTC", fa.t("expiresOn"))));
        assert!(!text.contains("Username"));
        assert!(!text.contains("until"));
    }

    #[test]
    fn user_section_off_hides_identity() {
        let en = Translator::new(Locale::En);
        let mut sections = Sections::all(true);
        sections.user_box = false;
        let text = detail(&view(Locale::En, sections), &en, false);
        assert!(text.starts_with("alice Sub Info"));
        assert!(!text.contains("Username"));
        assert!(!text.contains("Status"));
        assert!(!text.contains("Subscription link"));
    }
}
