//! `subinfo apps`: recommended client apps per operating system.

use serde::Serialize;
use tabled::Tabled;

use subinfo_core::{AppView, OsView, PanelView};

use crate::cli::{AppsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

/// One app, flattened with its operating system for list output.
#[derive(Debug, Serialize)]
struct AppEntry<'a> {
    os: &'a str,
    #[serde(flatten)]
    app: &'a AppView,
}

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "OS")]
    os: String,
    #[tabled(rename = "App")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Download")]
    download: String,
    #[tabled(rename = "Import")]
    import: String,
}

impl AppRow {
    fn new(entry: &AppEntry<'_>) -> Self {
        let app = entry.app;
        Self {
            os: entry.os.to_owned(),
            name: app.name.clone(),
            price: app.price_label.clone().unwrap_or_default(),
            download: app.download_link.clone().unwrap_or_default(),
            import: app.config_link.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(view: &PanelView, args: &AppsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(systems) = &view.apps else {
        super::section_disabled("apps", global);
        return Ok(());
    };

    let systems = select_os(systems, args.os.as_deref())?;
    let entries: Vec<AppEntry<'_>> = systems
        .iter()
        .flat_map(|os| {
            os.apps.iter().map(|app| AppEntry {
                os: &os.eng_name,
                app,
            })
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &entries,
        |e| AppRow::new(e),
        |e| {
            let link = e.app.download_link.as_deref().unwrap_or_default();
            format!("{}\t{}\t{link}", e.os, e.app.name)
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Narrow to one OS by English or localized name.
fn select_os<'a>(
    systems: &'a [OsView],
    wanted: Option<&str>,
) -> Result<Vec<&'a OsView>, CliError> {
    let Some(wanted) = wanted else {
        return Ok(systems.iter().collect());
    };

    systems
        .iter()
        .find(|os| os.eng_name.eq_ignore_ascii_case(wanted) || os.name == wanted)
        .map(|os| vec![os])
        .ok_or_else(|| CliError::NotFound {
            resource_type: "operating system".into(),
            identifier: wanted.to_owned(),
            available: systems
                .iter()
                .map(|os| os.eng_name.clone())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn os(eng: &str, name: &str) -> OsView {
        OsView {
            name: name.into(),
            eng_name: eng.into(),
            apps: Vec::new(),
        }
    }

    #[test]
    fn os_matches_either_name() {
        let systems = vec![os("Android", "اندروید"), os("iOS", "آی‌او‌اس")];
        assert_eq!(select_os(&systems, Some("android")).unwrap()[0].eng_name, "Android");
        assert_eq!(select_os(&systems, Some("آی‌او‌اس")).unwrap()[0].eng_name, "iOS");
        assert_eq!(select_os(&systems, None).unwrap().len(), 2);
    }

    #[test]
    fn unknown_os_lists_available() {
        let systems = vec![os("Android", "اندروید"), os("iOS", "آی‌او‌اس")];
        match select_os(&systems, Some("Plan9")) {
            Err(CliError::NotFound { available, .. }) => assert_eq!(available, "Android, iOS"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
