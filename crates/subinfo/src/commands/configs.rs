//! `subinfo configs`: the subscription's connection links.

use tabled::Tabled;

use subinfo_core::{ConfigEntry, PanelView};

use crate::cli::{ConfigsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
}

impl From<&ConfigEntry> for ConfigRow {
    fn from(c: &ConfigEntry) -> Self {
        Self {
            index: c.index + 1,
            name: c.name.clone(),
            protocol: c.protocol.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(view: &PanelView, args: &ConfigsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(configs) = &view.configs else {
        super::section_disabled("configs", global);
        return Ok(());
    };

    let selected = filter_protocol(configs, args.protocol.as_deref());
    let out = output::render_list(
        &global.output,
        &selected,
        |c| ConfigRow::from(c),
        |c| c.uri.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn filter_protocol(configs: &[ConfigEntry], protocol: Option<&str>) -> Vec<ConfigEntry> {
    configs
        .iter()
        .filter(|c| protocol.is_none_or(|p| c.protocol.eq_ignore_ascii_case(p)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<ConfigEntry> {
        ConfigEntry::from_links(&[
            "vless://a@h:443#one".to_owned(),
            "trojan://b@h:443#two".to_owned(),
            "VLESS://c@h:443#three".to_owned(),
        ])
    }

    #[test]
    fn protocol_filter_ignores_case() {
        let picked = filter_protocol(&entries(), Some("vless"));
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|c| c.protocol.eq_ignore_ascii_case("vless")));
    }

    #[test]
    fn no_filter_keeps_everything() {
        assert_eq!(filter_protocol(&entries(), None).len(), 3);
    }

    #[test]
    fn rows_are_one_based() {
        let entries = entries();
        let row = ConfigRow::from(&entries[0]);
        assert_eq!(row.index, 1);
    }
}
