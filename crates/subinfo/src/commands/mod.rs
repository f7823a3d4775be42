//! Command dispatch: bridges CLI args -> panel refresh -> output formatting.

pub mod apps;
pub mod config_cmd;
pub mod configs;
pub mod link;
pub mod show;

use subinfo_core::{Panel, Translator};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a panel-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, panel: &Panel, global: &GlobalOpts) -> Result<(), CliError> {
    let view = panel.refresh().await?;
    let tr = Translator::new(panel.display().locale);

    match cmd {
        Command::Show => show::handle(&view, &tr, global),
        Command::Configs(args) => configs::handle(&view, &args, global),
        Command::Apps(args) => apps::handle(&view, &args, global),
        Command::Link(args) => link::handle(&view, &args, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "offline command routed to panel dispatch".into(),
        )),
    }
}

/// Note on stderr that a section is switched off, unless quiet.
fn section_disabled(name: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("The {name} section is disabled for this profile");
    }
}
