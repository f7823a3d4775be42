//! Config subcommand handlers.

use subinfo_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)
                    .map_err(|e| CliError::Serialization(e.to_string()))?,
                _ => output::render_single(
                    &global.output,
                    &cfg,
                    |_| String::new(),
                    |_| String::new(),
                )?,
            };
            if !global.quiet {
                eprintln!(
                    "Active profile: {}",
                    config::active_profile_name(global, &cfg)
                );
            }
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init {
            name,
            sub_url,
            set_default,
            force,
        } => {
            let mut cfg = config::load_config()?;
            init_profile(&mut cfg, &name, sub_url, set_default, force, global)?;
            let path = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Saved profile '{name}' to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Insert (or with `force`, replace) a profile in `cfg`.
fn init_profile(
    cfg: &mut Config,
    name: &str,
    sub_url: Option<String>,
    set_default: bool,
    force: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if cfg.profiles.contains_key(name) && !force {
        return Err(CliError::ProfileExists { name: name.into() });
    }

    let raw = sub_url
        .or_else(|| global.url.clone())
        .ok_or_else(|| CliError::Validation {
            field: "sub-url".into(),
            reason: "a subscription URL is required (--sub-url or --url)".into(),
        })?;
    let url = subinfo_config::parse_url("sub-url", &raw)?;

    let profile = Profile {
        url: url.to_string(),
        panel_domain: global.panel_domain.clone(),
        insecure: global.insecure.then_some(true),
        timeout: global.timeout,
        lang: global.lang.map(Into::into),
        ..Profile::default()
    };
    cfg.profiles.insert(name.to_owned(), profile);

    let default_missing = cfg
        .default_profile
        .as_ref()
        .is_none_or(|d| !cfg.profiles.contains_key(d));
    if set_default || default_missing {
        cfg.default_profile = Some(name.to_owned());
    }
    Ok(())
}
