//! Clap derive structures for the `subinfo` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// subinfo -- VPN subscription info from the command line
#[derive(Debug, Parser)]
#[command(
    name = "subinfo",
    version,
    about = "Show VPN subscription usage, expiry, and config links",
    long_about = "Fetches a subscription from its panel and shows what the\n\
        subscription page would: account status, traffic and time left,\n\
        recommended client apps, and the list of configuration links.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Subscription profile to use
    #[arg(long, short = 'p', env = "SUBINFO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Subscription URL (overrides profile)
    #[arg(long, short = 'u', env = "SUBINFO_URL", global = true)]
    pub url: Option<String>,

    /// Replace the scheme and host of the displayed subscription link
    #[arg(long, env = "SUBINFO_PANEL_DOMAIN", global = true)]
    pub panel_domain: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SUBINFO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Display language (overrides profile)
    #[arg(long, env = "SUBINFO_LANG", global = true)]
    pub lang: Option<Lang>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SUBINFO_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SUBINFO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Lang {
    /// Persian
    Fa,
    /// English
    En,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the full subscription panel
    #[command(alias = "s")]
    Show,

    /// List configuration links
    #[command(alias = "c")]
    Configs(ConfigsArgs),

    /// Recommended client apps with one-tap import links
    Apps(AppsArgs),

    /// Print the subscription link to import into a client
    Link(LinkArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Panel commands ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigsArgs {
    /// Only show links of this protocol (vless, vmess, trojan, ss, ...)
    #[arg(long)]
    pub protocol: Option<String>,
}

#[derive(Debug, Args)]
pub struct AppsArgs {
    /// Only show apps for this operating system (Android, iOS, Windows, ...)
    #[arg(long)]
    pub os: Option<String>,
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Print the Shadowrocket import link (sub://...) instead
    #[arg(long)]
    pub shadowrocket: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display current configuration
    Show,

    /// Create or update a profile in the config file
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Subscription URL for the profile (defaults to --url)
        #[arg(long = "sub-url")]
        sub_url: Option<String>,

        /// Make this the default profile
        #[arg(long)]
        set_default: bool,

        /// Overwrite an existing profile with the same name
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
