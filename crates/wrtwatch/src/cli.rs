//! Clap derive structures for the `wrtwatch` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wrtwatch -- status, traffic, and device monitor for DD-WRT routers
#[derive(Debug, Parser)]
#[command(
    name = "wrtwatch",
    version,
    about = "Monitor DD-WRT routers from the command line",
    long_about = "Polls the live status pages of a DD-WRT router and reports\n\
        system status, derived metrics (load, memory, WAN throughput),\n\
        and the devices it currently sees.",
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
    /// Router profile to use
    #[arg(long, short = 'p', env = "WRTWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router address (overrides profile), e.g. 192.168.1.1 or https://r.lan:8443
    #[arg(long, short = 'r', env = "WRTWATCH_ROUTER", global = true)]
    pub router: Option<String>,

    /// Web UI username
    #[arg(long, short = 'u', env = "WRTWATCH_USERNAME", global = true)]
    pub username: Option<String>,

    /// Web UI password
    #[arg(long, env = "WRTWATCH_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WRTWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "WRTWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WRTWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Router status overview (addresses, uptime, temperature, flags)
    #[command(alias = "st")]
    Status,

    /// Every decoded field from the last poll
    #[command(alias = "f")]
    Fields(FieldsArgs),

    /// Derived metrics: load, memory, WAN throughput
    #[command(alias = "m")]
    Metrics(MetricsArgs),

    /// Devices seen in the wireless and DHCP tables
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Poll repeatedly and print metrics each cycle
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Find the DD-WRT web interface on a host
    Probe(ProbeArgs),

    /// List interface names usable in the device allow-list
    Interfaces,

    /// Verify that the configured credentials are accepted
    Verify,

    /// Reboot the router
    Reboot,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Show raw values instead of cleaned-up display values
    #[arg(long)]
    pub raw: bool,

    /// Only fields whose name contains this substring
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Seconds between the two samples used for throughput
    #[arg(long, short = 's', default_value = "2")]
    pub sample: u64,
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Interface allow-list (overrides profile; repeatable)
    #[arg(long = "interface", short = 'i')]
    pub interfaces: Vec<String>,

    /// Only devices currently associated or in the ARP table
    #[arg(long)]
    pub connected: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in seconds (overrides profile)
    #[arg(long, short = 'n')]
    pub interval: Option<u64>,

    /// Stop after this many cycles
    #[arg(long, short = 'c')]
    pub count: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Hostname or IP address
    pub host: String,

    /// Port to try first with HTTP then HTTPS (default: 80 then 443)
    #[arg(long)]
    pub port: Option<u16>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value
    Set {
        /// Profile key: router, username, password_env, insecure, timeout,
        /// interval, ca_cert, interfaces, pages
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
