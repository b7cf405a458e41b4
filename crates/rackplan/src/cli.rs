//! Clap derive structures for the `rackplan` CLI.
//!
//! Defines the command tree, global flags, and shared types. Only clap and
//! clap_complete are used here so `build.rs` can compile this file on its
//! own for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rackplan -- baseband rack and fibre planner for radio sites
#[derive(Debug, Parser)]
#[command(
    name = "rackplan",
    version,
    about = "Plan baseband racks, capacity cards and fibre runs for a radio site",
    long_about = "Turns a site intent (bands, sectors, MIMO mode, radio family and one\n\
        hardware module per band) into racks, capacity cards, radio units and the\n\
        fibres between them.\n\n\
        The intent comes from a TOML site file (--site) and/or the intent flags;\n\
        flags win over the file.",
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
    /// Site file (TOML) with intent, modules, overrides and edits
    #[arg(long, short = 'f', env = "RACKPLAN_SITE", global = true)]
    pub site: Option<PathBuf>,

    /// Radio family: micro, macro_single, macro_dual
    #[arg(long, global = true, help_heading = "Site intent")]
    pub family: Option<String>,

    /// Number of sectors
    #[arg(long, global = true, help_heading = "Site intent")]
    pub sectors: Option<u32>,

    /// Active band; repeat or comma-separate (L700, L900, L1800, L2100, L2600, NR3500)
    #[arg(
        long = "band",
        short = 'b',
        value_delimiter = ',',
        global = true,
        help_heading = "Site intent"
    )]
    pub bands: Vec<String>,

    /// MIMO mode: SISO, 2x2, 4x4
    #[arg(long, global = true, help_heading = "Site intent")]
    pub mimo: Option<String>,

    /// Fibres per TDD radio unit (1 or 2)
    #[arg(long, global = true, help_heading = "Site intent")]
    pub tdd_links: Option<u8>,

    /// Hardware module for a band, as BAND=TYPE (repeatable)
    #[arg(long = "module", short = 'm', global = true, help_heading = "Site intent")]
    pub modules: Vec<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "RACKPLAN_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Use random (UUID) entity ids instead of sequential ones
    #[arg(long, global = true)]
    pub random_ids: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve the site and show the full topology
    #[command(alias = "topo", alias = "t")]
    Topology,

    /// Racks and their card slots
    Racks,

    /// Radio units produced by the aggregator
    #[command(alias = "rru")]
    Radios,

    /// Cabling instructions, one row per fibre
    #[command(alias = "w")]
    Wiring,

    /// Bill of materials
    Bom,

    /// Hardware modules selectable per family and band
    ///
    /// --family and --band narrow the listing.
    Modules,

    /// Manage the CLI configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
