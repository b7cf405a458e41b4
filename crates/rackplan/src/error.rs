//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rackplan_config::ConfigError;
use rackplan_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Site input ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(rackplan::validation),
        help("Run: rackplan --help to see accepted values for the intent flags")
    )]
    Validation { field: String, reason: String },

    #[error("Module {hardware} cannot serve {band} in the {family} family")]
    #[diagnostic(
        code(rackplan::incompatible_module),
        help("Run: rackplan modules --family {family} --band {band}")
    )]
    IncompatibleModule {
        band: String,
        hardware: String,
        family: String,
    },

    #[error("Site file not found: {path}")]
    #[diagnostic(
        code(rackplan::site_not_found),
        help("Pass an existing file with --site, or omit it to plan from flags alone.")
    )]
    SiteNotFound { path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(rackplan::not_found),
        help("Run: rackplan {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(rackplan::conflict), help("{hint}"))]
    Conflict {
        resource_type: String,
        identifier: String,
        hint: String,
    },

    // ── Solver ───────────────────────────────────────────────────────
    #[error("Solver failed: {message}")]
    #[diagnostic(
        code(rackplan::solver),
        help("This is a bug; rerun with -vv and report the output.")
    )]
    Solver { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(rackplan::config))]
    Config(Box<figment::Error>),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(rackplan::config))]
    Toml(#[from] toml::ser::Error),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::SiteNotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::IncompatibleModule { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidIntent { reason } => CliError::Validation {
                field: "intent".into(),
                reason,
            },

            CoreError::UnknownHardwareType { hardware } => CliError::NotFound {
                resource_type: "radio unit type".into(),
                identifier: hardware.to_string(),
                list_command: "modules".into(),
            },

            CoreError::IncompatibleModule {
                band,
                hardware,
                family,
            } => CliError::IncompatibleModule {
                band: band.to_string(),
                hardware: hardware.to_string(),
                family: family.to_string(),
            },

            CoreError::PortExhaustionUnexpected { .. } => CliError::Solver {
                message: err.to_string(),
            },

            CoreError::RackNotFound { rack } => CliError::NotFound {
                resource_type: "rack".into(),
                identifier: rack.to_string(),
                list_command: "racks".into(),
            },

            CoreError::SlotNotFound { rack, slot } => CliError::NotFound {
                resource_type: "slot".into(),
                identifier: format!("{slot} (rack {rack})"),
                list_command: "racks".into(),
            },

            CoreError::ConnectionNotFound { id } => CliError::NotFound {
                resource_type: "connection".into(),
                identifier: id.to_string(),
                list_command: "topology".into(),
            },

            CoreError::RadioUnitNotFound { id } => CliError::NotFound {
                resource_type: "radio unit".into(),
                identifier: id.to_string(),
                list_command: "radios".into(),
            },

            CoreError::PortInUse {
                rack,
                slot,
                port,
                connection,
            } => CliError::Conflict {
                resource_type: "cable on port".into(),
                identifier: format!("rack {rack} {slot} port {port}"),
                hint: format!("Delete or move {connection} first."),
            },

            CoreError::SlotEmpty { .. } => CliError::Validation {
                field: "slot".into(),
                reason: err.to_string(),
            },

            CoreError::PortOutOfRange { .. } => CliError::Validation {
                field: "port".into(),
                reason: err.to_string(),
            },

            CoreError::OpticalPortOutOfRange { .. } => CliError::Validation {
                field: "optical_port".into(),
                reason: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::SiteNotFound { path } => CliError::SiteNotFound {
                path: path.display().to_string(),
            },
            ConfigError::Core(core) => core.into(),
            ConfigError::Serialization(e) => CliError::Toml(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
