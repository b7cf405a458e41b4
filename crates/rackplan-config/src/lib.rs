//! Shared configuration for the rackplan CLI.
//!
//! User-level TOML config (output defaults, id mode, catalog extensions),
//! TOML site files, and their translation into `rackplan_core` inputs.

mod site;

pub use site::{
    ConnectEdit, EditsSection, IntentSection, MoveEdit, OverrideEntry, SiteFile, load_site,
};

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rackplan_core::{
    Band, CapabilityRegistry, CoreError, FormFactor, HardwareSpec, MAX_RF_PORTS, RadioFamily,
    RadioUnitType,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("site file not found: {}", path.display())]
    SiteNotFound { path: PathBuf },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level user configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Extra radio-unit hardware layered over the built-in catalog.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

/// How entity ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdMode {
    /// `conn-1`, `conn-2`, ... Reproducible across runs.
    #[default]
    Sequential,
    /// UUID suffixes.
    Random,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub ids: IdMode,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            ids: IdMode::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A hardware type added from configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogEntry {
    /// Type identifier, e.g. "AHXX".
    pub hardware: String,

    pub description: String,

    /// Band label for diagrams, e.g. "18/21".
    #[serde(default)]
    pub sub_label: String,

    #[serde(default = "default_unit_color")]
    pub color: String,

    /// RF (antenna) ports.
    pub rf_ports: usize,

    #[serde(default = "default_optical_ports")]
    pub optical_ports: u8,

    /// Compact units are cabled on fixed card ports.
    #[serde(default)]
    pub compact: bool,

    /// Families and bands this unit is offered for.
    #[serde(default)]
    pub modules: Vec<ModuleGrant>,
}

fn default_unit_color() -> String {
    "#CCCCCC".into()
}
fn default_optical_ports() -> u8 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModuleGrant {
    pub family: String,
    pub band: String,

    /// Make this the family default for the band.
    #[serde(default)]
    pub default: bool,
}

impl Config {
    /// The built-in catalog extended with `[[catalog]]` entries.
    pub fn registry(&self) -> Result<CapabilityRegistry, ConfigError> {
        let mut registry = CapabilityRegistry::builtin();
        for entry in &self.catalog {
            let field = format!("catalog.{}", entry.hardware);
            if !(1..=MAX_RF_PORTS).contains(&entry.rf_ports) {
                return Err(ConfigError::validation(
                    field,
                    format!("rf_ports must be between 1 and {MAX_RF_PORTS}"),
                ));
            }
            if !(1..=2).contains(&entry.optical_ports) {
                return Err(ConfigError::validation(field, "optical_ports must be 1 or 2"));
            }
            let hardware = RadioUnitType::new(&entry.hardware);
            registry.extend(HardwareSpec {
                hardware: hardware.clone(),
                sub_label: entry.sub_label.clone(),
                description: entry.description.clone(),
                color: entry.color.clone(),
                rf_ports: entry.rf_ports,
                optical_ports: entry.optical_ports,
                form_factor: if entry.compact {
                    FormFactor::Compact
                } else {
                    FormFactor::Macro
                },
            });
            for grant in &entry.modules {
                let family: RadioFamily = parse_field(&field, "family", &grant.family)?;
                let band: Band = parse_field(&field, "band", &grant.band)?;
                if grant.default {
                    registry.set_default(family, band, hardware.clone());
                } else {
                    registry.allow(family, band, hardware.clone());
                }
            }
            tracing::debug!(hardware = %hardware, "catalog entry added");
        }
        Ok(registry)
    }
}

/// Parse a strum-backed name, reporting the offending field on failure.
pub(crate) fn parse_field<T: std::str::FromStr>(
    scope: &str,
    name: &str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| {
        ConfigError::validation(format!("{scope}.{name}"), format!("unknown value '{raw}'"))
    })
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rackplan", "rackplan").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rackplan");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + `RACKPLAN_` environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("RACKPLAN_")
                .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("site_"))
                .split("_"),
        );

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.ids, IdMode::Sequential);
        assert!(cfg.catalog.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.defaults.output = "json".into();
        cfg.defaults.ids = IdMode::Random;
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.defaults.output, "json");
        assert_eq!(loaded.defaults.ids, IdMode::Random);
    }

    #[test]
    fn catalog_entries_extend_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[[catalog]]
hardware = "ahxx"
description = "Lab 1800"
rf_ports = 8
compact = true

[[catalog.modules]]
family = "macro_single"
band = "L1800"
default = true
"#,
        )
        .unwrap();

        let registry = load_config_from(&path).unwrap().registry().unwrap();
        let spec = registry.hardware(&"AHXX".into()).unwrap();
        assert_eq!(spec.rf_ports, 8);
        assert!(spec.is_compact());
        assert_eq!(
            registry
                .default_module(RadioFamily::MacroSingle, Band::L1800)
                .unwrap()
                .as_str(),
            "AHXX"
        );
    }

    #[test]
    fn catalog_rejects_unknown_band() {
        let cfg = Config {
            defaults: Defaults::default(),
            catalog: vec![CatalogEntry {
                hardware: "AHXX".into(),
                description: "Lab".into(),
                sub_label: String::new(),
                color: default_unit_color(),
                rf_ports: 4,
                optical_ports: 2,
                compact: false,
                modules: vec![ModuleGrant {
                    family: "micro".into(),
                    band: "L1900".into(),
                    default: false,
                }],
            }],
        };
        let err = cfg.registry().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "catalog.AHXX.band"));
    }

    fn lab_unit(rf_ports: usize) -> Config {
        Config {
            defaults: Defaults::default(),
            catalog: vec![CatalogEntry {
                hardware: "AHXX".into(),
                description: "Lab".into(),
                sub_label: String::new(),
                color: default_unit_color(),
                rf_ports,
                optical_ports: 2,
                compact: false,
                modules: Vec::new(),
            }],
        }
    }

    #[test]
    fn catalog_rejects_zero_rf_ports() {
        assert!(matches!(
            lab_unit(0).registry(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn catalog_rejects_rf_ports_beyond_port_numbering() {
        assert!(lab_unit(MAX_RF_PORTS).registry().is_ok());
        let err = lab_unit(MAX_RF_PORTS + 1).registry().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation { ref field, ref reason }
                if field == "catalog.AHXX" && reason.contains("255")
        ));
    }
}
