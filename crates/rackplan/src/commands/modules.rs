//! Selectable hardware modules per family and band.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use rackplan_core::{Band, CapabilityRegistry, RadioFamily};

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ModuleEntry {
    family: RadioFamily,
    band: Band,
    hardware: String,
    default: bool,
    description: String,
    rf_ports: Option<usize>,
    compact: bool,
}

#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Module")]
    hardware: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "RF")]
    rf_ports: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn to_row(entry: &ModuleEntry) -> ModuleRow {
    ModuleRow {
        family: entry.family.to_string(),
        band: entry.band.to_string(),
        hardware: entry.hardware.clone(),
        default: if entry.default { "*" } else { "" }.into(),
        rf_ports: entry.rf_ports.map(|n| n.to_string()).unwrap_or_default(),
        description: entry.description.clone(),
    }
}

fn parse_filter<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unknown value '{raw}'"),
    })
}

fn module_entries(
    registry: &CapabilityRegistry,
    families: &[RadioFamily],
    bands: &[Band],
) -> Vec<ModuleEntry> {
    let mut entries = Vec::new();
    for &family in families {
        for &band in bands {
            let default = registry.default_module(family, band);
            for hardware in registry.selectable(family, band) {
                let spec = registry.hardware(hardware);
                entries.push(ModuleEntry {
                    family,
                    band,
                    hardware: hardware.to_string(),
                    default: default == Some(hardware),
                    description: spec.map(|s| s.description.clone()).unwrap_or_default(),
                    rf_ports: spec.map(|s| s.rf_ports),
                    compact: spec.is_some_and(rackplan_core::HardwareSpec::is_compact),
                });
            }
        }
    }
    entries
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let families = match &global.family {
        Some(raw) => vec![parse_filter::<RadioFamily>("family", raw)?],
        None => RadioFamily::iter().collect(),
    };
    let bands = if global.bands.is_empty() {
        Band::iter().collect()
    } else {
        global
            .bands
            .iter()
            .map(|raw| parse_filter::<Band>("band", raw))
            .collect::<Result<Vec<_>, _>>()?
    };

    let entries = module_entries(&session.registry, &families, &bands);
    let out = output::render_list(&session.output, &entries, to_row, |e| {
        format!("{}\t{}\t{}", e.family, e.band, e.hardware)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
