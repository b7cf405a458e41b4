//! Radio unit listing.

use tabled::Tabled;

use rackplan_core::RadioUnitInstance;

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RadioRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    hardware: String,
    #[tabled(rename = "Sectors")]
    sectors: String,
    #[tabled(rename = "Bands")]
    bands: String,
    #[tabled(rename = "MIMO")]
    mimo: String,
    #[tabled(rename = "RF Ports")]
    rf_ports: String,
}

fn to_row(unit: &RadioUnitInstance) -> RadioRow {
    RadioRow {
        id: unit.id.to_string(),
        hardware: unit.hardware.to_string(),
        sectors: unit.sector_label(),
        bands: unit.band_label(),
        mimo: if unit.mimo { "yes" } else { "no" }.into(),
        rf_ports: port_mapping_label(unit),
    }
}

/// `1:S1 2:S1 3:S2 ...`
fn port_mapping_label(unit: &RadioUnitInstance) -> String {
    unit.port_mapping
        .iter()
        .map(|(port, sector)| format!("{port}:{sector}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let topology = session.solve(global)?;
    let out = output::render_list(&session.output, &topology.radio_units, to_row, |u| {
        u.id.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
