//! Wiring table: one cabling instruction per fibre.

use tabled::Tabled;

use rackplan_core::{WiringRow, wiring_table};

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct WiringTableRow {
    #[tabled(rename = "Bay")]
    bay: u32,
    #[tabled(rename = "Sectors")]
    sectors: String,
    #[tabled(rename = "Bands")]
    bands: String,
    #[tabled(rename = "Card")]
    card: String,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Port")]
    port: u8,
    #[tabled(rename = "Cable")]
    cable: String,
    #[tabled(rename = "Remote")]
    remote: String,
    #[tabled(rename = "")]
    note: String,
}

fn to_row(row: &WiringRow, color: bool) -> WiringTableRow {
    WiringTableRow {
        bay: row.bay,
        sectors: row.sectors.clone(),
        bands: row.bands.clone(),
        card: row.card.clone(),
        slot: row.slot.clone(),
        port: row.port,
        cable: row.cable.clone(),
        remote: format!("{} {}", row.remote_unit, row.remote_port),
        note: output::manual_marker(row.manual, color),
    }
}

/// `bay/slot/port -> UNIT OPTn`
fn plain_line(row: &WiringRow) -> String {
    format!(
        "{}/{}/{} -> {} {}",
        row.bay, row.slot, row.port, row.remote_unit, row.remote_port
    )
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let topology = session.solve(global)?;
    let rows = wiring_table(&topology);
    let out = output::render_list(
        &session.output,
        &rows,
        |r| to_row(r, session.color),
        plain_line,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
