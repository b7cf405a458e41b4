//! Full topology view: summary, rack contents and every connection.

use tabled::Tabled;

use rackplan_core::{Connection, Rack, Topology};

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ConnectionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Rack")]
    rack: String,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Port")]
    port: u8,
    #[tabled(rename = "Radio Unit")]
    radio_unit: String,
    #[tabled(rename = "Opt")]
    optical: String,
    #[tabled(rename = "Cable")]
    cable: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "")]
    note: String,
}

fn connection_row(conn: &Connection, color: bool) -> ConnectionRow {
    ConnectionRow {
        id: conn.id.to_string(),
        rack: conn.source.rack.to_string(),
        slot: conn.source.slot.to_string(),
        port: conn.source.port,
        radio_unit: format!(
            "{} {}",
            conn.destination.hardware,
            conn.destination.sector_label()
        ),
        optical: conn.destination.optical_label(),
        cable: conn.cable.to_string(),
        color: conn.color.clone(),
        note: output::manual_marker(conn.manual, color),
    }
}

/// `Bay 1 (rack 1): C1 ASIB | B1 ABIO (FDD) | B2 - | ...`
fn rack_line(rack: &Rack) -> String {
    let slots = rack
        .slots
        .iter()
        .map(|slot| {
            let card = slot
                .card
                .as_ref()
                .map_or_else(|| "-".to_owned(), |c| c.card_type.to_string());
            format!("{} {card}", slot.name)
        })
        .collect::<Vec<_>>()
        .join(" | ");
    format!("Bay {} (rack {}): {slots}", rack.bay, rack.id)
}

fn detail(topology: &Topology, color: bool) -> String {
    let mut lines = vec![
        output::heading("Summary", color),
        format!("Racks:        {}", topology.racks.len()),
        format!("Radio units:  {}", topology.radio_units.len()),
        format!("Connections:  {}", topology.connections.len()),
        format!(
            "GPS feed:     {}",
            if topology.has_aux_sync_feed { "yes" } else { "no" }
        ),
        String::new(),
        output::heading("Racks", color),
    ];
    lines.extend(topology.racks.iter().map(rack_line));

    if !topology.connections.is_empty() {
        let rows: Vec<ConnectionRow> = topology
            .connections
            .iter()
            .map(|c| connection_row(c, color))
            .collect();
        lines.push(String::new());
        lines.push(output::heading("Connections", color));
        lines.push(output::render_table(&rows));
    }
    lines.join("\n")
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let topology = session.solve(global)?;
    tracing::debug!(
        racks = topology.racks.len(),
        connections = topology.connections.len(),
        "rendering topology"
    );
    let out = output::render_single(
        &session.output,
        &topology,
        |t| detail(t, session.color),
        |t| {
            t.connections
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
