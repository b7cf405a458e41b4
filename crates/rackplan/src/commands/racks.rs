//! Rack and slot listing.

use serde::Serialize;
use tabled::Tabled;

use rackplan_core::{Card, Topology};

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

/// One slot of one rack, flattened for listing.
#[derive(Serialize)]
struct SlotEntry {
    bay: u32,
    rack: u32,
    slot: String,
    card: Option<String>,
    card_id: Option<String>,
    ports: u8,
    ports_used: usize,
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "Bay")]
    bay: u32,
    #[tabled(rename = "Rack")]
    rack: u32,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Card")]
    card: String,
    #[tabled(rename = "Card ID")]
    card_id: String,
    #[tabled(rename = "Used")]
    used: String,
}

fn slot_entries(topology: &Topology) -> Vec<SlotEntry> {
    topology
        .racks
        .iter()
        .flat_map(|rack| {
            rack.slots.iter().map(move |slot| SlotEntry {
                bay: rack.bay,
                rack: rack.id.0,
                slot: slot.name.to_string(),
                card: slot.card.as_ref().map(|c| c.card_type.to_string()),
                card_id: slot.card.as_ref().map(|c| c.id.to_string()),
                ports: slot.card.as_ref().map_or(0, Card::port_count),
                ports_used: topology.used_ports(rack.id, slot.name).len(),
            })
        })
        .collect()
}

fn to_row(entry: &SlotEntry) -> SlotRow {
    SlotRow {
        bay: entry.bay,
        rack: entry.rack,
        slot: entry.slot.clone(),
        card: entry.card.clone().unwrap_or_else(|| "-".into()),
        card_id: entry.card_id.clone().unwrap_or_default(),
        used: if entry.ports == 0 {
            String::new()
        } else {
            format!("{}/{}", entry.ports_used, entry.ports)
        },
    }
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let topology = session.solve(global)?;
    let entries = slot_entries(&topology);
    let out = output::render_list(&session.output, &entries, to_row, |e| {
        format!(
            "{}/{}\t{}",
            e.bay,
            e.slot,
            e.card.as_deref().unwrap_or("-")
        )
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
