// ── Report fold ──
//
// Bill of materials and wiring table, both pure folds over a solved
// (and possibly edited) topology.

use serde::Serialize;
use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::model::{CardType, Rack, RadioUnitInstance, RadioUnitType, Topology};
use crate::registry::CapabilityRegistry;

/// Baseband chassis part, one per rack.
pub const CHASSIS_PART: &str = "AMIA";
/// GPS antenna kit, one per site with a TDD band.
pub const GPS_KIT_PART: &str = "FYGA";
/// Fibre jumper with its SFP pair, one per connection.
pub const FIBRE_PART: &str = "FO/SFP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomItem {
    pub part: String,
    pub description: String,
    pub qty: usize,
}

impl BomItem {
    fn new(part: impl Into<String>, description: impl Into<String>, qty: usize) -> Self {
        Self {
            part: part.into(),
            description: description.into(),
            qty,
        }
    }
}

/// Parts list: chassis, cards by type, GPS kit, radio units by type,
/// then fibres. Lines with zero quantity are omitted.
pub fn bill_of_materials(topology: &Topology, registry: &CapabilityRegistry) -> Vec<BomItem> {
    let mut items = vec![BomItem::new(
        CHASSIS_PART,
        "Baseband chassis",
        topology.racks.len(),
    )];

    let mut cards: BTreeMap<CardType, usize> = BTreeMap::new();
    for card in topology.racks.iter().flat_map(Rack::cards) {
        *cards.entry(card.card_type).or_default() += 1;
    }
    for card_type in CardType::iter() {
        if let Some(qty) = cards.get(&card_type) {
            items.push(BomItem::new(card_type.to_string(), card_type.description(), *qty));
        }
    }

    if topology.has_aux_sync_feed {
        items.push(BomItem::new(GPS_KIT_PART, "GPS antenna kit", 1));
    }

    let mut units: BTreeMap<&RadioUnitType, usize> = BTreeMap::new();
    for unit in &topology.radio_units {
        *units.entry(&unit.hardware).or_default() += 1;
    }
    for (hardware, qty) in units {
        let description = registry
            .hardware(hardware)
            .map_or_else(|| "Radio unit".to_owned(), |s| s.description.clone());
        items.push(BomItem::new(hardware.as_str(), description, qty));
    }

    if !topology.connections.is_empty() {
        items.push(BomItem::new(
            FIBRE_PART,
            "Fibre jumper with SFP",
            topology.connections.len(),
        ));
    }

    items
}

/// One cabling instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiringRow {
    pub bay: u32,
    pub rack: u32,
    pub sectors: String,
    pub bands: String,
    pub card: String,
    pub slot: String,
    pub port: u8,
    pub cable: String,
    pub remote_unit: String,
    pub remote_port: String,
    pub manual: bool,
}

/// One row per connection, ordered by bay, slot and port.
pub fn wiring_table(topology: &Topology) -> Vec<WiringRow> {
    let mut rows: Vec<(u32, _, WiringRow)> = topology
        .connections
        .iter()
        .map(|conn| {
            let bay = topology
                .rack(conn.source.rack)
                .map_or(conn.source.rack.0, |r| r.bay);
            let bands = topology
                .radio_unit(&conn.destination.radio_unit)
                .map(RadioUnitInstance::band_label)
                .unwrap_or_default();
            let row = WiringRow {
                bay,
                rack: conn.source.rack.0,
                sectors: conn.destination.sector_label(),
                bands,
                card: conn.source.card_type.to_string(),
                slot: conn.source.slot.to_string(),
                port: conn.source.port,
                cable: conn.cable.to_string(),
                remote_unit: conn.destination.hardware.to_string(),
                remote_port: conn.destination.optical_label(),
                manual: conn.manual,
            };
            (bay, (conn.source.slot, conn.source.port), row)
        })
        .collect();
    rows.sort_by_key(|(bay, key, _)| (*bay, *key));
    rows.into_iter().map(|(_, _, row)| row).collect()
}
