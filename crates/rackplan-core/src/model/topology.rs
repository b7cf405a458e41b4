// ── Solved topology ──
//
// The solver's output and the only thing renderers and report builders
// read. Manual edits patch it in place (see `crate::edit`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::connection::Connection;
use super::entity_id::EntityId;
use super::equipment::{Rack, RackId, SlotName};
use super::radio_unit::RadioUnitInstance;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Topology {
    pub racks: Vec<Rack>,
    pub radio_units: Vec<RadioUnitInstance>,
    pub connections: Vec<Connection>,
    /// GPS/sync antenna feed on rack 1; set whenever the TDD band is active.
    pub has_aux_sync_feed: bool,
}

impl Topology {
    pub fn rack(&self, id: RackId) -> Option<&Rack> {
        self.racks.iter().find(|r| r.id == id)
    }

    pub fn rack_mut(&mut self, id: RackId) -> Option<&mut Rack> {
        self.racks.iter_mut().find(|r| r.id == id)
    }

    pub fn radio_unit(&self, id: &EntityId) -> Option<&RadioUnitInstance> {
        self.radio_units.iter().find(|r| &r.id == id)
    }

    pub fn connection(&self, id: &EntityId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    /// Card ports already cabled on one slot.
    pub fn used_ports(&self, rack: RackId, slot: SlotName) -> BTreeSet<u8> {
        self.connections
            .iter()
            .filter(|c| c.source.rack == rack && c.source.slot == slot)
            .map(|c| c.source.port)
            .collect()
    }

    pub fn connections_for(&self, radio_unit: &EntityId) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| &c.destination.radio_unit == radio_unit)
    }

    /// Highest rack id in use.
    pub fn max_rack_id(&self) -> RackId {
        self.racks.iter().map(|r| r.id).max().unwrap_or_default()
    }
}
