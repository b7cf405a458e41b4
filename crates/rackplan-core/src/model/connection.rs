// ── Cable connections ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::equipment::{CableType, CardType, RackId, SlotName};
use super::radio_unit::{RadioUnitType, sector_label};

/// Rack side of a cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceEndpoint {
    pub rack: RackId,
    pub slot: SlotName,
    /// Type of the card actually hosting the port (may be ABIQ for an FDD link).
    pub card_type: CardType,
    /// 1..=9.
    pub port: u8,
}

impl SourceEndpoint {
    /// The physical port key: no two connections may share it.
    pub fn key(&self) -> (RackId, SlotName, u8) {
        (self.rack, self.slot, self.port)
    }
}

/// Radio-unit side of a cable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioEndpoint {
    pub radio_unit: EntityId,
    pub hardware: RadioUnitType,
    pub sectors: Vec<u32>,
    /// 1 = OPT1, 2 = OPT2.
    pub optical_port: u8,
}

impl RadioEndpoint {
    pub fn optical_label(&self) -> String {
        format!("OPT{}", self.optical_port)
    }

    pub fn sector_label(&self) -> String {
        sector_label(&self.sectors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: EntityId,
    pub source: SourceEndpoint,
    pub destination: RadioEndpoint,
    pub cable: CableType,
    /// Display color inherited from the radio unit's catalog entry.
    pub color: String,
    /// Created by a manual edit rather than by the solver.
    #[serde(default)]
    pub manual: bool,
}
