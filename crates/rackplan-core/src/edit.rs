// ── Manual-edit patches ──
//
// Synchronous mutations applied to an already solved topology. None of
// these re-run placement; every connection not named by the edit is left
// untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{
    CableType, CardType, Connection, EntityId, IdGenerator, RackId, RadioEndpoint, SlotName,
    SourceEndpoint, Topology,
};
use crate::registry::CapabilityRegistry;

/// Optical ports a radio unit can expose.
const MAX_OPTICAL_PORTS: u8 = 2;

/// A card port addressed by rack, slot and port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRef {
    pub rack: RackId,
    pub slot: SlotName,
    pub port: u8,
}

/// Remove one connection, returning it.
pub fn delete_connection(topology: &mut Topology, id: &EntityId) -> Result<Connection, CoreError> {
    let idx = topology
        .connections
        .iter()
        .position(|c| &c.id == id)
        .ok_or_else(|| CoreError::ConnectionNotFound { id: id.clone() })?;
    debug!(connection = %id, "connection deleted");
    Ok(topology.connections.remove(idx))
}

/// Resolve `target` to the type of the card hosting it, checking the port
/// exists and is free. `ignore` is a connection allowed to hold the port.
fn free_port(
    topology: &Topology,
    target: PortRef,
    ignore: Option<&EntityId>,
) -> Result<CardType, CoreError> {
    let rack = topology
        .rack(target.rack)
        .ok_or(CoreError::RackNotFound { rack: target.rack })?;
    let slot = rack.slot(target.slot).ok_or(CoreError::SlotNotFound {
        rack: target.rack,
        slot: target.slot,
    })?;
    let card = slot.card.as_ref().ok_or(CoreError::SlotEmpty {
        rack: target.rack,
        slot: target.slot,
    })?;
    if !card.has_port(target.port) {
        return Err(CoreError::PortOutOfRange {
            rack: target.rack,
            slot: target.slot,
            port: target.port,
            max: card.port_count(),
        });
    }
    let holder = topology.connections.iter().find(|c| {
        c.source.key() == (target.rack, target.slot, target.port) && Some(&c.id) != ignore
    });
    if let Some(holder) = holder {
        return Err(CoreError::PortInUse {
            rack: target.rack,
            slot: target.slot,
            port: target.port,
            connection: holder.id.clone(),
        });
    }
    Ok(card.card_type)
}

/// Re-home the rack end of a connection. The radio end, cable and color are
/// kept; the source card type follows the card now hosting the port.
pub fn move_connection_source(
    topology: &mut Topology,
    id: &EntityId,
    target: PortRef,
) -> Result<(), CoreError> {
    if topology.connection(id).is_none() {
        return Err(CoreError::ConnectionNotFound { id: id.clone() });
    }
    let card_type = free_port(topology, target, Some(id))?;
    if let Some(conn) = topology.connections.iter_mut().find(|c| &c.id == id) {
        conn.source = SourceEndpoint {
            rack: target.rack,
            slot: target.slot,
            card_type,
            port: target.port,
        };
        debug!(
            connection = %id,
            rack = %target.rack,
            slot = %target.slot,
            port = target.port,
            "connection moved"
        );
    }
    Ok(())
}

/// Cable a radio unit's optical port to a card port by hand.
pub fn connect_manual(
    topology: &mut Topology,
    source: PortRef,
    radio_unit: &EntityId,
    optical_port: u8,
    cable: CableType,
    registry: &CapabilityRegistry,
    ids: &mut dyn IdGenerator,
) -> Result<EntityId, CoreError> {
    let unit = topology
        .radio_unit(radio_unit)
        .ok_or_else(|| CoreError::RadioUnitNotFound {
            id: radio_unit.clone(),
        })?;
    if !(1..=MAX_OPTICAL_PORTS).contains(&optical_port) {
        return Err(CoreError::OpticalPortOutOfRange {
            hardware: unit.hardware.clone(),
            port: optical_port,
            max: MAX_OPTICAL_PORTS,
        });
    }
    let destination = RadioEndpoint {
        radio_unit: unit.id.clone(),
        hardware: unit.hardware.clone(),
        sectors: unit.sectors.clone(),
        optical_port,
    };
    let color = registry
        .hardware(&unit.hardware)
        .map_or_else(|| cable.color().to_owned(), |s| s.color.clone());
    let card_type = free_port(topology, source, None)?;

    let id = ids.next_id("manual-conn");
    topology.connections.push(Connection {
        id: id.clone(),
        source: SourceEndpoint {
            rack: source.rack,
            slot: source.slot,
            card_type,
            port: source.port,
        },
        destination,
        cable,
        color,
        manual: true,
    });
    debug!(connection = %id, radio_unit = %radio_unit, "manual connection added");
    Ok(id)
}

// ── Rack ordering ───────────────────────────────────────────────────

/// Display order of racks, by id. Rack ids never change; bays follow this
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RackOrder(Vec<RackId>);

impl RackOrder {
    /// Keep the ids of `order` that still exist, in their order, then
    /// append every other rack by ascending id.
    pub fn normalize(order: &[RackId], topology: &Topology) -> Self {
        let mut ids: Vec<RackId> = Vec::with_capacity(topology.racks.len());
        for id in order {
            if topology.rack(*id).is_some() && !ids.contains(id) {
                ids.push(*id);
            }
        }
        let mut missing: Vec<RackId> = topology
            .racks
            .iter()
            .map(|r| r.id)
            .filter(|id| !ids.contains(id))
            .collect();
        missing.sort_unstable();
        ids.extend(missing);
        Self(ids)
    }

    pub fn ids(&self) -> &[RackId] {
        &self.0
    }

    /// Drag `source` onto the position currently held by `target`.
    /// Unknown ids leave the order unchanged.
    pub fn move_before(&mut self, source: RackId, target: RackId) {
        let (Some(from), Some(to)) = (
            self.0.iter().position(|id| *id == source),
            self.0.iter().position(|id| *id == target),
        ) else {
            return;
        };
        let moved = self.0.remove(from);
        self.0.insert(to, moved);
    }

    /// Sort the topology's racks into this order and renumber bays from 1.
    pub fn apply(&self, topology: &mut Topology) {
        topology.racks.sort_by_key(|rack| {
            self.0
                .iter()
                .position(|id| *id == rack.id)
                .unwrap_or(usize::MAX)
        });
        for (bay, rack) in (1u32..).zip(topology.racks.iter_mut()) {
            rack.bay = bay;
        }
    }
}
