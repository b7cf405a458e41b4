// ── Per-link placement search ──
//
// Greedy placement of one fibre at a time: existing compatible card, then
// a new card in an eligible empty slot, rack by rack in affinity order,
// then a fresh overflow rack.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::links::RequiredLink;
use super::skeleton::build_rack;
use crate::error::CoreError;
use crate::model::{
    Card, CardType, Connection, IdGenerator, Rack, RackId, RadioEndpoint, RadioUnitInstance,
    SlotName, SourceEndpoint,
};
use crate::overrides::SlotOverrides;

/// Whether a card of `card_type` can terminate a link that asks for
/// `link_card_type`. ABIQ terminates both FDD and TDD links.
pub fn card_accepts_link(card_type: CardType, link_card_type: CardType) -> bool {
    card_type == link_card_type || card_type == CardType::Abiq
}

/// The pinned port if one is given and free, otherwise the lowest free port.
///
/// A pinned link never falls back to another port on the same card; the
/// caller moves on to the next slot instead.
pub fn pick_port(used: impl Fn(u8) -> bool, port_count: u8, preferred: Option<u8>) -> Option<u8> {
    match preferred {
        Some(port) => ((1..=port_count).contains(&port) && !used(port)).then_some(port),
        None => (1..=port_count).find(|p| !used(*p)),
    }
}

/// Mutable allocation state for one solve.
pub(crate) struct Allocator<'a> {
    overrides: &'a SlotOverrides,
    ids: &'a mut dyn IdGenerator,
    affinity: bool,
    pub(crate) racks: Vec<Rack>,
    pub(crate) connections: Vec<Connection>,
    used: BTreeSet<(RackId, SlotName, u8)>,
}

impl<'a> Allocator<'a> {
    pub(crate) fn new(
        racks: Vec<Rack>,
        overrides: &'a SlotOverrides,
        ids: &'a mut dyn IdGenerator,
        affinity: bool,
    ) -> Self {
        Self {
            overrides,
            ids,
            affinity,
            racks,
            connections: Vec::new(),
            used: BTreeSet::new(),
        }
    }

    /// Racks to try, preferred ones first, each group by ascending id.
    fn rack_order(&self, unit: &RadioUnitInstance) -> Vec<RackId> {
        let preferred: BTreeSet<RackId> = self
            .connections
            .iter()
            .filter(|c| {
                c.destination.radio_unit == unit.id
                    || (self.affinity && unit.serves_any(&c.destination.sectors))
            })
            .map(|c| c.source.rack)
            .collect();

        let mut others: Vec<RackId> = self
            .racks
            .iter()
            .map(|r| r.id)
            .filter(|id| !preferred.contains(id))
            .collect();
        others.sort_unstable();

        preferred.into_iter().chain(others).collect()
    }

    /// Place one link, overflowing into new racks as needed.
    pub(crate) fn place(
        &mut self,
        unit: &RadioUnitInstance,
        link: RequiredLink,
        color: &str,
    ) -> Result<(), CoreError> {
        for rack in self.rack_order(unit) {
            if self.try_rack(rack, unit, link, color) {
                return Ok(());
            }
        }

        // A fresh rack only fails when overrides pin both capacity slots
        // against the link, so the number of attempts is bounded.
        for _ in 0..self.overrides.len() + 2 {
            let id = self
                .racks
                .iter()
                .map(|r| r.id)
                .max()
                .unwrap_or_default()
                .next();
            info!(rack = %id, radio_unit = %unit.id, "opening overflow rack");
            let rack = build_rack(id, self.overrides, &mut *self.ids);
            self.racks.push(rack);
            if self.try_rack(id, unit, link, color) {
                return Ok(());
            }
        }

        Err(CoreError::PortExhaustionUnexpected {
            radio_unit: unit.id.clone(),
            optical_port: link.optical_port,
        })
    }

    fn try_rack(
        &mut self,
        rack_id: RackId,
        unit: &RadioUnitInstance,
        link: RequiredLink,
        color: &str,
    ) -> bool {
        let Some(rack_idx) = self.racks.iter().position(|r| r.id == rack_id) else {
            return false;
        };

        // Existing compatible card.
        for slot in SlotName::ALLOCATABLE {
            let Some(card) = self.racks[rack_idx].card(slot) else {
                continue;
            };
            if !card_accepts_link(card.card_type, link.card_type) {
                continue;
            }
            let card_type = card.card_type;
            let used = |p: u8| self.used.contains(&(rack_id, slot, p));
            if let Some(port) = pick_port(used, card.port_count(), link.preferred_port) {
                debug!(rack = %rack_id, %slot, port, radio_unit = %unit.id, "existing card");
                self.connect(rack_id, slot, card_type, port, unit, link, color);
                return true;
            }
        }

        // New card in an eligible empty slot.
        for slot in SlotName::ALLOCATABLE {
            let eligible = self.racks[rack_idx]
                .slot(slot)
                .is_some_and(|s| s.card.is_none())
                && self.overrides.get(rack_id, slot).permits(link.card_type);
            if !eligible {
                continue;
            }
            let card = Card::new(self.ids.next_id("card"), link.card_type);
            if let Some(target) = self.racks[rack_idx].slot_mut(slot) {
                target.card = Some(card);
            }
            let port = link.preferred_port.unwrap_or(1);
            debug!(rack = %rack_id, %slot, port, card = %link.card_type, "new card");
            self.connect(rack_id, slot, link.card_type, port, unit, link, color);
            return true;
        }

        false
    }

    #[allow(clippy::too_many_arguments)]
    fn connect(
        &mut self,
        rack: RackId,
        slot: SlotName,
        card_type: CardType,
        port: u8,
        unit: &RadioUnitInstance,
        link: RequiredLink,
        color: &str,
    ) {
        self.used.insert((rack, slot, port));
        self.connections.push(Connection {
            id: self.ids.next_id("conn"),
            source: SourceEndpoint {
                rack,
                slot,
                card_type,
                port,
            },
            destination: RadioEndpoint {
                radio_unit: unit.id.clone(),
                hardware: unit.hardware.clone(),
                sectors: unit.sectors.clone(),
                optical_port: link.optical_port,
            },
            cable: link.cable,
            color: color.to_owned(),
            manual: false,
        });
    }
}
