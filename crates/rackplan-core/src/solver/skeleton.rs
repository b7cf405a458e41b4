// ── Rack skeleton ──

use crate::model::{Card, CardType, EntityId, IdGenerator, Rack, RackId, Slot, SlotName, SlotSide};
use crate::overrides::{OverrideState, SlotOverrides};

/// A rack with its internal slots resolved against `overrides` and the
/// four external units installed.
///
/// Internal slots: forced empty, then forced type, then the system module
/// in the control slot. External units are never overridable.
pub fn build_rack(id: RackId, overrides: &SlotOverrides, ids: &mut dyn IdGenerator) -> Rack {
    let mut slots = Vec::with_capacity(SlotName::INTERNAL.len() + CardType::EXTERNAL.len());

    for name in SlotName::INTERNAL {
        let card = match overrides.get(id, name) {
            OverrideState::ForcedEmpty => None,
            OverrideState::Forced(card_type) => Some(Card::new(ids.next_id("card"), card_type)),
            OverrideState::Unset if name.is_control() => Some(Card::new(
                EntityId::new(format!("asib-rack{id}")),
                CardType::Asib,
            )),
            OverrideState::Unset => None,
        };
        slots.push(Slot {
            name,
            side: SlotSide::Full,
            is_control: name.is_control(),
            card,
        });
    }

    for unit in CardType::EXTERNAL {
        let Some(name) = SlotName::for_external(unit) else {
            continue;
        };
        let card_id = EntityId::new(format!("{}-rack{id}", unit.to_string().to_lowercase()));
        slots.push(Slot {
            name,
            side: SlotSide::Full,
            is_control: false,
            card: Some(Card::new(card_id, unit)),
        });
    }

    Rack {
        id,
        bay: id.0,
        slots,
    }
}
