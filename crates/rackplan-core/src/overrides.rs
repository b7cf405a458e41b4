// ── Slot overrides ──
//
// Sparse (rack, slot) table maintained by the editing surface. The solver
// reads it when building rack skeletons and when deciding whether an
// empty slot may take a new card; it never writes to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{CardType, RackId, SlotName};

/// A manual decision pinned on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "card")]
pub enum SlotOverride {
    /// The slot must stay empty.
    ForcedEmpty,
    /// The slot must hold this card type.
    Forced(CardType),
}

/// Result of an override lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideState {
    Unset,
    ForcedEmpty,
    Forced(CardType),
}

impl OverrideState {
    /// Whether a new card of `card_type` may be placed in a slot in this
    /// state.
    pub fn permits(self, card_type: CardType) -> bool {
        match self {
            Self::Unset => true,
            Self::ForcedEmpty => false,
            Self::Forced(forced) => forced == card_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotOverrides {
    entries: BTreeMap<(RackId, SlotName), SlotOverride>,
}

impl SlotOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rack: RackId, slot: SlotName) -> OverrideState {
        match self.entries.get(&(rack, slot)) {
            None => OverrideState::Unset,
            Some(SlotOverride::ForcedEmpty) => OverrideState::ForcedEmpty,
            Some(SlotOverride::Forced(card)) => OverrideState::Forced(*card),
        }
    }

    pub fn set(&mut self, rack: RackId, slot: SlotName, value: SlotOverride) {
        self.entries.insert((rack, slot), value);
    }

    pub fn force_empty(&mut self, rack: RackId, slot: SlotName) {
        self.set(rack, slot, SlotOverride::ForcedEmpty);
    }

    pub fn force_card(&mut self, rack: RackId, slot: SlotName, card: CardType) {
        self.set(rack, slot, SlotOverride::Forced(card));
    }

    pub fn clear(&mut self, rack: RackId, slot: SlotName) -> Option<SlotOverride> {
        self.entries.remove(&(rack, slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = (RackId, SlotName, SlotOverride)> + '_ {
        self.entries.iter().map(|((r, s), o)| (*r, *s, *o))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RackId, SlotName, SlotOverride)> for SlotOverrides {
    fn from_iter<I: IntoIterator<Item = (RackId, SlotName, SlotOverride)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(r, s, o)| ((r, s), o)).collect(),
        }
    }
}
