// ── Rack equipment types ──
//
// Racks, their fixed slot layout, the cards that populate slots, and the
// cable kinds that leave card ports.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::entity_id::EntityId;

/// Ports on every capacity card.
pub const CAPACITY_CARD_PORTS: u8 = 9;

/// Card types that can sit in a rack slot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum CardType {
    /// System module, lives in the control slot.
    #[strum(to_string = "ASIB", serialize = "asib")]
    Asib,
    #[strum(to_string = "ABIO (FDD)", serialize = "abio-fdd")]
    AbioFdd,
    #[strum(to_string = "ABIO (TDD)", serialize = "abio-tdd")]
    AbioTdd,
    /// High-capacity card.
    #[strum(to_string = "ABIQ", serialize = "abiq")]
    Abiq,
    #[strum(to_string = "NODEBOX", serialize = "nodebox")]
    Nodebox,
    #[strum(to_string = "FPBA", serialize = "fpba")]
    Fpba,
    #[strum(to_string = "FPRB", serialize = "fprb")]
    Fprb,
    #[strum(to_string = "FPBC", serialize = "fpbc")]
    Fpbc,
}

impl CardType {
    /// External units, one of each per rack, in slot order.
    pub const EXTERNAL: [Self; 4] = [Self::Nodebox, Self::Fpba, Self::Fprb, Self::Fpbc];

    pub fn is_external(self) -> bool {
        Self::EXTERNAL.contains(&self)
    }

    pub fn is_capacity(self) -> bool {
        matches!(self, Self::AbioFdd | Self::AbioTdd | Self::Abiq)
    }

    pub fn port_count(self) -> u8 {
        if self.is_capacity() {
            CAPACITY_CARD_PORTS
        } else {
            0
        }
    }

    /// Human-readable BOM description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Asib => "System module (common unit)",
            Self::AbioFdd => "FDD capacity card (9 ports)",
            Self::AbioTdd => "TDD capacity card (9 ports)",
            Self::Abiq => "High-capacity card",
            Self::Nodebox => "External unit",
            Self::Fpba => "5G processing pool",
            Self::Fprb => "Power unit",
            Self::Fpbc => "Baseband extension",
        }
    }
}

/// Cable kinds between card ports and radio-unit optical ports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum CableType {
    #[strum(to_string = "CPRI - Legacy", serialize = "cpri-legacy")]
    CpriLegacy,
    #[strum(to_string = "CPRI - 5G FDD", serialize = "cpri5g")]
    Cpri5g,
    #[strum(to_string = "ECPRI", serialize = "ecpri")]
    Ecpri,
    #[strum(to_string = "Fiber", serialize = "fiber")]
    Fiber,
}

impl CableType {
    pub fn color(self) -> &'static str {
        match self {
            Self::CpriLegacy => "#94A3B8",
            Self::Cpri5g => "#60A5FA",
            Self::Ecpri => "#3B82F6",
            Self::Fiber => "#10B981",
        }
    }
}

/// Named slot positions of a rack.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SlotName {
    C1,
    B1,
    B2,
    B3,
    #[serde(rename = "NODEBOX")]
    #[strum(serialize = "NODEBOX")]
    Nodebox,
    #[serde(rename = "FPBA")]
    #[strum(serialize = "FPBA")]
    Fpba,
    #[serde(rename = "FPRB")]
    #[strum(serialize = "FPRB")]
    Fprb,
    #[serde(rename = "FPBC")]
    #[strum(serialize = "FPBC")]
    Fpbc,
}

impl SlotName {
    /// Internal slots in definition order: control first, then capacity.
    pub const INTERNAL: [Self; 4] = [Self::C1, Self::B1, Self::B2, Self::B3];

    /// Capacity slots the allocator searches, in order. B3 is only ever
    /// populated through an override.
    pub const ALLOCATABLE: [Self; 2] = [Self::B1, Self::B2];

    pub fn is_control(self) -> bool {
        matches!(self, Self::C1)
    }

    pub fn is_internal(self) -> bool {
        Self::INTERNAL.contains(&self)
    }

    /// Slot that hosts a given external unit.
    pub fn for_external(card: CardType) -> Option<Self> {
        match card {
            CardType::Nodebox => Some(Self::Nodebox),
            CardType::Fpba => Some(Self::Fpba),
            CardType::Fprb => Some(Self::Fprb),
            CardType::Fpbc => Some(Self::Fpbc),
            _ => None,
        }
    }
}

/// Diagram side of a slot (presentation only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotSide {
    Left,
    Right,
    #[default]
    Full,
}

/// Stable rack identity. Display order lives in [`Rack::bay`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RackId(pub u32);

impl RackId {
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positional card port, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPort {
    pub index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: EntityId,
    pub card_type: CardType,
    pub ports: Vec<CardPort>,
}

impl Card {
    pub fn new(id: EntityId, card_type: CardType) -> Self {
        let ports = (1..=card_type.port_count())
            .map(|index| CardPort { index })
            .collect();
        Self {
            id,
            card_type,
            ports,
        }
    }

    pub fn port_count(&self) -> u8 {
        u8::try_from(self.ports.len()).unwrap_or(u8::MAX)
    }

    pub fn has_port(&self, port: u8) -> bool {
        self.ports.iter().any(|p| p.index == port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: SlotName,
    pub side: SlotSide,
    pub is_control: bool,
    pub card: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    pub id: RackId,
    /// 1-based display position; recomputed on every reorder.
    pub bay: u32,
    pub slots: Vec<Slot>,
}

impl Rack {
    pub fn slot(&self, name: SlotName) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    pub fn slot_mut(&mut self, name: SlotName) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.name == name)
    }

    pub fn card(&self, name: SlotName) -> Option<&Card> {
        self.slot(name).and_then(|s| s.card.as_ref())
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().filter_map(|s| s.card.as_ref())
    }
}
