// ── Radio planning vocabulary ──
//
// Frequency bands, MIMO modes and radio-architecture families. These are
// the closed enumerations a site intent is expressed in.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One of the six frequency bands a site can activate.
///
/// The display name (`"L1800"`, `"NR3500"`) doubles as the lexical key
/// the solver sorts on.
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
pub enum Band {
    L700,
    L900,
    L1800,
    L2100,
    L2600,
    #[serde(rename = "NR3500")]
    #[strum(serialize = "NR3500")]
    Nr3500,
}

impl Band {
    /// The TDD band. Everything else is FDD.
    pub fn is_tdd(self) -> bool {
        matches!(self, Self::Nr3500)
    }

    /// Low bands are cabled with two fibres per unit.
    pub fn is_low_band(self) -> bool {
        matches!(self, Self::L700 | Self::L900)
    }

    /// First card port of this band's block on compact hardware, if the
    /// band has a fixed block.
    pub fn fixed_port_base(self) -> Option<u8> {
        match self {
            Self::L2600 => Some(1),
            Self::L1800 => Some(4),
            Self::L2100 => Some(7),
            _ => None,
        }
    }

    /// Compare two bands by display name, e.g. `L2600 < L700`.
    pub fn lexical_cmp(self, other: Self) -> std::cmp::Ordering {
        self.as_ref().cmp(other.as_ref())
    }
}

/// MIMO mode of every sector on the site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum MimoMode {
    #[serde(rename = "SISO")]
    #[strum(serialize = "SISO")]
    Siso,
    #[default]
    #[serde(rename = "2x2")]
    #[strum(serialize = "2x2")]
    TwoByTwo,
    #[serde(rename = "4x4")]
    #[strum(serialize = "4x4")]
    FourByFour,
}

impl MimoMode {
    /// RF ports one sector consumes on a radio unit.
    pub fn ports_per_sector(self) -> usize {
        match self {
            Self::Siso => 1,
            Self::TwoByTwo => 2,
            Self::FourByFour => 4,
        }
    }

    pub fn is_mimo(self) -> bool {
        !matches!(self, Self::Siso)
    }
}

/// Radio architecture family of the site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RadioFamily {
    /// Compact single-sector units.
    Micro,
    /// One macro unit per band.
    MacroSingle,
    /// Macro units, bands sharing dual-band hardware merged.
    #[default]
    MacroDual,
}

impl RadioFamily {
    /// Whether all bands of one sector should land in the same rack.
    pub fn enforces_sector_affinity(self) -> bool {
        matches!(self, Self::Micro | Self::MacroSingle)
    }

    /// Hard cap on sectors per radio unit, on top of the RF-port limit.
    pub fn sector_cap(self) -> Option<usize> {
        match self {
            Self::Micro => None,
            Self::MacroSingle | Self::MacroDual => Some(3),
        }
    }

    pub fn is_compact(self) -> bool {
        matches!(self, Self::Micro)
    }
}
