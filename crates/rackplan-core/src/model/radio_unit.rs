// ── Radio-unit domain types ──

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::band::Band;
use super::entity_id::EntityId;

/// Radio-unit hardware type identifier, e.g. `"AHEGC"`.
///
/// Kept as an open string so catalog entries can be added from
/// configuration; ordering is lexical on the identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadioUnitType(String);

impl RadioUnitType {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RadioUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RadioUnitType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for RadioUnitType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Physical class of a radio unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    /// Small single-sector units cabled on fixed card ports.
    Compact,
    Macro,
}

/// One physical remote radio unit as produced by the aggregator.
///
/// Never mutated after creation within a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioUnitInstance {
    pub id: EntityId,
    pub hardware: RadioUnitType,
    /// Contiguous, ascending sector numbers.
    pub sectors: Vec<u32>,
    /// RF port index (1-based) to sector label, e.g. `3 -> "S2"`.
    pub port_mapping: BTreeMap<u8, String>,
    /// Bands carried; more than one only for merged dual-band hardware.
    pub bands: Vec<Band>,
    pub mimo: bool,
}

impl RadioUnitInstance {
    /// First sector served; drives the fixed-port pattern.
    pub fn primary_sector(&self) -> u32 {
        self.sectors.first().copied().unwrap_or(1)
    }

    pub fn min_sector(&self) -> u32 {
        self.sectors.iter().copied().min().unwrap_or(1)
    }

    pub fn serves_any(&self, sectors: &[u32]) -> bool {
        sectors.iter().any(|s| self.sectors.contains(s))
    }

    pub fn rf_ports_used(&self) -> usize {
        self.port_mapping.len()
    }

    /// `S1+2+3` style label.
    pub fn sector_label(&self) -> String {
        sector_label(&self.sectors)
    }

    /// `L1800/L2100` style label.
    pub fn band_label(&self) -> String {
        self.bands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

pub(crate) fn sector_label(sectors: &[u32]) -> String {
    let joined = sectors
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("+");
    format!("S{joined}")
}
