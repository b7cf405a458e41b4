// ── Site intent and module selection ──
//
// The two read-only snapshots a solve starts from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::band::{Band, MimoMode, RadioFamily};
use super::radio_unit::RadioUnitType;
use crate::error::CoreError;
use crate::registry::CapabilityRegistry;

/// What the site should carry. Immutable per solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIntent {
    pub family: RadioFamily,
    /// Number of sectors, numbered `1..=sectors`.
    pub sectors: u32,
    /// Active bands; order is preserved, duplicates are ignored.
    pub bands: Vec<Band>,
    pub mimo: MimoMode,
    /// Fibres per TDD radio unit (1 or 2).
    pub tdd_links: u8,
}

impl Default for SiteIntent {
    fn default() -> Self {
        Self {
            family: RadioFamily::MacroDual,
            sectors: 3,
            bands: vec![Band::L1800, Band::L2100, Band::L2600, Band::Nr3500],
            mimo: MimoMode::TwoByTwo,
            tdd_links: 2,
        }
    }
}

impl SiteIntent {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.sectors < 1 {
            return Err(CoreError::InvalidIntent {
                reason: "sector count must be at least 1".into(),
            });
        }
        if !matches!(self.tdd_links, 1 | 2) {
            return Err(CoreError::InvalidIntent {
                reason: format!("TDD link count must be 1 or 2, got {}", self.tdd_links),
            });
        }
        Ok(())
    }

    /// Whether any active band is TDD.
    pub fn has_tdd(&self) -> bool {
        self.bands.iter().any(|b| b.is_tdd())
    }

    /// Active bands with duplicates removed, first occurrence wins.
    pub fn active_bands(&self) -> Vec<Band> {
        let mut seen = Vec::with_capacity(self.bands.len());
        for band in &self.bands {
            if !seen.contains(band) {
                seen.push(*band);
            }
        }
        seen
    }

    /// Sector numbers `1..=sectors`.
    pub fn sector_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.sectors
    }
}

/// Chosen radio-unit hardware per active band.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleSelection(BTreeMap<Band, RadioUnitType>);

impl ModuleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, band: Band) -> Option<&RadioUnitType> {
        self.0.get(&band)
    }

    pub fn set(&mut self, band: Band, hardware: RadioUnitType) {
        self.0.insert(band, hardware);
    }

    pub fn remove(&mut self, band: Band) -> Option<RadioUnitType> {
        self.0.remove(&band)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Band, &RadioUnitType)> {
        self.0.iter().map(|(b, t)| (*b, t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The family default for every band that has one.
    pub fn defaults(
        family: RadioFamily,
        bands: &[Band],
        registry: &CapabilityRegistry,
    ) -> Self {
        let mut selection = Self::new();
        for band in bands {
            if let Some(default) = registry.default_module(family, *band) {
                selection.set(*band, default.clone());
            }
        }
        selection
    }

    /// Bring the selection in line with `intent`.
    ///
    /// After a family switch every active band is reset to the new family's
    /// default (or cleared if it has none); otherwise only bands without a
    /// selection are filled. Inactive bands are kept.
    pub fn reconcile(
        &mut self,
        intent: &SiteIntent,
        registry: &CapabilityRegistry,
        family_changed: bool,
    ) {
        for band in intent.active_bands() {
            if !family_changed && self.0.contains_key(&band) {
                continue;
            }
            match registry.default_module(intent.family, band) {
                Some(default) => self.set(band, default.clone()),
                None => {
                    self.remove(band);
                }
            }
        }
    }

    /// Every selected module for an active band must be offered by the
    /// family. Bands without a selection are fine; the aggregator drops them.
    pub fn validate(
        &self,
        intent: &SiteIntent,
        registry: &CapabilityRegistry,
    ) -> Result<(), CoreError> {
        for band in intent.active_bands() {
            let Some(hardware) = self.get(band) else {
                continue;
            };
            if !registry.is_selectable(intent.family, band, hardware) {
                return Err(CoreError::IncompatibleModule {
                    band,
                    hardware: hardware.clone(),
                    family: intent.family,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(Band, RadioUnitType)> for ModuleSelection {
    fn from_iter<I: IntoIterator<Item = (Band, RadioUnitType)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
