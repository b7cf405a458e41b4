//! Capability Registry: static hardware and per-family module tables.
//!
//! Pure data. [`CapabilityRegistry::builtin`] carries the shipped catalog;
//! configuration may [`extend`](CapabilityRegistry::extend) it with extra
//! hardware before the first solve.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Band, FormFactor, RadioFamily, RadioUnitType};

// ── Palette ─────────────────────────────────────────────────────────

const YELLOW: &str = "#FFE600";
const ORANGE: &str = "#FF8C00";
const MAGENTA: &str = "#FF00FF";
const CYAN: &str = "#00BFFF";
const GREEN: &str = "#32CD32";

/// Highest RF port number a radio unit can expose.
pub const MAX_RF_PORTS: usize = 255;

/// Catalog entry for one radio-unit hardware type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareSpec {
    pub hardware: RadioUnitType,
    /// Band label printed on diagrams, e.g. `"18/21"`.
    pub sub_label: String,
    pub description: String,
    pub color: String,
    /// Total RF (antenna) ports, at most [`MAX_RF_PORTS`].
    pub rf_ports: usize,
    /// Fibre uplinks (OPT1/OPT2).
    pub optical_ports: u8,
    pub form_factor: FormFactor,
}

impl HardwareSpec {
    pub fn is_compact(&self) -> bool {
        self.form_factor == FormFactor::Compact
    }
}

struct Entry {
    id: &'static str,
    sub_label: &'static str,
    description: &'static str,
    color: &'static str,
    rf_ports: usize,
    optical_ports: u8,
    form_factor: FormFactor,
}

const fn macro_unit(
    id: &'static str,
    sub_label: &'static str,
    description: &'static str,
    color: &'static str,
) -> Entry {
    Entry {
        id,
        sub_label,
        description,
        color,
        rf_ports: 6,
        optical_ports: 2,
        form_factor: FormFactor::Macro,
    }
}

const fn micro_unit(
    id: &'static str,
    sub_label: &'static str,
    description: &'static str,
    color: &'static str,
    optical_ports: u8,
) -> Entry {
    Entry {
        id,
        sub_label,
        description,
        color,
        rf_ports: 4,
        optical_ports,
        form_factor: FormFactor::Compact,
    }
}

const CATALOG: &[Entry] = &[
    // L2600
    macro_unit("AHHB", "2600", "Macro 4T4R 2600", YELLOW),
    macro_unit("ARHA", "2600", "Macro 2600 High Power", YELLOW),
    micro_unit("AHHA", "2600", "Micro 2600", YELLOW, 1),
    // L700 single band
    micro_unit("AHBB", "700", "Micro 700", GREEN, 1),
    micro_unit("AHBC", "700", "Micro 700", GREEN, 1),
    macro_unit("FHPG", "700", "Macro Single 700", GREEN),
    macro_unit("FHPD", "700", "Macro Single 700", GREEN),
    macro_unit("AHPC", "700", "Macro Single 700", GREEN),
    macro_unit("AHPD", "700", "Macro Single 700", GREEN),
    macro_unit("AHPE", "700", "Macro Single 700", GREEN),
    macro_unit("AHPJ", "700", "Macro Single 700", GREEN),
    macro_unit("AHPF", "700", "Macro Single 700", GREEN),
    macro_unit("AHPB", "700", "Macro Single 700", GREEN),
    macro_unit("AHPH", "700", "Macro Single 700", GREEN),
    macro_unit("AHPG", "700", "Macro Single 700", GREEN),
    // L900 single band
    macro_unit("FHDI", "900", "Macro Single 900", GREEN),
    macro_unit("AHDA", "900", "Macro Single 900", GREEN),
    macro_unit("AHDB", "900", "Macro Single 900", GREEN),
    // L700 + L900 dual band
    macro_unit("AHPMDB", "700/900", "Macro Low Band", GREEN),
    macro_unit("AHPDA", "700/900", "Macro Low Band", GREEN),
    macro_unit("AHPDB", "700/900", "Macro Low Band", GREEN),
    macro_unit("AHPDC", "700/900", "Macro Low Band", GREEN),
    // L1800 single band
    macro_unit("FHEL", "1800", "Macro Single 1800", MAGENTA),
    macro_unit("AHEC", "1800", "Macro Single 1800", MAGENTA),
    macro_unit("AHED", "1800", "Macro Single 1800", MAGENTA),
    macro_unit("AHEB", "1800", "Macro Single 1800", MAGENTA),
    macro_unit("AHEH", "1800", "Macro Single 1800", MAGENTA),
    // L2100 single band
    macro_unit("AHGA", "2100", "Macro Single 2100", CYAN),
    macro_unit("AHGC", "2100", "Macro Single 2100", CYAN),
    macro_unit("AHGF", "2100", "Macro Single 2100", CYAN),
    // L1800 + L2100 dual band
    macro_unit("AHEGC", "18/21", "Macro Dual Band", MAGENTA),
    macro_unit("AHEGA", "18/21", "Macro Dual Band", MAGENTA),
    macro_unit("AHEGI", "18/21", "Macro Dual Band", MAGENTA),
    macro_unit("AHEGB", "18/21", "Macro Dual Band", MAGENTA),
    macro_unit("AHEGJ", "18/21", "Macro Dual Band", MAGENTA),
    macro_unit("AHEGF", "18/21", "Macro Dual Band", MAGENTA),
    macro_unit("AHEGG", "18/21", "Macro Dual Band", MAGENTA),
    // Micro 1800 / 2100
    micro_unit("AHEJ", "1800", "Micro 1800", MAGENTA, 1),
    micro_unit("AHGB", "2100", "Micro 2100", CYAN, 1),
    // NR3500
    Entry {
        id: "AZQJ",
        sub_label: "NR3500",
        description: "Massive MIMO",
        color: ORANGE,
        rf_ports: 6,
        optical_ports: 2,
        form_factor: FormFactor::Macro,
    },
    micro_unit("AWHQE", "3500", "Micro 3500", ORANGE, 2),
    micro_unit("AWHQG", "3500", "Micro 3500", ORANGE, 2),
    micro_unit("AWHQF", "3500", "Micro 3500", ORANGE, 2),
    macro_unit("AKQA", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AKQI", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AKQJ", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AKQZ", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AZQG", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AZQH", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AZQI", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AZQL", "NR3500", "Macro 3500", ORANGE),
    macro_unit("AZQS", "NR3500", "Macro 3500", ORANGE),
];

// ── Module lists per architecture ───────────────────────────────────

const NR3500_MACRO: &[&str] = &[
    "AZQJ", "AKQA", "AKQI", "AKQJ", "AKQZ", "AZQG", "AZQH", "AZQI", "AZQL", "AZQS",
];
const LOW_BAND_DUAL: &[&str] = &["AHPDA", "AHPMDB", "AHPDB", "AHPDC"];
const MID_BAND_DUAL: &[&str] = &["AHEGC", "AHEGA", "AHEGI", "AHEGB", "AHEGJ", "AHEGF", "AHEGG"];

/// `(band, selectable modules, default)`; the default is always listed first
/// where the band has modules at all.
type FamilyTable = [(Band, &'static [&'static str], Option<&'static str>); 6];

const MICRO: FamilyTable = [
    (Band::L700, &["AHBB", "AHBC"], Some("AHBB")),
    // No compact L900 hardware.
    (Band::L900, &[], None),
    (Band::L1800, &["AHEJ"], Some("AHEJ")),
    (Band::L2100, &["AHGB"], Some("AHGB")),
    (Band::L2600, &["AHHA"], Some("AHHA")),
    (Band::Nr3500, &["AWHQF", "AWHQE", "AWHQG"], Some("AWHQF")),
];

const MACRO_SINGLE: FamilyTable = [
    (
        Band::L700,
        &[
            "FHPG", "FHPD", "AHPC", "AHPD", "AHPE", "AHPJ", "AHPF", "AHPB", "AHPH", "AHPG",
        ],
        Some("FHPG"),
    ),
    (Band::L900, &["FHDI", "AHDA", "AHDB"], Some("FHDI")),
    (Band::L1800, &["FHEL", "AHEC", "AHED", "AHEB", "AHEH"], Some("FHEL")),
    (Band::L2100, &["AHGA", "AHGC", "AHGF"], Some("AHGA")),
    (Band::L2600, &["AHHB", "ARHA"], Some("AHHB")),
    (Band::Nr3500, NR3500_MACRO, Some("AZQJ")),
];

const MACRO_DUAL: FamilyTable = [
    (Band::L700, LOW_BAND_DUAL, Some("AHPDA")),
    (Band::L900, LOW_BAND_DUAL, Some("AHPDA")),
    (Band::L1800, MID_BAND_DUAL, Some("AHEGC")),
    (Band::L2100, MID_BAND_DUAL, Some("AHEGC")),
    (Band::L2600, &["AHHB", "ARHA"], Some("AHHB")),
    (Band::Nr3500, NR3500_MACRO, Some("AZQJ")),
];

// ── Registry ────────────────────────────────────────────────────────

/// Lookup tables consulted by the aggregator, the allocator and the
/// report fold. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    hardware: BTreeMap<RadioUnitType, HardwareSpec>,
    modules: HashMap<(RadioFamily, Band), Vec<RadioUnitType>>,
    defaults: HashMap<(RadioFamily, Band), RadioUnitType>,
}

impl CapabilityRegistry {
    /// An empty registry; everything is unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for entry in CATALOG {
            registry.extend(HardwareSpec {
                hardware: RadioUnitType::new(entry.id),
                sub_label: entry.sub_label.into(),
                description: entry.description.into(),
                color: entry.color.into(),
                rf_ports: entry.rf_ports,
                optical_ports: entry.optical_ports,
                form_factor: entry.form_factor,
            });
        }
        for (family, table) in [
            (RadioFamily::Micro, &MICRO),
            (RadioFamily::MacroSingle, &MACRO_SINGLE),
            (RadioFamily::MacroDual, &MACRO_DUAL),
        ] {
            for (band, modules, default) in table {
                for module in *modules {
                    registry.allow(family, *band, RadioUnitType::new(module));
                }
                if let Some(default) = default {
                    registry
                        .defaults
                        .insert((family, *band), RadioUnitType::new(default));
                }
            }
        }
        registry
    }

    /// Add or replace a hardware entry.
    pub fn extend(&mut self, spec: HardwareSpec) {
        self.hardware.insert(spec.hardware.clone(), spec);
    }

    /// Make `hardware` selectable for `band` in `family`.
    pub fn allow(&mut self, family: RadioFamily, band: Band, hardware: RadioUnitType) {
        let list = self.modules.entry((family, band)).or_default();
        if !list.contains(&hardware) {
            list.push(hardware);
        }
    }

    /// Replace the family default for `band`.
    pub fn set_default(&mut self, family: RadioFamily, band: Band, hardware: RadioUnitType) {
        self.allow(family, band, hardware.clone());
        self.defaults.insert((family, band), hardware);
    }

    pub fn hardware(&self, hardware: &RadioUnitType) -> Option<&HardwareSpec> {
        self.hardware.get(hardware)
    }

    pub fn require(&self, hardware: &RadioUnitType) -> Result<&HardwareSpec, CoreError> {
        self.hardware(hardware)
            .ok_or_else(|| CoreError::UnknownHardwareType {
                hardware: hardware.clone(),
            })
    }

    /// Modules offered for `band` in `family`, in catalog order.
    pub fn selectable(&self, family: RadioFamily, band: Band) -> &[RadioUnitType] {
        self.modules
            .get(&(family, band))
            .map_or(&[], Vec::as_slice)
    }

    pub fn is_selectable(&self, family: RadioFamily, band: Band, hardware: &RadioUnitType) -> bool {
        self.selectable(family, band).contains(hardware)
    }

    pub fn default_module(&self, family: RadioFamily, band: Band) -> Option<&RadioUnitType> {
        self.defaults.get(&(family, band))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_catalog_lookup() {
        let registry = CapabilityRegistry::builtin();
        let spec = registry.hardware(&"AHEGC".into()).unwrap();
        assert_eq!(spec.rf_ports, 6);
        assert_eq!(spec.optical_ports, 2);
        assert!(!spec.is_compact());

        let micro = registry.hardware(&"AWHQF".into()).unwrap();
        assert!(micro.is_compact());
        assert_eq!(micro.rf_ports, 4);
    }

    #[test]
    fn unknown_hardware_is_none_and_require_errors() {
        let registry = CapabilityRegistry::builtin();
        let unknown = RadioUnitType::new("ZZZZ");
        assert!(registry.hardware(&unknown).is_none());
        assert_eq!(
            registry.require(&unknown).unwrap_err(),
            CoreError::UnknownHardwareType { hardware: unknown }
        );
    }

    #[test]
    fn every_default_is_selectable_and_cataloged() {
        let registry = CapabilityRegistry::builtin();
        for family in RadioFamily::iter() {
            for band in Band::iter() {
                if let Some(default) = registry.default_module(family, band) {
                    assert!(registry.is_selectable(family, band, default));
                    assert!(registry.hardware(default).is_some(), "{default} missing");
                }
                for module in registry.selectable(family, band) {
                    assert!(registry.hardware(module).is_some(), "{module} missing");
                }
            }
        }
    }

    #[test]
    fn micro_has_no_l900() {
        let registry = CapabilityRegistry::builtin();
        assert!(registry.selectable(RadioFamily::Micro, Band::L900).is_empty());
        assert!(registry.default_module(RadioFamily::Micro, Band::L900).is_none());
    }

    #[test]
    fn dual_family_shares_hardware_across_bands() {
        let registry = CapabilityRegistry::builtin();
        assert_eq!(
            registry.default_module(RadioFamily::MacroDual, Band::L1800),
            registry.default_module(RadioFamily::MacroDual, Band::L2100)
        );
        assert_eq!(
            registry.selectable(RadioFamily::MacroDual, Band::L700),
            registry.selectable(RadioFamily::MacroDual, Band::L900)
        );
    }

    #[test]
    fn extend_adds_hardware() {
        let mut registry = CapabilityRegistry::empty();
        registry.extend(HardwareSpec {
            hardware: "TEST1".into(),
            sub_label: "1800".into(),
            description: "Lab unit".into(),
            color: "#000000".into(),
            rf_ports: 8,
            optical_ports: 2,
            form_factor: FormFactor::Macro,
        });
        registry.set_default(RadioFamily::MacroSingle, Band::L1800, "TEST1".into());
        assert_eq!(registry.require(&"TEST1".into()).unwrap().rf_ports, 8);
        assert_eq!(
            registry.default_module(RadioFamily::MacroSingle, Band::L1800),
            Some(&RadioUnitType::new("TEST1"))
        );
    }
}
