// ── Site files ──
//
// A TOML document describing one site: intent, module choices, slot
// overrides and the manual edits to replay on top of the solved topology.
// Names stay strings until `to_plan` so a typo is reported against the
// field it came from.

use std::collections::BTreeMap;
use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use rackplan_core::{
    Band, CableType, CapabilityRegistry, CardType, IdGenerator, MimoMode, ModuleSelection,
    PortRef, RackId, RackOrder, RadioFamily, RadioUnitType, SiteIntent, SitePlan, SlotName,
    SlotOverride, SlotOverrides, Topology, connect_manual, delete_connection,
    move_connection_source,
};

use crate::{ConfigError, parse_field};

/// Value of `card` that forces a slot empty.
const EMPTY_CARD: &str = "empty";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteFile {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Operator site code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default)]
    pub intent: IntentSection,

    /// Band name to hardware type.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,

    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,

    #[serde(default)]
    pub edits: EditsSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentSection {
    #[serde(default = "default_family")]
    pub family: String,

    #[serde(default = "default_sectors")]
    pub sectors: u32,

    #[serde(default = "default_bands")]
    pub bands: Vec<String>,

    #[serde(default = "default_mimo")]
    pub mimo: String,

    #[serde(default = "default_tdd_links")]
    pub tdd_links: u8,
}

impl Default for IntentSection {
    fn default() -> Self {
        Self {
            family: default_family(),
            sectors: default_sectors(),
            bands: default_bands(),
            mimo: default_mimo(),
            tdd_links: default_tdd_links(),
        }
    }
}

fn default_family() -> String {
    SiteIntent::default().family.to_string()
}
fn default_sectors() -> u32 {
    SiteIntent::default().sectors
}
fn default_bands() -> Vec<String> {
    SiteIntent::default()
        .bands
        .iter()
        .map(ToString::to_string)
        .collect()
}
fn default_mimo() -> String {
    SiteIntent::default().mimo.to_string()
}
fn default_tdd_links() -> u8 {
    SiteIntent::default().tdd_links
}

/// `[[overrides]]`: pin one slot to a card type or to `"empty"`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverrideEntry {
    pub rack: u32,
    pub slot: String,
    pub card: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EditsSection {
    /// Rack ids in display order; missing racks follow by id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rack_order: Vec<u32>,

    /// Connection ids to remove.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<String>,

    #[serde(default, rename = "move", skip_serializing_if = "Vec::is_empty")]
    pub moves: Vec<MoveEdit>,

    #[serde(default, rename = "connect", skip_serializing_if = "Vec::is_empty")]
    pub connects: Vec<ConnectEdit>,
}

impl EditsSection {
    pub fn is_empty(&self) -> bool {
        self.rack_order.is_empty()
            && self.delete.is_empty()
            && self.moves.is_empty()
            && self.connects.is_empty()
    }
}

/// `[[edits.move]]`: re-home the rack end of a connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveEdit {
    pub connection: String,
    pub rack: u32,
    pub slot: String,
    pub port: u8,
}

/// `[[edits.connect]]`: add a manual fibre.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectEdit {
    pub radio_unit: String,
    #[serde(default = "default_optical_port")]
    pub optical_port: u8,
    pub rack: u32,
    pub slot: String,
    pub port: u8,
    #[serde(default = "default_cable")]
    pub cable: String,
}

fn default_optical_port() -> u8 {
    1
}
fn default_cable() -> String {
    "fiber".into()
}

/// Load a site file, layering defaults, the file and `RACKPLAN_SITE_`
/// environment (`__` separates nested keys, e.g.
/// `RACKPLAN_SITE_INTENT__SECTORS=6`).
pub fn load_site(path: &Path) -> Result<SiteFile, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::SiteNotFound {
            path: path.to_path_buf(),
        });
    }
    let figment = Figment::new()
        .merge(Serialized::defaults(SiteFile::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RACKPLAN_SITE_").split("__"));

    let site: SiteFile = figment.extract()?;
    tracing::debug!(path = %path.display(), name = ?site.name, "site file loaded");
    Ok(site)
}

impl SiteFile {
    /// Parse the intent section.
    pub fn intent(&self) -> Result<SiteIntent, ConfigError> {
        let section = &self.intent;
        let bands = section
            .bands
            .iter()
            .map(|raw| parse_field::<Band>("intent", "bands", raw))
            .collect::<Result<Vec<_>, _>>()?;
        let intent = SiteIntent {
            family: parse_field::<RadioFamily>("intent", "family", &section.family)?,
            sectors: section.sectors,
            bands,
            mimo: parse_field::<MimoMode>("intent", "mimo", &section.mimo)?,
            tdd_links: section.tdd_links,
        };
        intent.validate()?;
        Ok(intent)
    }

    /// Parse the overrides list.
    pub fn slot_overrides(&self) -> Result<SlotOverrides, ConfigError> {
        let mut overrides = SlotOverrides::new();
        for entry in &self.overrides {
            let slot: SlotName = parse_field("overrides", "slot", &entry.slot)?;
            if !slot.is_internal() {
                tracing::warn!(%slot, rack = entry.rack, "external slots cannot be overridden, ignored");
                continue;
            }
            let value = if entry.card.eq_ignore_ascii_case(EMPTY_CARD) {
                SlotOverride::ForcedEmpty
            } else {
                SlotOverride::Forced(parse_field::<CardType>("overrides", "card", &entry.card)?)
            };
            overrides.set(RackId(entry.rack), slot, value);
        }
        Ok(overrides)
    }

    /// Everything a solve needs. Bands without a module get the family
    /// default; explicit modules must be offered by the family.
    pub fn to_plan(&self, registry: &CapabilityRegistry) -> Result<SitePlan, ConfigError> {
        let intent = self.intent()?;

        let mut modules = ModuleSelection::new();
        for (band, hardware) in &self.modules {
            let band: Band = parse_field("modules", band, band)?;
            modules.set(band, RadioUnitType::new(hardware));
        }
        modules.reconcile(&intent, registry, false);
        modules.validate(&intent, registry)?;

        Ok(SitePlan {
            intent,
            modules,
            overrides: self.slot_overrides()?,
        })
    }

    /// Replay `[edits]` on a freshly solved topology: deletes, moves,
    /// manual connections, then rack order.
    pub fn apply_edits(
        &self,
        topology: &mut Topology,
        registry: &CapabilityRegistry,
        ids: &mut dyn IdGenerator,
    ) -> Result<(), ConfigError> {
        let edits = &self.edits;

        for id in &edits.delete {
            delete_connection(topology, &id.as_str().into())?;
        }

        for edit in &edits.moves {
            let target = PortRef {
                rack: RackId(edit.rack),
                slot: parse_field("edits.move", "slot", &edit.slot)?,
                port: edit.port,
            };
            move_connection_source(topology, &edit.connection.as_str().into(), target)?;
        }

        for edit in &edits.connects {
            let source = PortRef {
                rack: RackId(edit.rack),
                slot: parse_field("edits.connect", "slot", &edit.slot)?,
                port: edit.port,
            };
            let cable: CableType = parse_field("edits.connect", "cable", &edit.cable)?;
            connect_manual(
                topology,
                source,
                &edit.radio_unit.as_str().into(),
                edit.optical_port,
                cable,
                registry,
                ids,
            )?;
        }

        if !edits.rack_order.is_empty() {
            let wanted: Vec<RackId> = edits.rack_order.iter().copied().map(RackId).collect();
            RackOrder::normalize(&wanted, topology).apply(topology);
        }

        if !edits.is_empty() {
            tracing::info!(
                deleted = edits.delete.len(),
                moved = edits.moves.len(),
                connected = edits.connects.len(),
                "manual edits applied"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rackplan_core::{SequentialIds, plan};
    use std::io::Write;

    fn write_site(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const DUAL_SITE: &str = r#"
name = "Hilltop"
code = "HT-042"

[intent]
family = "macro_dual"
sectors = 3
bands = ["L1800", "L2100", "NR3500"]
mimo = "2x2"
tdd_links = 2
"#;

    #[test]
    fn missing_site_file() {
        let err = load_site(Path::new("/nonexistent/site.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::SiteNotFound { .. }));
    }

    #[test]
    fn load_and_plan() {
        let file = write_site(DUAL_SITE);
        let site = load_site(file.path()).unwrap();
        assert_eq!(site.name.as_deref(), Some("Hilltop"));

        let registry = CapabilityRegistry::builtin();
        let plan_input = site.to_plan(&registry).unwrap();
        assert_eq!(plan_input.intent.bands, vec![Band::L1800, Band::L2100, Band::Nr3500]);
        assert_eq!(
            plan_input.modules.get(Band::L2100).unwrap().as_str(),
            "AHEGC"
        );
        assert!(plan_input.overrides.is_empty());
    }

    #[test]
    fn empty_file_uses_default_intent() {
        let file = write_site("");
        let site = load_site(file.path()).unwrap();
        let intent = site.intent().unwrap();
        assert_eq!(intent, SiteIntent::default());
    }

    #[test]
    fn unknown_band_is_a_validation_error() {
        let file = write_site("[intent]\nbands = [\"L1900\"]\n");
        let site = load_site(file.path()).unwrap();
        let err = site.intent().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "intent.bands")
        );
    }

    #[test]
    fn module_outside_family_is_rejected() {
        let file = write_site(
            "[intent]\nfamily = \"micro\"\nbands = [\"L2600\"]\n\n[modules]\nL2600 = \"AHHB\"\n",
        );
        let site = load_site(file.path()).unwrap();
        let err = site.to_plan(&CapabilityRegistry::builtin()).unwrap_err();
        assert!(matches!(err, ConfigError::Core(_)));
    }

    #[test]
    fn overrides_parse() {
        let file = write_site(
            r#"
[[overrides]]
rack = 1
slot = "B1"
card = "empty"

[[overrides]]
rack = 2
slot = "b3"
card = "abiq"

[[overrides]]
rack = 1
slot = "NODEBOX"
card = "empty"
"#,
        );
        let site = load_site(file.path()).unwrap();
        let overrides = site.slot_overrides().unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides.get(RackId(2), SlotName::B3),
            rackplan_core::OverrideState::Forced(CardType::Abiq)
        );
    }

    #[test]
    fn edits_replay_on_solved_topology() {
        let file = write_site(&format!(
            "{DUAL_SITE}
[edits]
rack_order = [1]
delete = [\"conn-7\"]

[[edits.move]]
connection = \"conn-4\"
rack = 1
slot = \"B1\"
port = 5

[[edits.connect]]
radio_unit = \"rru-AZQJ-1-2-3-2\"
optical_port = 2
rack = 1
slot = \"B2\"
port = 9
cable = \"ecpri\"
"
        ));
        let site = load_site(file.path()).unwrap();
        let registry = CapabilityRegistry::builtin();
        let mut ids = SequentialIds::new();
        let mut topology = plan(&site.to_plan(&registry).unwrap(), &registry, &mut ids).unwrap();
        assert_eq!(topology.connections.len(), 3);

        site.apply_edits(&mut topology, &registry, &mut ids).unwrap();

        assert_eq!(topology.connections.len(), 3);
        assert!(topology.connection(&"conn-7".into()).is_none());
        assert_eq!(topology.connection(&"conn-4".into()).unwrap().source.port, 5);
        let manual = topology.connections.iter().find(|c| c.manual).unwrap();
        assert_eq!(manual.source.port, 9);
        assert_eq!(manual.cable, CableType::Ecpri);
    }

    #[test]
    fn failing_edit_surfaces_core_error() {
        let file = write_site(&format!("{DUAL_SITE}\n[edits]\ndelete = [\"conn-99\"]\n"));
        let site = load_site(file.path()).unwrap();
        let registry = CapabilityRegistry::builtin();
        let mut ids = SequentialIds::new();
        let mut topology = plan(&site.to_plan(&registry).unwrap(), &registry, &mut ids).unwrap();
        let err = site.apply_edits(&mut topology, &registry, &mut ids).unwrap_err();
        assert!(matches!(err, ConfigError::Core(ref e) if e.is_not_found()));
    }
}
