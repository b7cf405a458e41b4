//! Radio-Unit Aggregator.
//!
//! Turns a site intent and a per-band module selection into the list of
//! physical radio units the site needs. Bands sharing one hardware type are
//! merged onto the same units; sectors are packed greedily.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{
    Band, IdGenerator, ModuleSelection, RadioUnitInstance, RadioUnitType, SiteIntent,
};
use crate::registry::{CapabilityRegistry, MAX_RF_PORTS};

/// Sector capacity of one unit of a hardware group.
fn max_sectors_per_unit(intent: &SiteIntent, rf_ports: usize) -> usize {
    let by_ports = rf_ports / intent.mimo.ports_per_sector();
    let capped = match intent.family.sector_cap() {
        Some(cap) => by_ports.min(cap),
        None => by_ports,
    };
    capped.max(1)
}

/// Build radio-unit instances for every active band that has a module.
///
/// Output is ordered by hardware type, then by first sector. Bands without a
/// selection and types missing from the registry are skipped.
pub fn aggregate(
    intent: &SiteIntent,
    selection: &ModuleSelection,
    registry: &CapabilityRegistry,
    ids: &mut dyn IdGenerator,
) -> Vec<RadioUnitInstance> {
    let mut groups: BTreeMap<RadioUnitType, Vec<Band>> = BTreeMap::new();
    for band in intent.active_bands() {
        match selection.get(band) {
            Some(hardware) => groups.entry(hardware.clone()).or_default().push(band),
            None => debug!(%band, "no module selected, band excluded"),
        }
    }

    let ports_per_sector = intent.mimo.ports_per_sector();
    let mut units = Vec::new();

    for (hardware, bands) in groups {
        let Some(spec) = registry.hardware(&hardware) else {
            warn!(%hardware, "hardware type not in catalog, skipped");
            continue;
        };
        let rf_ports = spec.rf_ports.min(MAX_RF_PORTS);
        if ports_per_sector > rf_ports {
            warn!(
                %hardware,
                rf_ports,
                ports_per_sector,
                "hardware cannot host a single sector at this MIMO mode, skipped"
            );
            continue;
        }
        let max_sectors = max_sectors_per_unit(intent, rf_ports);

        let mut pending: Vec<u32> = Vec::new();
        for sector in intent.sector_numbers() {
            let fits_ports = (pending.len() + 1) * ports_per_sector <= rf_ports;
            let fits_cap = pending.len() < max_sectors;
            if !pending.is_empty() && !(fits_ports && fits_cap) {
                units.push(build_unit(
                    &hardware,
                    &bands,
                    std::mem::take(&mut pending),
                    intent,
                    ids,
                ));
            }
            pending.push(sector);
        }
        if !pending.is_empty() {
            units.push(build_unit(&hardware, &bands, pending, intent, ids));
        }
    }

    debug!(count = units.len(), "radio units aggregated");
    units
}

fn build_unit(
    hardware: &RadioUnitType,
    bands: &[Band],
    sectors: Vec<u32>,
    intent: &SiteIntent,
    ids: &mut dyn IdGenerator,
) -> RadioUnitInstance {
    let ports_per_sector = intent.mimo.ports_per_sector();
    let mut port_mapping = BTreeMap::new();
    let mut port: u8 = 1;
    for sector in &sectors {
        for _ in 0..ports_per_sector {
            port_mapping.insert(port, format!("S{sector}"));
            port = port.saturating_add(1);
        }
    }

    let joined = sectors
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("-");
    let id = ids.next_id(&format!("rru-{hardware}-{joined}"));

    RadioUnitInstance {
        id,
        hardware: hardware.clone(),
        sectors,
        port_mapping,
        bands: bands.to_vec(),
        mimo: intent.mimo.is_mimo(),
    }
}
