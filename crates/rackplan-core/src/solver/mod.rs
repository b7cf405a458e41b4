//! Topology Allocator.
//!
//! [`solve`] assigns every required fibre of every radio unit to a rack,
//! capacity card and card port, creating cards and racks on demand. It is
//! a pure function of its inputs: the same intent, radio units, overrides
//! and a deterministic [`IdGenerator`] always yield the same topology.

mod links;
mod placement;
mod skeleton;

pub use links::{RequiredLink, required_links};
pub use placement::{card_accepts_link, pick_port};
pub use skeleton::build_rack;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{IdGenerator, RackId, RadioUnitInstance, SiteIntent, Topology};
use crate::overrides::SlotOverrides;
use crate::registry::{CapabilityRegistry, HardwareSpec};
use placement::Allocator;

/// Display color for units whose hardware is not in the catalog.
const FALLBACK_COLOR: &str = "#CCCCCC";

/// Solve the rack, card and cabling layout for `radio_units`.
///
/// Never fails on well-formed input; overflow racks absorb any demand.
/// [`CoreError::PortExhaustionUnexpected`] signals a broken invariant.
pub fn solve(
    intent: &SiteIntent,
    radio_units: &[RadioUnitInstance],
    overrides: &SlotOverrides,
    registry: &CapabilityRegistry,
    ids: &mut dyn IdGenerator,
) -> Result<Topology, CoreError> {
    let first = build_rack(RackId::FIRST, overrides, ids);

    // Cable sectors in numeric order with bands of a sector adjacent.
    let mut ordered: Vec<&RadioUnitInstance> = radio_units.iter().collect();
    ordered.sort_by(|a, b| {
        a.min_sector().cmp(&b.min_sector()).then_with(|| {
            match (a.bands.first(), b.bands.first()) {
                (Some(x), Some(y)) => x.lexical_cmp(*y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            }
        })
    });

    let mut alloc = Allocator::new(
        vec![first],
        overrides,
        ids,
        intent.family.enforces_sector_affinity(),
    );

    for unit in ordered {
        let spec = registry.hardware(&unit.hardware);
        let fixed_ports = intent.family.is_compact() || spec.is_some_and(HardwareSpec::is_compact);
        let color = spec.map_or(FALLBACK_COLOR, |s| s.color.as_str());

        let links = required_links(unit, intent, fixed_ports);
        debug!(radio_unit = %unit.id, links = links.len(), fixed_ports, "placing links");
        for link in links {
            alloc.place(unit, link, color)?;
        }
    }

    Ok(Topology {
        racks: alloc.racks,
        radio_units: radio_units.to_vec(),
        connections: alloc.connections,
        has_aux_sync_feed: intent.has_tdd(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::model::{
        Band, CardType, MimoMode, ModuleSelection, RadioFamily, SequentialIds, SlotName,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn run(intent: &SiteIntent, overrides: &SlotOverrides) -> Topology {
        let registry = CapabilityRegistry::builtin();
        let selection = ModuleSelection::defaults(intent.family, &intent.bands, &registry);
        let mut ids = SequentialIds::new();
        let units = aggregate(intent, &selection, &registry, &mut ids);
        solve(intent, &units, overrides, &registry, &mut ids).unwrap()
    }

    fn intent(family: RadioFamily, sectors: u32, bands: &[Band], mimo: MimoMode) -> SiteIntent {
        SiteIntent {
            family,
            sectors,
            bands: bands.to_vec(),
            mimo,
            tdd_links: 2,
        }
    }

    fn assert_ports_unique(topology: &Topology) {
        let mut seen = BTreeSet::new();
        for conn in &topology.connections {
            assert!((1..=9).contains(&conn.source.port), "port {}", conn.source.port);
            assert!(seen.insert(conn.source.key()), "duplicate {:?}", conn.source.key());
            let rack = topology.rack(conn.source.rack).unwrap();
            let card = rack.card(conn.source.slot).unwrap();
            assert_eq!(card.card_type, conn.source.card_type);
        }
    }

    #[test]
    fn zero_bands_yield_bare_rack() {
        let topology = run(
            &intent(RadioFamily::MacroDual, 3, &[], MimoMode::TwoByTwo),
            &SlotOverrides::new(),
        );
        assert_eq!(topology.racks.len(), 1);
        assert!(topology.radio_units.is_empty());
        assert!(topology.connections.is_empty());
        assert!(!topology.has_aux_sync_feed);

        let rack = &topology.racks[0];
        let kinds: Vec<CardType> = rack.cards().map(|c| c.card_type).collect();
        assert_eq!(
            kinds,
            vec![
                CardType::Asib,
                CardType::Nodebox,
                CardType::Fpba,
                CardType::Fprb,
                CardType::Fpbc
            ]
        );
    }

    #[test]
    fn dual_band_site_cabling() {
        let topology = run(
            &intent(
                RadioFamily::MacroDual,
                3,
                &[Band::L1800, Band::L2100, Band::Nr3500],
                MimoMode::TwoByTwo,
            ),
            &SlotOverrides::new(),
        );
        assert!(topology.has_aux_sync_feed);
        assert_eq!(topology.racks.len(), 1);

        let merged = topology
            .radio_units
            .iter()
            .find(|u| u.hardware.as_str() == "AHEGC")
            .unwrap();
        let nr = topology
            .radio_units
            .iter()
            .find(|u| u.hardware.as_str() == "AZQJ")
            .unwrap();
        assert_eq!(topology.connections_for(&merged.id).count(), 1);
        assert_eq!(topology.connections_for(&nr.id).count(), 2);

        let rack = &topology.racks[0];
        assert_eq!(rack.card(SlotName::B1).unwrap().card_type, CardType::AbioFdd);
        assert_eq!(rack.card(SlotName::B2).unwrap().card_type, CardType::AbioTdd);
        let nr_ports: Vec<u8> = topology
            .connections_for(&nr.id)
            .map(|c| c.source.port)
            .collect();
        assert_eq!(nr_ports, vec![1, 2]);
        assert_ports_unique(&topology);
    }

    #[test]
    fn micro_fixed_ports_fill_one_card() {
        // 4x4 on 4-port micro hardware: one unit per sector and band.
        let topology = run(
            &intent(
                RadioFamily::Micro,
                3,
                &[Band::L2600, Band::L1800, Band::L2100],
                MimoMode::FourByFour,
            ),
            &SlotOverrides::new(),
        );
        assert_eq!(topology.connections.len(), 9);
        assert!(topology.connections.iter().all(|c| c.source.slot == SlotName::B1));

        let port_of = |band: &str, sector: u32| {
            topology
                .connections
                .iter()
                .find(|c| {
                    let unit = topology.radio_unit(&c.destination.radio_unit).unwrap();
                    unit.band_label() == band && unit.sectors == vec![sector]
                })
                .unwrap()
                .source
                .port
        };
        assert_eq!(port_of("L2600", 1), 1);
        assert_eq!(port_of("L2600", 3), 3);
        assert_eq!(port_of("L1800", 2), 5);
        assert_eq!(port_of("L2100", 1), 7);
        assert_eq!(port_of("L2100", 3), 9);
        assert_ports_unique(&topology);
    }

    #[test]
    fn micro_pattern_repeats_on_next_card() {
        let topology = run(
            &intent(RadioFamily::Micro, 6, &[Band::L2600], MimoMode::FourByFour),
            &SlotOverrides::new(),
        );
        assert_eq!(topology.connections.len(), 6);
        assert_eq!(topology.racks.len(), 1);

        let place_of = |sector: u32| {
            let conn = topology
                .connections
                .iter()
                .find(|c| c.destination.sectors == vec![sector])
                .unwrap();
            (conn.source.slot, conn.source.port)
        };
        for sector in 1..=3 {
            assert_eq!(place_of(sector), (SlotName::B1, u8::try_from(sector).unwrap()));
        }
        for sector in 4..=6 {
            assert_eq!(place_of(sector), (SlotName::B2, u8::try_from(sector - 3).unwrap()));
        }
        assert_ports_unique(&topology);
    }

    #[test]
    fn low_band_units_take_two_fibres() {
        let topology = run(
            &intent(RadioFamily::MacroSingle, 3, &[Band::L700], MimoMode::TwoByTwo),
            &SlotOverrides::new(),
        );
        assert_eq!(topology.connections.len(), 2);
        let ports: Vec<u8> = topology.connections.iter().map(|c| c.source.port).collect();
        assert_eq!(ports, vec![1, 2]);
        assert_eq!(topology.connections[0].color, "#32CD32");
    }

    #[test]
    fn forced_empty_slot_is_never_used() {
        let mut overrides = SlotOverrides::new();
        overrides.force_empty(RackId(1), SlotName::B1);
        overrides.force_card(RackId(1), SlotName::B2, CardType::AbioTdd);

        // L2600 on micro hardware prefers rack 1 port 1.
        let topology = run(
            &intent(RadioFamily::Micro, 1, &[Band::L2600], MimoMode::TwoByTwo),
            &overrides,
        );
        assert!(topology.racks[0].card(SlotName::B1).is_none());
        assert_eq!(topology.racks.len(), 2);
        let conn = &topology.connections[0];
        assert_eq!(conn.source.rack, RackId(2));
        assert_eq!(conn.source.slot, SlotName::B1);
        assert_eq!(conn.source.port, 1);
    }

    #[test]
    fn forced_abiq_takes_both_link_families() {
        let mut overrides = SlotOverrides::new();
        overrides.force_card(RackId(1), SlotName::B1, CardType::Abiq);
        let topology = run(
            &intent(
                RadioFamily::MacroDual,
                3,
                &[Band::L2600, Band::Nr3500],
                MimoMode::TwoByTwo,
            ),
            &overrides,
        );
        assert!(topology.connections.iter().all(|c| c.source.slot == SlotName::B1));
        assert!(
            topology
                .connections
                .iter()
                .all(|c| c.source.card_type == CardType::Abiq)
        );
        assert!(topology.racks[0].card(SlotName::B2).is_none());
    }

    #[test]
    fn solve_is_deterministic() {
        let intent = intent(
            RadioFamily::MacroSingle,
            6,
            &[Band::L700, Band::L1800, Band::L2600, Band::Nr3500],
            MimoMode::FourByFour,
        );
        let a = run(&intent, &SlotOverrides::new());
        let b = run(&intent, &SlotOverrides::new());
        assert_eq!(a, b);
    }

    #[test]
    fn overflow_rack_count_grows_monotonically() {
        // One sector per unit and one free-searched fibre per unit:
        // 18 fibres per rack.
        let mut previous = 0;
        for sectors in 1..=40 {
            let topology = run(
                &intent(RadioFamily::MacroDual, sectors, &[Band::L2600], MimoMode::FourByFour),
                &SlotOverrides::new(),
            );
            let racks = topology.racks.len();
            assert!(racks >= previous, "{sectors} sectors: {racks} < {previous}");
            assert_eq!(racks, (sectors as usize).div_ceil(18).max(1));
            assert_ports_unique(&topology);
            previous = racks;
        }
    }

    #[test]
    fn ports_unique_across_families() {
        let bands = [
            Band::L700,
            Band::L900,
            Band::L1800,
            Band::L2100,
            Band::L2600,
            Band::Nr3500,
        ];
        for family in [RadioFamily::Micro, RadioFamily::MacroSingle, RadioFamily::MacroDual] {
            for mimo in [MimoMode::Siso, MimoMode::TwoByTwo, MimoMode::FourByFour] {
                let topology = run(&intent(family, 9, &bands, mimo), &SlotOverrides::new());
                assert_ports_unique(&topology);
                for unit in &topology.radio_units {
                    assert!(topology.connections_for(&unit.id).count() >= 1);
                }
            }
        }
    }
}
