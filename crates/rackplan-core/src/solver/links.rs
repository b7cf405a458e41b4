// ── Required-link derivation ──
//
// Business rules deciding how many fibres a radio unit needs, which card
// family terminates them, and which card port a compact unit expects.

use crate::model::{CableType, CardType, RadioUnitInstance, SiteIntent};

/// One fibre the allocator must place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredLink {
    /// Radio-unit side, 1 = OPT1, 2 = OPT2.
    pub optical_port: u8,
    /// Capacity card family that must terminate the link.
    pub card_type: CardType,
    pub cable: CableType,
    /// Fixed card port for compact hardware.
    pub preferred_port: Option<u8>,
}

/// Position of a sector inside the repeating three-sector port pattern.
fn sector_offset(sector: u32) -> u8 {
    u8::try_from(sector.saturating_sub(1) % 3).unwrap_or(0)
}

/// Links required by `unit`, in optical-port order.
///
/// `fixed_ports` selects the compact-hardware convention of pinning each
/// band/sector to a known card port.
pub fn required_links(
    unit: &RadioUnitInstance,
    intent: &SiteIntent,
    fixed_ports: bool,
) -> Vec<RequiredLink> {
    let offset = sector_offset(unit.primary_sector());
    let pinned = |base: u8| fixed_ports.then_some(base + offset);

    if unit.bands.iter().any(|b| b.is_tdd()) {
        let mut links = vec![RequiredLink {
            optical_port: 1,
            card_type: CardType::AbioTdd,
            cable: CableType::Ecpri,
            preferred_port: pinned(1),
        }];
        if intent.tdd_links == 2 {
            links.push(RequiredLink {
                optical_port: 2,
                card_type: CardType::AbioTdd,
                cable: CableType::Ecpri,
                preferred_port: pinned(7),
            });
        }
        return links;
    }

    if unit.bands.iter().any(|b| b.is_low_band()) {
        return vec![
            RequiredLink {
                optical_port: 1,
                card_type: CardType::AbioFdd,
                cable: CableType::CpriLegacy,
                preferred_port: None,
            },
            RequiredLink {
                optical_port: 2,
                card_type: CardType::AbioFdd,
                cable: CableType::Cpri5g,
                preferred_port: None,
            },
        ];
    }

    let base = unit.bands.first().and_then(|b| b.fixed_port_base());
    vec![RequiredLink {
        optical_port: 1,
        card_type: CardType::AbioFdd,
        cable: CableType::CpriLegacy,
        preferred_port: base.and_then(pinned),
    }]
}
