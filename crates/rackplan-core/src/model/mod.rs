// ── Site topology domain model ──
//
// Every type the solver reads or produces. Renderers and report builders
// depend on these and nothing else.

pub mod entity_id;

pub mod band;
pub mod connection;
pub mod equipment;
pub mod radio_unit;
pub mod site;
pub mod topology;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use rackplan_core::model::*` gives you everything.

// Identity
pub use entity_id::{EntityId, IdGenerator, RandomIds, SequentialIds};

// Radio vocabulary
pub use band::{Band, MimoMode, RadioFamily};

// Site inputs
pub use site::{ModuleSelection, SiteIntent};

// Rack equipment
pub use equipment::{
    CAPACITY_CARD_PORTS, CableType, Card, CardPort, CardType, Rack, RackId, Slot, SlotName,
    SlotSide,
};

// Radio units
pub use radio_unit::{FormFactor, RadioUnitInstance, RadioUnitType};

// Cabling
pub use connection::{Connection, RadioEndpoint, SourceEndpoint};

// Solved output
pub use topology::Topology;
