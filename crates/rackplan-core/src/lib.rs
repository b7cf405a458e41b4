//! Radio-site topology solver.
//!
//! Turns a compact site intent (bands, sectors, MIMO mode, radio family and
//! one hardware module per band) into racks, capacity cards, radio units and
//! the fibres between them:
//!
//! - **[`CapabilityRegistry`]**: Static hardware catalog and the per-family
//!   module lists and defaults.
//!
//! - **[`aggregate()`]**: Radio-Unit Aggregator. Groups bands by hardware
//!   type and packs sectors onto as few physical units as the RF ports and
//!   family caps allow.
//!
//! - **[`solve()`]**: Topology Allocator. Greedy per-link placement onto
//!   9-port capacity cards with rack and sector affinity, honouring
//!   [`SlotOverrides`] and overflowing into fresh racks when needed.
//!
//! - **[`edit`]**: Patch operations on a solved topology (delete, move and
//!   manual connections, rack reordering). They never re-run placement.
//!
//! - **[`report`]**: Bill of materials and wiring table folds.
//!
//! [`plan()`] wires validation, aggregation and solving together. All of it
//! is synchronous and free of I/O; identity comes from an injected
//! [`IdGenerator`], so [`SequentialIds`] makes every solve reproducible.

pub mod aggregate;
pub mod edit;
pub mod error;
pub mod model;
pub mod overrides;
pub mod planner;
pub mod registry;
pub mod report;
pub mod solver;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::aggregate;
pub use edit::{PortRef, RackOrder, connect_manual, delete_connection, move_connection_source};
pub use error::CoreError;
pub use overrides::{OverrideState, SlotOverride, SlotOverrides};
pub use planner::{SitePlan, plan};
pub use registry::{CapabilityRegistry, HardwareSpec, MAX_RF_PORTS};
pub use report::{BomItem, WiringRow, bill_of_materials, wiring_table};
pub use solver::{card_accepts_link, solve};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Radio vocabulary
    Band,
    // Rack equipment
    CableType,
    Card,
    CardType,
    // Cabling
    Connection,
    // Identity
    EntityId,
    FormFactor,
    IdGenerator,
    MimoMode,
    // Site inputs
    ModuleSelection,
    Rack,
    RackId,
    RadioEndpoint,
    RadioFamily,
    // Radio units
    RadioUnitInstance,
    RadioUnitType,
    RandomIds,
    SequentialIds,
    SiteIntent,
    Slot,
    SlotName,
    SourceEndpoint,
    // Solved output
    Topology,
};
