// ── Core error types ──
//
// The solver itself is total: under normal inputs it never fails. These
// variants guard the boundaries around it (intent validation, catalog
// lookups, manual-edit patches) and one regression tripwire.

use thiserror::Error;

use crate::model::{Band, EntityId, RackId, RadioFamily, RadioUnitType, SlotName};

/// Unified error type for the core crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid site intent: {reason}")]
    InvalidIntent { reason: String },

    #[error("Unknown radio-unit hardware type: {hardware}")]
    UnknownHardwareType { hardware: RadioUnitType },

    #[error("Module {hardware} is not selectable for {band} in the {family} family")]
    IncompatibleModule {
        band: Band,
        hardware: RadioUnitType,
        family: RadioFamily,
    },

    // ── Solver invariants ────────────────────────────────────────────
    /// Unreachable while rack overflow is unconditional; surfaced instead
    /// of silently dropping a link.
    #[error("No port could be allocated for {radio_unit} OPT{optical_port}")]
    PortExhaustionUnexpected {
        radio_unit: EntityId,
        optical_port: u8,
    },

    // ── Edit errors ──────────────────────────────────────────────────
    #[error("Rack {rack} not found")]
    RackNotFound { rack: RackId },

    #[error("Slot {slot} not found in rack {rack}")]
    SlotNotFound { rack: RackId, slot: SlotName },

    #[error("Slot {slot} in rack {rack} holds no card")]
    SlotEmpty { rack: RackId, slot: SlotName },

    #[error("Port {port} out of range for rack {rack} slot {slot} (1..={max})")]
    PortOutOfRange {
        rack: RackId,
        slot: SlotName,
        port: u8,
        max: u8,
    },

    #[error("Port {port} on rack {rack} slot {slot} is already cabled by {connection}")]
    PortInUse {
        rack: RackId,
        slot: SlotName,
        port: u8,
        connection: EntityId,
    },

    #[error("Connection not found: {id}")]
    ConnectionNotFound { id: EntityId },

    #[error("Radio unit not found: {id}")]
    RadioUnitNotFound { id: EntityId },

    #[error("Optical port {port} out of range for {hardware} (1..={max})")]
    OpticalPortOutOfRange {
        hardware: RadioUnitType,
        port: u8,
        max: u8,
    },
}

impl CoreError {
    /// Whether the error names something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RackNotFound { .. }
                | Self::SlotNotFound { .. }
                | Self::ConnectionNotFound { .. }
                | Self::RadioUnitNotFound { .. }
                | Self::UnknownHardwareType { .. }
        )
    }
}
