// ── Planner facade ──
//
// Validate, aggregate, solve: the whole pipeline behind one call.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::aggregate;
use crate::error::CoreError;
use crate::model::{IdGenerator, ModuleSelection, SiteIntent, Topology};
use crate::overrides::SlotOverrides;
use crate::registry::CapabilityRegistry;
use crate::solver::solve;

/// Everything a solve needs from the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SitePlan {
    pub intent: SiteIntent,
    pub modules: ModuleSelection,
    #[serde(skip)]
    pub overrides: SlotOverrides,
}

/// Solve a site from scratch.
pub fn plan(
    site: &SitePlan,
    registry: &CapabilityRegistry,
    ids: &mut dyn IdGenerator,
) -> Result<Topology, CoreError> {
    site.intent.validate()?;
    let units = aggregate(&site.intent, &site.modules, registry, ids);
    let topology = solve(&site.intent, &units, &site.overrides, registry, ids)?;
    info!(
        racks = topology.racks.len(),
        radio_units = topology.radio_units.len(),
        connections = topology.connections.len(),
        "site solved"
    );
    Ok(topology)
}
