//! Command dispatch: bridges CLI args -> core planner -> output formatting.

pub mod bom;
pub mod config_cmd;
pub mod modules;
pub mod racks;
pub mod radios;
pub mod topology;
pub mod wiring;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a planning command to the appropriate handler.
pub fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Topology => topology::handle(session, global),
        Command::Racks => racks::handle(session, global),
        Command::Radios => radios::handle(session, global),
        Command::Wiring => wiring::handle(session, global),
        Command::Bom => bom::handle(session, global),
        Command::Modules => modules::handle(session, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
