//! Bill of materials.

use tabled::Tabled;

use rackplan_core::{BomItem, bill_of_materials};

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BomRow {
    #[tabled(rename = "Part")]
    part: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Qty")]
    qty: usize,
}

fn to_row(item: &BomItem) -> BomRow {
    BomRow {
        part: item.part.clone(),
        description: item.description.clone(),
        qty: item.qty,
    }
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let topology = session.solve(global)?;
    let items = bill_of_materials(&topology, &session.registry);
    let out = output::render_list(&session.output, &items, to_row, |i| {
        format!("{}\t{}", i.part, i.qty)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
