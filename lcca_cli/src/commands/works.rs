use anyhow::{Context, Result};
use tracing::info;

use lcca_core::Store;

use crate::cli::WorksArgs;

pub fn run(args: WorksArgs) -> Result<()> {
    let store = Store::open(&args.db_path, false)
        .with_context(|| format!("failed to open {}", args.db_path.display()))?;

    let summaries = store.list_structure_work_summaries()?;
    info!(items = summaries.len(), "listed structure works");

    for summary in &summaries {
        println!(
            "{:>5}  {:<16} {:<26} {} material row(s)",
            summary.id, summary.category, summary.component_type, summary.component_count
        );
    }

    for total in store.list_unique_material_grade_unit()? {
        println!("{:<44} {:>12.3} {}", total.label, total.total_quantity, total.unit);
    }
    Ok(())
}
