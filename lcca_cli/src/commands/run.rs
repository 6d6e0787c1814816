use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use lcca_core::catalog::WorkCategory;
use lcca_core::{AnalysisConfig, AnalysisSession, BatchOutcome, CarbonRow, LifeCycleReport, Store};

use crate::cli::RunArgs;
use crate::project::ProjectFile;

pub fn run(args: RunArgs) -> Result<()> {
    let project = ProjectFile::load(&args.project)?;

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(price) = args.carbon_price {
        config = config.with_carbon_price(price);
    }

    let mut store = Store::open(&args.db_path, args.fresh)
        .with_context(|| format!("failed to open {}", args.db_path.display()))?;
    info!(db = %args.db_path.display(), fresh = args.fresh, "opened project store");

    load_project(&mut store, &project)?;

    let session = AnalysisSession::new(config, project.financial()?)?;
    let report = session.run(&store, &project.pipeline_inputs()?)?;

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_table(&report);
    }
    Ok(())
}

/// Write the project's works and carbon rows into `store`.
///
/// Each category's stored works are replaced by the project's, so loading
/// the same project again leaves the totals unchanged.
pub fn load_project(store: &mut Store, project: &ProjectFile) -> Result<()> {
    let summaries = store.list_structure_work_summaries()?;
    for category in WorkCategory::ALL {
        let old_ids: Vec<i64> = summaries
            .iter()
            .filter(|summary| summary.category == category)
            .map(|summary| summary.id)
            .collect();

        match project.structure_works.get(&category) {
            Some(groups) if !groups.is_empty() => {
                let ids = store
                    .replace_structure_work_group(category, groups, &old_ids)
                    .with_context(|| format!("failed to store {} works", category))?;
                info!(category = %category, items = ids.len(), replaced = old_ids.len(), "loaded structure works");
            }
            _ => {
                for id in &old_ids {
                    store.delete_structure_work(*id)?;
                }
                if !old_ids.is_empty() {
                    info!(category = %category, removed = old_ids.len(), "cleared structure works");
                }
            }
        }
    }

    let carbon_rows = match &project.carbon_emissions {
        Some(rows) => rows.clone(),
        None => seed_carbon_rows(store, project)?,
    };
    if let BatchOutcome::RolledBack(err) = store.record_carbon_emissions(&carbon_rows) {
        bail!("carbon emission data was not saved: {}", err);
    }
    Ok(())
}

fn seed_carbon_rows(store: &Store, project: &ProjectFile) -> Result<Vec<CarbonRow>> {
    let totals = store.list_unique_material_grade_unit()?;
    let rows = totals
        .iter()
        .map(|total| {
            let factor = project.emission_factors.get(&total.material).copied().unwrap_or_else(|| {
                warn!(material = %total.label, "no emission factor given, using 0");
                0.0
            });
            total.to_carbon_row(factor, 0.0)
        })
        .collect();
    Ok(rows)
}

fn print_table(report: &LifeCycleReport) {
    println!("Life-cycle cost report ({})", report.session_id);
    println!("{}", "-".repeat(62));
    for (label, amount) in report.line_items() {
        println!("{:<44} {:>17.2}", label, amount);
    }
    println!("{}", "-".repeat(62));
    println!("{:<44} {:>17.2}", "Total", report.total());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectFile {
        serde_json::from_str(
            r#"{
                "structure_works": {
                    "Foundation": [
                        [{"component": "Pile", "type": "Reinforced Cement Concrete", "grade": "M25",
                          "quantity": 100, "unit": "cum", "rate": 6000}]
                    ]
                },
                "emission_factors": {"Reinforced Cement Concrete": 0.15},
                "financial": ["4.25", "10", "0.5", "50", "2"],
                "traffic": ["Two Lane Roads", "3", "3000", "10", "Rural Road", "Minor Injury",
                            "1000", "200", "150", "100", "50"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_loading_twice_keeps_one_copy() {
        let mut store = Store::open_in_memory().unwrap();
        let project = project();
        load_project(&mut store, &project).unwrap();
        load_project(&mut store, &project).unwrap();

        assert_eq!(store.list_structure_work_summaries().unwrap().len(), 1);

        let session = AnalysisSession::new(AnalysisConfig::default(), project.financial().unwrap()).unwrap();
        assert!((session.initial_cost(&store).unwrap() - 600_000.0).abs() < 1e-9);

        let carbon = store.list_carbon_emissions().unwrap();
        assert_eq!(carbon.len(), 1);
        assert!((carbon[0].quantity - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_missing_from_project_is_cleared() {
        let mut store = Store::open_in_memory().unwrap();
        load_project(&mut store, &project()).unwrap();

        let mut emptied = project();
        emptied.structure_works.clear();
        emptied.carbon_emissions = Some(Vec::new());
        load_project(&mut store, &emptied).unwrap();

        assert!(store.list_structure_work_summaries().unwrap().is_empty());
        assert!(store.list_all_material_usages().unwrap().is_empty());
    }
}
