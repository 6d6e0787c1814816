use anyhow::Result;

use lcca_core::catalog::{self, WorkCategory};

use crate::cli::CatalogArgs;

pub fn run(args: CatalogArgs) -> Result<()> {
    let categories = match &args.category {
        Some(raw) => vec![WorkCategory::from_str_flexible(raw)?],
        None => WorkCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", category);
        for component in catalog::component_types(category) {
            println!("  {}", component);
            for material in catalog::materials(category, component) {
                let grades = catalog::grades(category, component, material).unwrap_or_default();
                if grades.is_empty() {
                    println!("    {}", material);
                } else {
                    println!("    {} [{}]", material, grades.join(", "));
                }
            }
        }
    }
    Ok(())
}
