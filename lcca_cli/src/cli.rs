use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "lcca",
    version,
    about = "Bridge life-cycle cost analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a project file into a store, replacing its works, and run the full analysis
    Run(RunArgs),
    /// List the structure works held in a store
    Works(WorksArgs),
    /// Print the material catalog
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Project JSON file
    pub project: PathBuf,

    #[arg(long, default_value = "lcca_project.db")]
    pub db_path: PathBuf,

    /// Delete any existing database before loading
    #[arg(long, default_value_t = false)]
    pub fresh: bool,

    /// Analysis configuration JSON (defaults when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the carbon price from the configuration
    #[arg(long)]
    pub carbon_price: Option<f64>,

    /// Print the report as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WorksArgs {
    #[arg(long, default_value = "lcca_project.db")]
    pub db_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Only this work category (e.g. "Foundation", "sub-structure")
    #[arg(long)]
    pub category: Option<String>,
}
