//! Project file read by `lcca run`.
//!
//! ```json
//! {
//!   "structure_works": {
//!     "Foundation": [
//!       [{"component": "Pile", "type": "Reinforced Cement Concrete", "grade": "M25",
//!         "quantity": 100, "unit": "cum", "rate": 6000}]
//!     ]
//!   },
//!   "emission_factors": {"Reinforced Cement Concrete": 0.15},
//!   "financial": ["4.25", "10", "0.5", "50", "2"],
//!   "traffic": ["Two Lane Roads", "3", "3000", "10", "Rural Road", "Minor Injury",
//!               "1000", "200", "150", "100", "50"]
//! }
//! ```
//!
//! Fixed-position rows are given as text lists, the way the input forms
//! hand them over. Carbon rows may be listed explicitly; otherwise they are
//! seeded from the stored material totals and `emission_factors`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use lcca_core::catalog::WorkCategory;
use lcca_core::{CarbonRow, ComponentRow, DemolitionRow, FinancialRow, MaintenanceRow, PipelineInputs, TrafficRow};

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    /// Row groups per category; each inner list is one structure work
    #[serde(default)]
    pub structure_works: BTreeMap<WorkCategory, Vec<Vec<ComponentRow>>>,

    #[serde(default)]
    pub carbon_emissions: Option<Vec<CarbonRow>>,

    /// Emission factor per material name, used when seeding carbon rows
    #[serde(default)]
    pub emission_factors: HashMap<String, f64>,

    pub financial: Vec<String>,
    pub traffic: Vec<String>,

    #[serde(default)]
    pub maintenance: Option<Vec<String>>,

    #[serde(default)]
    pub demolition: Option<Vec<String>>,
}

impl ProjectFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn financial(&self) -> Result<FinancialRow> {
        FinancialRow::from_fields(&self.financial).context("invalid financial row")
    }

    pub fn pipeline_inputs(&self) -> Result<PipelineInputs> {
        let traffic = TrafficRow::from_fields(&self.traffic).context("invalid traffic row")?;
        let maintenance = match &self.maintenance {
            Some(values) => MaintenanceRow::from_fields(values).context("invalid maintenance row")?,
            None => MaintenanceRow::default(),
        };
        let demolition = match &self.demolition {
            Some(values) => DemolitionRow::from_fields(values).context("invalid demolition row")?,
            None => DemolitionRow::default(),
        };
        Ok(PipelineInputs {
            traffic,
            maintenance,
            demolition,
        })
    }
}
