//! Records read back out of the project database.

use serde::{Deserialize, Serialize};

use crate::catalog::WorkCategory;
use crate::rows::{CarbonRow, FinancialRow};

/// A structural component entry (e.g., one pile group) under a work category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureWorkItem {
    /// Comp-id
    pub id: i64,
    pub category: WorkCategory,
    pub component_type: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Grouped summary row for the structure-works overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureWorkSummary {
    pub id: i64,
    pub category: WorkCategory,
    pub component_type: String,
    pub component_count: usize,
}

/// One material row owned by a structure-work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: i64,
    /// Owning structure-work comp-id
    pub work_id: i64,
    pub material: String,
    pub grade: String,
    pub quantity: f64,
    pub unit: String,
    pub rate: f64,
    pub rate_data_source: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Quantity and rate of one component row, input to the initial-cost sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub material: String,
    pub grade: String,
    pub quantity: f64,
    pub unit: String,
    pub rate: f64,
}

impl MaterialUsage {
    /// quantity × rate
    pub fn cost(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// Component quantities summed per (material, grade, unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialGradeUnit {
    /// "Material (Grade)", or just the material when gradeless
    pub label: String,
    pub unit: String,
    pub total_quantity: f64,
    pub material: String,
    pub grade: String,
}

impl MaterialGradeUnit {
    pub(crate) fn label_for(material: &str, grade: &str) -> String {
        if grade.is_empty() {
            material.to_string()
        } else {
            format!("{} ({})", material, grade)
        }
    }

    /// Seed a carbon-emission row from this aggregate.
    pub fn to_carbon_row(&self, emission_factor: f64, embodied_energy: f64) -> CarbonRow {
        CarbonRow {
            material: self.material.clone(),
            grade: self.grade.clone(),
            quantity: self.total_quantity,
            unit: self.unit.clone(),
            embodied_carbon_energy: embodied_energy,
            carbon_emission_factor: emission_factor,
        }
    }
}

/// A persisted financial-parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: i64,
    pub parameters: FinancialRow,
    pub created_at: String,
}

/// Carbon-emission entry keyed by (material, grade, unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonEmissionRecord {
    pub material: String,
    pub grade: String,
    pub quantity: f64,
    pub unit: String,
    /// kg CO2e per unit
    pub emission_factor: f64,
    /// MJ/kg
    pub embodied_energy: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of a batch insert that never raises.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// All rows written
    Saved(usize),
    /// Nothing written; the batch was rolled back
    RolledBack(crate::errors::LccaError),
}

impl BatchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, BatchOutcome::Saved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(
            MaterialGradeUnit::label_for("Reinforced Cement Concrete", "M25"),
            "Reinforced Cement Concrete (M25)"
        );
        assert_eq!(MaterialGradeUnit::label_for("Gravel", ""), "Gravel");
    }

    #[test]
    fn test_seed_carbon_row() {
        let agg = MaterialGradeUnit {
            label: "Steel Rebar (Fe500)".to_string(),
            unit: "MT".to_string(),
            total_quantity: 42.0,
            material: "Steel Rebar".to_string(),
            grade: "Fe500".to_string(),
        };
        let row = agg.to_carbon_row(1.9, 20.1);
        assert_eq!(row.quantity, 42.0);
        assert_eq!(row.carbon_emission_factor, 1.9);
        assert!(row.validate().is_ok());
    }
}
