//! Life-cycle cost report: the twelve pipeline figures and their total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Figures produced by one [`crate::session::AnalysisSession`] run.
///
/// All amounts are present values in the project currency. The recycling
/// figure is a credit and is subtracted in [`LifeCycleReport::total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeCycleReport {
    pub session_id: Uuid,
    pub generated_at: DateTime<Utc>,

    pub initial_construction_cost: f64,
    pub carbon_emission_cost: f64,
    pub time_cost: f64,
    pub road_user_cost: f64,
    pub rerouting_carbon_cost: f64,
    pub periodic_maintenance_cost: f64,
    pub maintenance_carbon_cost: f64,
    pub routine_inspection_cost: f64,
    pub repair_and_rehabilitation_cost: f64,
    pub demolition_cost: f64,
    pub recycling_credit: f64,
    pub reconstruction_cost: f64,
}

impl LifeCycleReport {
    /// Labelled figures in pipeline order.
    pub fn line_items(&self) -> [(&'static str, f64); 12] {
        [
            ("Total Initial Construction Cost", self.initial_construction_cost),
            ("Total Initial Carbon Emission Cost", self.carbon_emission_cost),
            ("Time Cost", self.time_cost),
            ("Total Road User Cost", self.road_user_cost),
            ("Additional Carbon Emission Cost", self.rerouting_carbon_cost),
            ("Periodic Maintenance Cost", self.periodic_maintenance_cost),
            ("Periodic Maintenance Carbon Emission Cost", self.maintenance_carbon_cost),
            ("Total Routine Inspection Cost", self.routine_inspection_cost),
            ("Repair and Rehabilitation Cost", self.repair_and_rehabilitation_cost),
            ("Demolition and Disposal Cost", self.demolition_cost),
            ("Recycling Cost", self.recycling_credit),
            ("Reconstruction Cost", self.reconstruction_cost),
        ]
    }

    /// Life-cycle total, recycling counted as a credit.
    pub fn total(&self) -> f64 {
        self.initial_construction_cost
            + self.carbon_emission_cost
            + self.time_cost
            + self.road_user_cost
            + self.rerouting_carbon_cost
            + self.periodic_maintenance_cost
            + self.maintenance_carbon_cost
            + self.routine_inspection_cost
            + self.repair_and_rehabilitation_cost
            + self.demolition_cost
            - self.recycling_credit
            + self.reconstruction_cost
    }

    /// Serialize to pretty JSON, with the total included.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct WithTotal<'a> {
            #[serde(flatten)]
            report: &'a LifeCycleReport,
            total: f64,
        }
        serde_json::to_string_pretty(&WithTotal {
            report: self,
            total: self.total(),
        })
    }
}
