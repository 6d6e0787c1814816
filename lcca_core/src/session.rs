//! # Life-Cycle Cost Orchestrator
//!
//! An [`AnalysisSession`] owns the parameters of one analysis run (a single
//! financial parameter set, the economic configuration and the carbon
//! price) and sequences the cost components in a fixed order:
//!
//! | Step | Figure                         | Depends on                  |
//! |------|--------------------------------|-----------------------------|
//! | 1    | initial construction cost      | material rows               |
//! | 2    | carbon emission cost           | carbon records, price       |
//! | 3    | time cost (records financials) | 1                           |
//! | 4    | road user cost                 | traffic, construction time  |
//! | 5    | re-routing carbon cost         | traffic, price              |
//! | 6    | periodic maintenance           | 1, maintenance row          |
//! | 7    | maintenance carbon             | carbon records, maintenance |
//! | 8    | routine inspection             | 1                           |
//! | 9    | repair and rehabilitation      | 1                           |
//! | 10   | demolition                     | 1, demolition row           |
//! | 11   | recycling credit               | demolition row              |
//! | 12   | reconstruction                 | 1, 2, 3, 4, 5, 10           |
//!
//! Each step reads the store fresh. Steps are public so a caller can drive
//! them one at a time; [`AnalysisSession::run`] executes all twelve.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::config::AnalysisConfig;
//! use lcca_core::rows::FinancialRow;
//! use lcca_core::session::AnalysisSession;
//! use lcca_core::store::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! let financial = FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "2"]).unwrap();
//! let session = AnalysisSession::new(AnalysisConfig::default(), financial).unwrap();
//!
//! assert_eq!(session.initial_cost(&store).unwrap(), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculations::{self, AdditionalCarbonInput, CarbonItem, MaintenanceCarbonInput};
use crate::calculations::{ReconstructionInput, RecyclingInput, RoadUserCostInput, TimeCostInput};
use crate::config::AnalysisConfig;
use crate::errors::LccaResult;
use crate::report::LifeCycleReport;
use crate::rows::{DemolitionRow, FinancialRow, MaintenanceRow, TrafficRow};
use crate::store::Store;

/// Per-run inputs that are not read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineInputs {
    pub traffic: TrafficRow,
    #[serde(default)]
    pub maintenance: MaintenanceRow,
    #[serde(default)]
    pub demolition: DemolitionRow,
}

impl PipelineInputs {
    pub fn validate(&self) -> LccaResult<()> {
        self.traffic.validate()?;
        self.maintenance.validate()?;
        self.demolition.validate()
    }
}

/// One life-cycle analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    id: Uuid,
    config: AnalysisConfig,
    financial: FinancialRow,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig, financial: FinancialRow) -> LccaResult<Self> {
        config.validate()?;
        financial.validate()?;
        Ok(AnalysisSession {
            id: Uuid::new_v4(),
            config,
            financial,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn financial(&self) -> &FinancialRow {
        &self.financial
    }

    pub fn carbon_price(&self) -> f64 {
        self.config.carbon_price
    }

    fn construction_years(&self) -> f64 {
        self.financial.time_of_project as f64
    }

    fn carbon_items(store: &Store) -> LccaResult<Vec<CarbonItem>> {
        Ok(store.list_carbon_emissions()?.iter().map(CarbonItem::from).collect())
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    /// Step 1
    pub fn initial_cost(&self, store: &Store) -> LccaResult<f64> {
        let usages = store.list_all_material_usages()?;
        calculations::initial_construction_cost(&usages)
    }

    /// Step 2
    pub fn carbon_cost(&self, store: &Store) -> LccaResult<f64> {
        calculations::carbon_emission_cost(&Self::carbon_items(store)?, self.carbon_price())
    }

    /// Step 3. Records this session's financial parameters.
    pub fn time_cost(&self, store: &Store, initial_cost: f64) -> LccaResult<f64> {
        let record_id = store.record_financial_parameters(&self.financial)?;
        info!(session = %self.id, financial_id = record_id, "recorded financial parameters");

        calculations::time_cost(&TimeCostInput {
            construction_cost: initial_cost,
            interest_rate_percent: self.financial.interest_rate,
            investment_ratio: self.financial.investment_ratio,
            construction_years: self.construction_years(),
        })
    }

    /// Step 4
    pub fn road_user_cost(&self, traffic: &TrafficRow) -> LccaResult<f64> {
        let result = calculations::road_user::calculate(&RoadUserCostInput {
            traffic: traffic.clone(),
            construction_years: self.construction_years(),
        })?;
        Ok(result.total)
    }

    /// Step 5
    pub fn rerouting_carbon_cost(&self, traffic: &TrafficRow) -> LccaResult<f64> {
        calculations::additional_carbon_emission_cost(&AdditionalCarbonInput {
            total_vehicles: traffic.total_vehicles(),
            reroute_distance_km: traffic.reroute_distance_km,
            co2_per_vehicle_km: self.config.reroute_co2_per_vehicle_km,
            carbon_price: self.carbon_price(),
        })
    }

    /// Step 6
    pub fn maintenance_cost(&self, maintenance: &MaintenanceRow, initial_cost: f64) -> LccaResult<f64> {
        maintenance.validate()?;
        calculations::periodic_maintenance_cost(
            maintenance.periodic_maintenance_rate_percent,
            initial_cost,
            self.config.discount_rate,
            maintenance.maintenance_period_years,
            self.config.design_life_years,
        )
    }

    /// Step 7
    pub fn maintenance_carbon_cost(&self, store: &Store, maintenance: &MaintenanceRow) -> LccaResult<f64> {
        maintenance.validate()?;
        calculations::periodic_maintenance_carbon_cost(&MaintenanceCarbonInput {
            items: Self::carbon_items(store)?,
            carbon_price: self.carbon_price(),
            discount_rate: self.config.discount_rate,
            period_years: maintenance.maintenance_period_years,
            design_life_years: self.config.design_life_years,
        })
    }

    /// Step 8
    pub fn inspection_cost(&self, initial_cost: f64) -> LccaResult<f64> {
        calculations::routine_inspection_cost(
            self.config.inspection_rate_percent,
            initial_cost,
            self.config.discount_rate,
            self.config.inspection_period_years,
            self.config.design_life_years,
        )
    }

    /// Step 9
    pub fn repair_cost(&self, initial_cost: f64) -> LccaResult<f64> {
        calculations::repair_and_rehabilitation_cost(
            self.config.repair_rate_percent,
            initial_cost,
            self.config.discount_rate,
            self.config.repair_period_years,
            self.config.design_life_years,
        )
    }

    /// Step 10
    pub fn demolition_cost(&self, demolition: &DemolitionRow, initial_cost: f64) -> LccaResult<f64> {
        demolition.validate()?;
        calculations::demolition_cost(
            demolition.demolition_rate_percent,
            initial_cost,
            self.config.discount_rate,
            self.config.design_life_years,
        )
    }

    /// Step 11
    pub fn recycling_credit(&self, demolition: &DemolitionRow) -> LccaResult<f64> {
        calculations::recycling_credit(&RecyclingInput {
            scrap_value_per_mt: demolition.scrap_value_per_mt,
            steel_quantity_mt: demolition.steel_quantity_mt,
            scrap_rate: demolition.steel_scrap_percent / 100.0,
            discount_rate: self.config.discount_rate,
            design_life_years: self.config.design_life_years,
        })
    }

    /// Step 12
    pub fn reconstruction_cost(&self, first_cycle: &LifeCycleReport) -> LccaResult<f64> {
        calculations::reconstruction_cost(&ReconstructionInput {
            initial_construction_cost: first_cycle.initial_construction_cost,
            demolition_cost: first_cycle.demolition_cost,
            carbon_emission_cost: first_cycle.carbon_emission_cost,
            time_cost: first_cycle.time_cost,
            road_user_cost: first_cycle.road_user_cost,
            rerouting_carbon_cost: first_cycle.rerouting_carbon_cost,
            discount_rate: self.config.discount_rate,
            design_life_years: self.config.design_life_years,
            analysis_period_years: self.config.analysis_period_years,
        })
    }

    /// Run all twelve steps in order.
    pub fn run(&self, store: &Store, inputs: &PipelineInputs) -> LccaResult<LifeCycleReport> {
        inputs.validate()?;
        info!(session = %self.id, "starting life-cycle cost analysis");

        let initial = self.initial_cost(store)?;
        info!(step = 1, cost = initial, "initial construction cost");

        let carbon = self.carbon_cost(store)?;
        info!(step = 2, cost = carbon, carbon_price = self.carbon_price(), "carbon emission cost");

        let time = self.time_cost(store, initial)?;
        info!(step = 3, cost = time, "time cost");

        let road_user = self.road_user_cost(&inputs.traffic)?;
        info!(step = 4, cost = road_user, "road user cost");

        let rerouting = self.rerouting_carbon_cost(&inputs.traffic)?;
        info!(step = 5, cost = rerouting, "additional carbon emission cost");

        let maintenance = self.maintenance_cost(&inputs.maintenance, initial)?;
        info!(step = 6, cost = maintenance, "periodic maintenance cost");

        let maintenance_carbon = self.maintenance_carbon_cost(store, &inputs.maintenance)?;
        info!(step = 7, cost = maintenance_carbon, "periodic maintenance carbon cost");

        let inspection = self.inspection_cost(initial)?;
        info!(step = 8, cost = inspection, "routine inspection cost");

        let repair = self.repair_cost(initial)?;
        info!(step = 9, cost = repair, "repair and rehabilitation cost");

        let demolition = self.demolition_cost(&inputs.demolition, initial)?;
        info!(step = 10, cost = demolition, "demolition and disposal cost");

        let recycling = self.recycling_credit(&inputs.demolition)?;
        info!(step = 11, credit = recycling, "recycling credit");

        let mut report = LifeCycleReport {
            session_id: self.id,
            generated_at: chrono::Utc::now(),
            initial_construction_cost: initial,
            carbon_emission_cost: carbon,
            time_cost: time,
            road_user_cost: road_user,
            rerouting_carbon_cost: rerouting,
            periodic_maintenance_cost: maintenance,
            maintenance_carbon_cost: maintenance_carbon,
            routine_inspection_cost: inspection,
            repair_and_rehabilitation_cost: repair,
            demolition_cost: demolition,
            recycling_credit: recycling,
            reconstruction_cost: 0.0,
        };

        report.reconstruction_cost = self.reconstruction_cost(&report)?;
        info!(step = 12, cost = report.reconstruction_cost, "reconstruction cost");
        info!(session = %self.id, total = report.total(), "life-cycle cost analysis complete");

        Ok(report)
    }
}
