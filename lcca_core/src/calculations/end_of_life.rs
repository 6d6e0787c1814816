//! # End-of-Life Costs
//!
//! Costs and credits that fall due when the design life ends: demolition
//! and disposal, the steel recycling credit, and (when the analysis period
//! outlasts the design life) a full reconstruction cycle. All three are
//! discounted to `t = design life`.

use serde::{Deserialize, Serialize};

use crate::calculations::recurring::{discount_factor, present_value_recurring, validate_discounting};
use crate::errors::LccaResult;
use crate::rows::ensure_non_negative;

/// Demolition: `rate%` of construction cost, once at the end of design life.
pub fn demolition_cost(
    rate_percent: f64,
    construction_cost: f64,
    discount_rate: f64,
    design_life_years: f64,
) -> LccaResult<f64> {
    ensure_non_negative("demolition_rate", rate_percent)?;
    ensure_non_negative("construction_cost", construction_cost)?;
    validate_discounting(discount_rate, design_life_years, design_life_years)?;

    let amount = rate_percent / 100.0 * construction_cost;
    Ok(present_value_recurring(amount, discount_rate, design_life_years, design_life_years))
}

/// Inputs for the steel scrap credit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "scrap_value_per_mt": 50000.0,
///   "steel_quantity_mt": 12.0,
///   "scrap_rate": 0.98,
///   "discount_rate": 0.0425,
///   "design_life_years": 50.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecyclingInput {
    /// Currency per MT of scrap
    pub scrap_value_per_mt: f64,
    /// Structural steel eligible for scrap, MT
    pub steel_quantity_mt: f64,
    /// Recovered fraction (0.98 for 98%)
    pub scrap_rate: f64,
    pub discount_rate: f64,
    pub design_life_years: f64,
}

impl RecyclingInput {
    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("scrap_value", self.scrap_value_per_mt)?;
        ensure_non_negative("steel_quantity_mt", self.steel_quantity_mt)?;
        ensure_non_negative("scrap_rate", self.scrap_rate)?;
        validate_discounting(self.discount_rate, self.design_life_years, self.design_life_years)
    }
}

/// Recycling credit (a positive number, subtracted from the total).
pub fn recycling_credit(input: &RecyclingInput) -> LccaResult<f64> {
    input.validate()?;
    let amount = input.scrap_value_per_mt * input.steel_quantity_mt * input.scrap_rate;
    Ok(amount * discount_factor(input.discount_rate, input.design_life_years))
}

/// First-cycle figures that are repeated when the bridge is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReconstructionInput {
    pub initial_construction_cost: f64,
    pub demolition_cost: f64,
    pub carbon_emission_cost: f64,
    pub time_cost: f64,
    pub road_user_cost: f64,
    pub rerouting_carbon_cost: f64,
    pub discount_rate: f64,
    pub design_life_years: f64,
    pub analysis_period_years: f64,
}

impl ReconstructionInput {
    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("initial_construction_cost", self.initial_construction_cost)?;
        ensure_non_negative("demolition_cost", self.demolition_cost)?;
        ensure_non_negative("carbon_emission_cost", self.carbon_emission_cost)?;
        ensure_non_negative("time_cost", self.time_cost)?;
        ensure_non_negative("road_user_cost", self.road_user_cost)?;
        ensure_non_negative("rerouting_carbon_cost", self.rerouting_carbon_cost)?;
        ensure_non_negative("analysis_period_years", self.analysis_period_years)?;
        validate_discounting(self.discount_rate, self.design_life_years, self.design_life_years)
    }

    /// True when the analysis horizon runs past the design life
    pub fn is_triggered(&self) -> bool {
        self.analysis_period_years > self.design_life_years
    }

    /// Undiscounted cost of the second cycle
    pub fn cycle_cost(&self) -> f64 {
        self.initial_construction_cost
            + self.demolition_cost
            + self.carbon_emission_cost
            + self.time_cost
            + self.road_user_cost
            + self.rerouting_carbon_cost
    }
}

/// Present value of rebuilding at the end of design life, or exactly 0
/// when the analysis period does not exceed it.
pub fn reconstruction_cost(input: &ReconstructionInput) -> LccaResult<f64> {
    input.validate()?;
    if !input.is_triggered() {
        return Ok(0.0);
    }
    Ok(input.cycle_cost() * discount_factor(input.discount_rate, input.design_life_years))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demolition_single_terminal_occurrence() {
        let pv = demolition_cost(10.0, 600_000.0, 0.0425, 50.0).unwrap();
        let expected = 60_000.0 / 1.0425_f64.powi(50);
        assert!((pv - expected).abs() < 1e-6);
        assert!((pv - 7_487.69).abs() < 0.01);
    }

    #[test]
    fn test_recycling_credit() {
        let input = RecyclingInput {
            scrap_value_per_mt: 50_000.0,
            steel_quantity_mt: 12.0,
            scrap_rate: 0.98,
            discount_rate: 0.0425,
            design_life_years: 50.0,
        };
        let expected = 50_000.0 * 12.0 * 0.98 / 1.0425_f64.powi(50);
        assert!((recycling_credit(&input).unwrap() - expected).abs() < 1e-6);

        let none = RecyclingInput {
            steel_quantity_mt: 0.0,
            ..input
        };
        assert_eq!(recycling_credit(&none).unwrap(), 0.0);
    }

    fn first_cycle(analysis_period_years: f64) -> ReconstructionInput {
        ReconstructionInput {
            initial_construction_cost: 600_000.0,
            demolition_cost: 7_487.69,
            carbon_emission_cost: 244_483.27,
            time_cost: 60_000.0,
            road_user_cost: 10_000.0,
            rerouting_carbon_cost: 500.0,
            discount_rate: 0.0425,
            design_life_years: 50.0,
            analysis_period_years,
        }
    }

    #[test]
    fn test_reconstruction_gate() {
        assert_eq!(reconstruction_cost(&first_cycle(50.0)).unwrap(), 0.0);
        assert_eq!(reconstruction_cost(&first_cycle(40.0)).unwrap(), 0.0);

        let input = first_cycle(75.0);
        let pv = reconstruction_cost(&input).unwrap();
        assert!(pv > 0.0);
        let expected = input.cycle_cost() / 1.0425_f64.powi(50);
        assert!((pv - expected).abs() < 1e-6);
    }
}
