//! # Construction-Phase Costs
//!
//! Undiscounted costs incurred while the bridge is being built: the initial
//! construction cost of every material row, and the time cost of capital
//! tied up for the construction period.

use serde::{Deserialize, Serialize};

use crate::errors::LccaResult;
use crate::rows::ensure_non_negative;
use crate::store::MaterialUsage;

/// Initial construction cost `Σ(quantity × rate)` over every material row.
pub fn initial_construction_cost(usages: &[MaterialUsage]) -> LccaResult<f64> {
    let mut total = 0.0;
    for usage in usages {
        ensure_non_negative("quantity", usage.quantity)?;
        ensure_non_negative("rate", usage.rate)?;
        total += usage.cost();
    }
    Ok(total)
}

/// Inputs for the financing cost during construction.
///
/// ## JSON Example
///
/// ```json
/// {
///   "construction_cost": 600000.0,
///   "interest_rate_percent": 10.0,
///   "investment_ratio": 0.5,
///   "construction_years": 2.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeCostInput {
    pub construction_cost: f64,

    /// Annual interest rate, percent
    pub interest_rate_percent: f64,

    /// Share of the construction cost financed (0.0 to 1.0 in practice)
    pub investment_ratio: f64,

    pub construction_years: f64,
}

impl TimeCostInput {
    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("construction_cost", self.construction_cost)?;
        ensure_non_negative("interest_rate", self.interest_rate_percent)?;
        ensure_non_negative("investment_ratio", self.investment_ratio)?;
        ensure_non_negative("construction_years", self.construction_years)
    }
}

/// Time cost = cost × interest% / 100 × investment ratio × construction years.
///
/// Not discounted; it is an opportunity cost of the construction period.
pub fn time_cost(input: &TimeCostInput) -> LccaResult<f64> {
    input.validate()?;
    Ok(input.construction_cost
        * (input.interest_rate_percent / 100.0)
        * input.investment_ratio
        * input.construction_years)
}
