//! # Recurring Present-Value Costs
//!
//! Costs that occur as a fixed amount every `period` years over the design
//! life, discounted back to today:
//!
//! ```text
//! A  = rate% / 100 × base cost
//! PV = Σ_{k=1}^{floor(L/p)} A / (1 + r)^(k·p)
//! ```
//!
//! Periodic maintenance, routine inspection and repair/rehabilitation are all
//! this formula with different rates and periods. Demolition is the same
//! formula with `period = design life` (a single terminal occurrence).
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::calculations::recurring::{calculate, RecurringCostInput};
//!
//! let input = RecurringCostInput {
//!     rate_percent: 10.0,
//!     base_cost: 100_000.0,
//!     discount_rate: 0.0425,
//!     period_years: 10.0,
//!     design_life_years: 50.0,
//! };
//! let pv = calculate(&input).unwrap();
//! assert!(pv > 16_000.0 && pv < 17_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{LccaError, LccaResult};
use crate::rows::ensure_non_negative;

/// Discount factor `1 / (1 + r)^years`.
pub fn discount_factor(discount_rate: f64, years: f64) -> f64 {
    1.0 / (1.0 + discount_rate).powf(years)
}

/// Present value of `amount` paid every `period_years`, first at
/// `t = period_years`, last at or before `t = design_life_years`.
///
/// Returns 0 when the period is longer than the design life or not positive.
/// Evaluated as the geometric series `A·v·(1 - vⁿ) / (1 - v)` with
/// `v = (1 + r)^-p`, so the cost does not grow with the occurrence count.
pub fn present_value_recurring(amount: f64, discount_rate: f64, period_years: f64, design_life_years: f64) -> f64 {
    if !(period_years > 0.0) || !period_years.is_finite() || !design_life_years.is_finite() {
        return 0.0;
    }
    let occurrences = (design_life_years / period_years).floor();
    if occurrences < 1.0 {
        return 0.0;
    }
    let v = discount_factor(discount_rate, period_years);
    let ratio = 1.0 - v;
    if ratio.abs() < 1e-12 {
        return amount * occurrences;
    }
    amount * v * (1.0 - v.powf(occurrences)) / ratio
}

pub(crate) fn validate_discounting(discount_rate: f64, period_years: f64, design_life_years: f64) -> LccaResult<()> {
    if !discount_rate.is_finite() || discount_rate <= -1.0 {
        return Err(LccaError::invalid_input(
            "discount_rate",
            discount_rate.to_string(),
            "Discount rate must be greater than -100%",
        ));
    }
    if !(period_years > 0.0) || !period_years.is_finite() {
        return Err(LccaError::invalid_input(
            "period_years",
            period_years.to_string(),
            "Period must be positive",
        ));
    }
    if !(design_life_years > 0.0) || !design_life_years.is_finite() {
        return Err(LccaError::invalid_input(
            "design_life_years",
            design_life_years.to_string(),
            "Design life must be positive",
        ));
    }
    Ok(())
}

/// Inputs for one recurring cost.
///
/// ## JSON Example
///
/// ```json
/// {
///   "rate_percent": 0.555,
///   "base_cost": 600000.0,
///   "discount_rate": 0.0425,
///   "period_years": 5.0,
///   "design_life_years": 50.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurringCostInput {
    /// Share of the base cost spent per occurrence, in percent
    pub rate_percent: f64,

    /// Cost the rate applies to (usually the initial construction cost)
    pub base_cost: f64,

    /// Real discount rate as a fraction (0.0425 for 4.25%)
    pub discount_rate: f64,

    /// Years between occurrences
    pub period_years: f64,

    /// Horizon over which occurrences are counted
    pub design_life_years: f64,
}

impl RecurringCostInput {
    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("rate_percent", self.rate_percent)?;
        ensure_non_negative("base_cost", self.base_cost)?;
        validate_discounting(self.discount_rate, self.period_years, self.design_life_years)
    }

    /// Amount spent at each occurrence
    pub fn amount(&self) -> f64 {
        self.rate_percent / 100.0 * self.base_cost
    }

    /// Number of occurrences within the design life
    pub fn occurrences(&self) -> u32 {
        (self.design_life_years / self.period_years).floor() as u32
    }
}

/// Present value of a recurring cost.
pub fn calculate(input: &RecurringCostInput) -> LccaResult<f64> {
    input.validate()?;
    Ok(present_value_recurring(
        input.amount(),
        input.discount_rate,
        input.period_years,
        input.design_life_years,
    ))
}

/// Periodic maintenance: `rate%` of construction cost every maintenance period.
pub fn periodic_maintenance_cost(
    rate_percent: f64,
    construction_cost: f64,
    discount_rate: f64,
    period_years: f64,
    design_life_years: f64,
) -> LccaResult<f64> {
    calculate(&RecurringCostInput {
        rate_percent,
        base_cost: construction_cost,
        discount_rate,
        period_years,
        design_life_years,
    })
}

/// Routine inspection, normally annual.
pub fn routine_inspection_cost(
    rate_percent: f64,
    construction_cost: f64,
    discount_rate: f64,
    period_years: f64,
    design_life_years: f64,
) -> LccaResult<f64> {
    calculate(&RecurringCostInput {
        rate_percent,
        base_cost: construction_cost,
        discount_rate,
        period_years,
        design_life_years,
    })
}

/// Repair and rehabilitation, normally one multi-decade cycle.
pub fn repair_and_rehabilitation_cost(
    rate_percent: f64,
    construction_cost: f64,
    discount_rate: f64,
    period_years: f64,
    design_life_years: f64,
) -> LccaResult<f64> {
    calculate(&RecurringCostInput {
        rate_percent,
        base_cost: construction_cost,
        discount_rate,
        period_years,
        design_life_years,
    })
}
