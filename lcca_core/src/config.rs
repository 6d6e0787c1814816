//! # Analysis Configuration
//!
//! Economic constants used by the life-cycle pipeline. Defaults reproduce
//! the standard assumptions (4.25% real discount rate, 50-year design life,
//! 75-year analysis period). A JSON file may override any subset:
//!
//! ```json
//! { "analysis_period_years": 100.0, "carbon_price": 7.5 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{LccaError, LccaResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Real discount rate as a fraction
    pub discount_rate: f64,
    pub design_life_years: f64,
    pub analysis_period_years: f64,
    /// Currency per kg CO2e
    pub carbon_price: f64,
    /// kg CO2e emitted per vehicle-km of detour
    pub reroute_co2_per_vehicle_km: f64,
    pub inspection_rate_percent: f64,
    pub inspection_period_years: f64,
    pub repair_rate_percent: f64,
    pub repair_period_years: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            discount_rate: 0.0425,
            design_life_years: 50.0,
            analysis_period_years: 75.0,
            carbon_price: 6.3936,
            reroute_co2_per_vehicle_km: 0.1213,
            inspection_rate_percent: 1.0,
            inspection_period_years: 1.0,
            repair_rate_percent: 10.0,
            repair_period_years: 30.0,
        }
    }
}

impl AnalysisConfig {
    /// Load from a JSON file; missing keys keep their defaults.
    pub fn load(path: &Path) -> LccaResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| LccaError::persistence(format!("read {}", path.display()), e.to_string()))?;
        let config: AnalysisConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LccaResult<()> {
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            return Err(LccaError::invalid_input(
                "discount_rate",
                self.discount_rate.to_string(),
                "Discount rate must be greater than -1",
            ));
        }
        for (field, value) in [
            ("design_life_years", self.design_life_years),
            ("inspection_period_years", self.inspection_period_years),
            ("repair_period_years", self.repair_period_years),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(LccaError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        for (field, value) in [
            ("analysis_period_years", self.analysis_period_years),
            ("carbon_price", self.carbon_price),
            ("reroute_co2_per_vehicle_km", self.reroute_co2_per_vehicle_km),
            ("inspection_rate_percent", self.inspection_rate_percent),
            ("repair_rate_percent", self.repair_rate_percent),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(LccaError::invalid_input(field, value.to_string(), "Cannot be negative"));
            }
        }
        Ok(())
    }

    /// Same configuration with a different carbon price
    pub fn with_carbon_price(self, carbon_price: f64) -> Self {
        AnalysisConfig { carbon_price, ..self }
    }
}
