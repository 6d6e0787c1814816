//! # Carbon Costs
//!
//! Carbon is priced per kilogram of CO2e. Material quantities are first
//! normalized to kilograms with the unit table in [`crate::units`], then
//! multiplied by the material's emission factor and the carbon price.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::calculations::carbon::{carbon_emission_cost, CarbonItem};
//!
//! let items = [CarbonItem {
//!     material: "Reinforced Cement Concrete".to_string(),
//!     quantity: 100.0,
//!     unit: "cum".to_string(),
//!     emission_factor: 0.15,
//! }];
//! let cost = carbon_emission_cost(&items, 6.3936).unwrap();
//! assert!((cost - 254_925.0 * 0.15 * 6.3936).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::recurring::{present_value_recurring, validate_discounting};
use crate::errors::LccaResult;
use crate::rows::{ensure_non_negative, CarbonRow};
use crate::store::CarbonEmissionRecord;
use crate::units::{quantity_to_kg, Kilograms};

/// Suffix that marks a material as concrete for maintenance carbon
const CONCRETE_SUFFIX: &str = "concrete";

/// One material's quantity and emission factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonItem {
    pub material: String,
    pub quantity: f64,
    pub unit: String,
    /// kg CO2e per kg of material
    pub emission_factor: f64,
}

impl CarbonItem {
    pub fn mass(&self) -> LccaResult<Kilograms> {
        ensure_non_negative("quantity", self.quantity)?;
        quantity_to_kg(self.quantity, &self.unit)
    }

    /// Materials whose name ends in "concrete", any case
    pub fn is_concrete(&self) -> bool {
        let name = self.material.trim().to_lowercase();
        name.ends_with(CONCRETE_SUFFIX)
    }
}

impl From<&CarbonEmissionRecord> for CarbonItem {
    fn from(record: &CarbonEmissionRecord) -> Self {
        CarbonItem {
            material: record.material.clone(),
            quantity: record.quantity,
            unit: record.unit.clone(),
            emission_factor: record.emission_factor,
        }
    }
}

impl From<&CarbonRow> for CarbonItem {
    fn from(row: &CarbonRow) -> Self {
        CarbonItem {
            material: row.material.clone(),
            quantity: row.quantity,
            unit: row.unit.clone(),
            emission_factor: row.carbon_emission_factor,
        }
    }
}

fn validate_price(carbon_price: f64) -> LccaResult<()> {
    ensure_non_negative("carbon_price", carbon_price)
}

/// Embodied carbon cost `Σ kg × factor × price`.
///
/// Linear in `carbon_price`. An unknown unit is rejected rather than
/// silently contributing nothing.
pub fn carbon_emission_cost(items: &[CarbonItem], carbon_price: f64) -> LccaResult<f64> {
    validate_price(carbon_price)?;
    let mut total = 0.0;
    for item in items {
        ensure_non_negative("carbon_emission_factor", item.emission_factor)?;
        let kg = item.mass()?;
        total += kg.0 * item.emission_factor * carbon_price;
    }
    Ok(total)
}

/// Inputs for the extra emissions of traffic re-routed around the works.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCarbonInput {
    /// Vehicles of every class affected by the closure
    pub total_vehicles: f64,
    pub reroute_distance_km: f64,
    /// kg CO2e per vehicle-km
    pub co2_per_vehicle_km: f64,
    pub carbon_price: f64,
}

impl AdditionalCarbonInput {
    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("total_vehicles", self.total_vehicles)?;
        ensure_non_negative("reroute_distance", self.reroute_distance_km)?;
        ensure_non_negative("co2_per_vehicle_km", self.co2_per_vehicle_km)?;
        validate_price(self.carbon_price)
    }
}

/// vehicles × detour km × CO2 per vehicle-km × price
pub fn additional_carbon_emission_cost(input: &AdditionalCarbonInput) -> LccaResult<f64> {
    input.validate()?;
    Ok(input.total_vehicles * input.reroute_distance_km * input.co2_per_vehicle_km * input.carbon_price)
}

/// Inputs for the carbon cost of periodic concrete maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCarbonInput {
    pub items: Vec<CarbonItem>,
    pub carbon_price: f64,
    pub discount_rate: f64,
    pub period_years: f64,
    pub design_life_years: f64,
}

impl MaintenanceCarbonInput {
    pub fn validate(&self) -> LccaResult<()> {
        validate_price(self.carbon_price)?;
        validate_discounting(self.discount_rate, self.period_years, self.design_life_years)
    }

    /// Summed concrete mass and the emission factor of the last concrete
    /// item seen (0 when there is none).
    pub fn concrete_mass_and_factor(&self) -> LccaResult<(Kilograms, f64)> {
        let mut mass = Kilograms(0.0);
        let mut factor = 0.0;
        for item in self.items.iter().filter(|i| i.is_concrete()) {
            mass = mass + item.mass()?;
            factor = item.emission_factor;
        }
        Ok((mass, factor))
    }
}

/// Concrete-only maintenance carbon, recurring every maintenance period.
pub fn periodic_maintenance_carbon_cost(input: &MaintenanceCarbonInput) -> LccaResult<f64> {
    input.validate()?;
    let (mass, factor) = input.concrete_mass_and_factor()?;
    debug!(concrete_kg = mass.0, emission_factor = factor, "maintenance carbon basis");

    let amount = mass.0 * factor * input.carbon_price;
    Ok(present_value_recurring(
        amount,
        input.discount_rate,
        input.period_years,
        input.design_life_years,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::recurring::discount_factor;

    fn item(material: &str, quantity: f64, unit: &str, factor: f64) -> CarbonItem {
        CarbonItem {
            material: material.to_string(),
            quantity,
            unit: unit.to_string(),
            emission_factor: factor,
        }
    }

    #[test]
    fn test_unit_conversion_applied() {
        let cost = carbon_emission_cost(&[item("Steel Rebar", 2.0, "MT", 1.9)], 1.0).unwrap();
        assert!((cost - 3_800.0).abs() < 1e-9);

        let cost = carbon_emission_cost(&[item("Reinforced Cement Concrete", 100.0, "cum", 0.15)], 6.3936).unwrap();
        assert!((cost - 244_483.272).abs() < 1e-6);
    }

    #[test]
    fn test_linear_in_price() {
        let items = [
            item("Reinforced Cement Concrete", 100.0, "cum", 0.15),
            item("Steel Rebar", 12.0, "mt", 1.9),
            item("Paint", 40.0, "ltr", 2.5),
        ];
        let single = carbon_emission_cost(&items, 6.3936).unwrap();
        let double = carbon_emission_cost(&items, 2.0 * 6.3936).unwrap();
        assert!((double - 2.0 * single).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = carbon_emission_cost(&[item("Rock", 1.0, "bags", 1.0)], 1.0).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_additional_carbon() {
        let input = AdditionalCarbonInput {
            total_vehicles: 1500.0,
            reroute_distance_km: 3.5,
            co2_per_vehicle_km: 0.1213,
            carbon_price: 6.3936,
        };
        let expected = 1500.0 * 3.5 * 0.1213 * 6.3936;
        assert!((additional_carbon_emission_cost(&input).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_concrete_filter() {
        assert!(item("Reinforced Cement Concrete", 1.0, "cum", 0.1).is_concrete());
        assert!(item("Pre-stressed Cement CONCRETE", 1.0, "cum", 0.1).is_concrete());
        assert!(!item("Concrete Blocks", 1.0, "cum", 0.1).is_concrete());
        assert!(!item("Steel Rebar", 1.0, "MT", 0.1).is_concrete());
    }

    #[test]
    fn test_maintenance_carbon_uses_last_concrete_factor() {
        let input = MaintenanceCarbonInput {
            items: vec![
                item("Reinforced Cement Concrete", 10.0, "cum", 0.15),
                item("Steel Rebar", 5.0, "MT", 1.9),
                item("Pre-stressed Cement Concrete", 2.0, "cum", 0.2),
            ],
            carbon_price: 6.3936,
            discount_rate: 0.0425,
            period_years: 5.0,
            design_life_years: 50.0,
        };
        let (mass, factor) = input.concrete_mass_and_factor().unwrap();
        assert!((mass.0 - 12.0 * 2549.25).abs() < 1e-9);
        assert_eq!(factor, 0.2);

        let amount = 12.0 * 2549.25 * 0.2 * 6.3936;
        let expected: f64 = (1..=10).map(|k| amount * discount_factor(0.0425, 5.0 * k as f64)).sum();
        let pv = periodic_maintenance_carbon_cost(&input).unwrap();
        assert!((pv - expected).abs() < 1e-6);
    }

    #[test]
    fn test_maintenance_carbon_without_concrete() {
        let input = MaintenanceCarbonInput {
            items: vec![item("Steel Rebar", 5.0, "MT", 1.9)],
            carbon_price: 6.3936,
            discount_rate: 0.0425,
            period_years: 5.0,
            design_life_years: 50.0,
        };
        assert_eq!(periodic_maintenance_carbon_cost(&input).unwrap(), 0.0);
    }
}
