//! # Input Rows
//!
//! Typed records handed over by the input-collection layer. Forms deliver
//! text, so every row has a text constructor that parses and validates at
//! the boundary: a non-numeric quantity becomes a `NumericParse` error here
//! rather than a failure deep inside a cost formula.
//!
//! Keyed rows ([`ComponentRow`], [`CarbonRow`]) use the field names of the
//! input vocabulary (`component`, `type`, `grade`, `quantity`, `unit`,
//! `rate`, `rate_data_source`, `embodied_carbon_energy`,
//! `carbon_emission_factor`). Fixed-position rows ([`FinancialRow`],
//! [`TrafficRow`], [`MaintenanceRow`], [`DemolitionRow`]) are built from a
//! list of values in form order.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::rows::FinancialRow;
//!
//! let row = FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "2"]).unwrap();
//! assert_eq!(row.time_of_project, 2);
//!
//! // Wrong arity is rejected before anything is stored
//! assert!(FinancialRow::from_fields(&["4.25", "10", "0.5", "50"]).is_err());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, RoadType, VehicleClass};
use crate::errors::{LccaError, LccaResult};

// ============================================================================
// Parsing helpers
// ============================================================================

/// Parse a finite number from form text.
pub fn parse_number(field: &str, raw: &str) -> LccaResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| LccaError::numeric_parse(field, raw))?;
    if !value.is_finite() {
        return Err(LccaError::numeric_parse(field, raw));
    }
    Ok(value)
}

/// Parse a finite, non-negative number from form text.
pub fn parse_non_negative(field: &str, raw: &str) -> LccaResult<f64> {
    let value = parse_number(field, raw)?;
    ensure_non_negative(field, value)?;
    Ok(value)
}

/// Parse a whole number of years ("2" and "2.0" are both accepted).
pub fn parse_years(field: &str, raw: &str) -> LccaResult<u32> {
    let value = parse_non_negative(field, raw)?;
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(LccaError::invalid_input(field, raw, "Expected a whole number of years"));
    }
    Ok(value as u32)
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> LccaResult<()> {
    if !value.is_finite() {
        return Err(LccaError::invalid_input(field, value.to_string(), "Value must be finite"));
    }
    if value < 0.0 {
        return Err(LccaError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

fn check_arity<S: AsRef<str>>(row: &str, expected: usize, values: &[S]) -> LccaResult<()> {
    if values.len() != expected {
        return Err(LccaError::row_arity(row, expected, values.len()));
    }
    Ok(())
}

fn required<'a>(fields: &'a HashMap<String, String>, key: &str) -> LccaResult<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| LccaError::missing_field(key))
}

// ============================================================================
// Keyed rows
// ============================================================================

/// One material row of a structural component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    /// Component type the row belongs to (e.g., "Pile")
    pub component: String,
    /// Material name
    #[serde(rename = "type")]
    pub material: String,
    /// Grade, empty for gradeless materials
    #[serde(default)]
    pub grade: String,
    pub quantity: f64,
    pub unit: String,
    /// Currency per unit
    pub rate: f64,
    #[serde(default)]
    pub rate_data_source: Option<String>,
}

impl ComponentRow {
    /// Build from form text keyed by vocabulary names.
    pub fn from_text_fields(fields: &HashMap<String, String>) -> LccaResult<Self> {
        let row = ComponentRow {
            component: required(fields, "component")?.trim().to_string(),
            material: required(fields, "type")?.trim().to_string(),
            grade: fields.get("grade").map(|g| g.trim().to_string()).unwrap_or_default(),
            quantity: parse_non_negative("quantity", required(fields, "quantity")?)?,
            unit: required(fields, "unit")?.trim().to_string(),
            rate: parse_non_negative("rate", required(fields, "rate")?)?,
            rate_data_source: fields
                .get("rate_data_source")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };
        row.validate()?;
        Ok(row)
    }

    /// Check numeric ranges and the catalog combination.
    pub fn validate(&self) -> LccaResult<()> {
        if self.component.trim().is_empty() {
            return Err(LccaError::missing_field("component"));
        }
        ensure_non_negative("quantity", self.quantity)?;
        ensure_non_negative("rate", self.rate)?;
        catalog::validate_material(&self.material, &self.grade, &self.unit)
    }
}

/// One carbon-emission entry for a (material, grade, unit) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonRow {
    #[serde(rename = "type")]
    pub material: String,
    #[serde(default)]
    pub grade: String,
    pub quantity: f64,
    pub unit: String,
    /// MJ/kg
    #[serde(default)]
    pub embodied_carbon_energy: f64,
    /// kg CO2e per unit
    pub carbon_emission_factor: f64,
}

impl CarbonRow {
    /// Build from form text keyed by vocabulary names.
    pub fn from_text_fields(fields: &HashMap<String, String>) -> LccaResult<Self> {
        let embodied = match fields.get("embodied_carbon_energy").map(|s| s.trim()) {
            Some(s) if !s.is_empty() => parse_non_negative("embodied_carbon_energy", s)?,
            _ => 0.0,
        };
        let row = CarbonRow {
            material: required(fields, "type")?.trim().to_string(),
            grade: fields.get("grade").map(|g| g.trim().to_string()).unwrap_or_default(),
            quantity: parse_non_negative("quantity", required(fields, "quantity")?)?,
            unit: required(fields, "unit")?.trim().to_string(),
            embodied_carbon_energy: embodied,
            carbon_emission_factor: parse_non_negative(
                "carbon_emission_factor",
                required(fields, "carbon_emission_factor")?,
            )?,
        };
        row.validate()?;
        Ok(row)
    }

    pub fn validate(&self) -> LccaResult<()> {
        if self.material.trim().is_empty() {
            return Err(LccaError::missing_field("type"));
        }
        ensure_non_negative("quantity", self.quantity)?;
        ensure_non_negative("embodied_carbon_energy", self.embodied_carbon_energy)?;
        ensure_non_negative("carbon_emission_factor", self.carbon_emission_factor)?;
        crate::units::QuantityUnit::from_str_flexible(&self.unit)?;
        Ok(())
    }
}

// ============================================================================
// Fixed-position rows
// ============================================================================

/// `[realDiscountRate, interestRate, investmentRatio, durationOfStudy, timeOfProject]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialRow {
    /// Percent
    pub real_discount_rate: f64,
    /// Percent
    pub interest_rate: f64,
    pub investment_ratio: f64,
    /// Years
    pub duration_of_study: u32,
    /// Construction time of the base project, years
    pub time_of_project: u32,
}

impl FinancialRow {
    pub const ARITY: usize = 5;

    pub fn from_fields<S: AsRef<str>>(values: &[S]) -> LccaResult<Self> {
        check_arity("financial", Self::ARITY, values)?;
        let v = |i: usize| values[i].as_ref();
        let row = FinancialRow {
            real_discount_rate: parse_number("real_discount_rate", v(0))?,
            interest_rate: parse_non_negative("interest_rate", v(1))?,
            investment_ratio: parse_non_negative("investment_ratio", v(2))?,
            duration_of_study: parse_years("duration_of_study", v(3))?,
            time_of_project: parse_years("time_of_project", v(4))?,
        };
        row.validate()?;
        Ok(row)
    }

    pub fn validate(&self) -> LccaResult<()> {
        if !self.real_discount_rate.is_finite() || self.real_discount_rate <= -100.0 {
            return Err(LccaError::invalid_input(
                "real_discount_rate",
                self.real_discount_rate.to_string(),
                "Discount rate must be greater than -100%",
            ));
        }
        ensure_non_negative("interest_rate", self.interest_rate)?;
        ensure_non_negative("investment_ratio", self.investment_ratio)
    }
}

/// `[lanes, rerouteDistance, roughness, riseFall, roadType, annualIncrease,
/// carCount, busCount, hcvCount, mcvCount, lcvCount]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRow {
    /// Lane option or matrix category ("Two Lane Roads", "2")
    pub lanes: String,
    /// Additional re-route distance, km
    pub reroute_distance_km: f64,
    /// Roughness, mm/km or Good/Fair/Poor
    pub roughness: String,
    /// Rise and fall, m/km or Rolling/Hilly
    pub rise_fall: String,
    pub road_type: RoadType,
    pub annual_increase: String,
    pub car_count: f64,
    pub bus_count: f64,
    pub hcv_count: f64,
    pub mcv_count: f64,
    pub lcv_count: f64,
}

impl TrafficRow {
    pub const ARITY: usize = 11;

    pub fn from_fields<S: AsRef<str>>(values: &[S]) -> LccaResult<Self> {
        check_arity("traffic", Self::ARITY, values)?;
        let v = |i: usize| values[i].as_ref();
        let road_type = RoadType::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(v(4).trim()))
            .ok_or_else(|| LccaError::invalid_input("road_type", v(4), "Unknown road type"))?;
        Ok(TrafficRow {
            lanes: v(0).trim().to_string(),
            reroute_distance_km: parse_non_negative("reroute_distance", v(1))?,
            roughness: v(2).trim().to_string(),
            rise_fall: v(3).trim().to_string(),
            road_type,
            annual_increase: v(5).trim().to_string(),
            car_count: parse_non_negative("car_count", v(6))?,
            bus_count: parse_non_negative("bus_count", v(7))?,
            hcv_count: parse_non_negative("hcv_count", v(8))?,
            mcv_count: parse_non_negative("mcv_count", v(9))?,
            lcv_count: parse_non_negative("lcv_count", v(10))?,
        })
    }

    pub fn vehicle_count(&self, vehicle: VehicleClass) -> f64 {
        match vehicle {
            VehicleClass::Car => self.car_count,
            VehicleClass::Bus => self.bus_count,
            VehicleClass::Hcv => self.hcv_count,
            VehicleClass::Mcv => self.mcv_count,
            VehicleClass::Lcv => self.lcv_count,
        }
    }

    pub fn total_vehicles(&self) -> f64 {
        VehicleClass::ALL.iter().map(|v| self.vehicle_count(*v)).sum()
    }

    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("reroute_distance", self.reroute_distance_km)?;
        for vehicle in VehicleClass::ALL {
            ensure_non_negative(vehicle.code(), self.vehicle_count(vehicle))?;
        }
        Ok(())
    }
}

/// `[periodicMaintenanceRate%, inspectionRate%, repairRate%,
/// maintenancePeriodYears, inspectionFrequencyYears]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRow {
    pub periodic_maintenance_rate_percent: f64,
    pub inspection_rate_percent: f64,
    pub repair_rate_percent: f64,
    pub maintenance_period_years: f64,
    pub inspection_frequency_years: f64,
}

impl MaintenanceRow {
    pub const ARITY: usize = 5;

    pub fn from_fields<S: AsRef<str>>(values: &[S]) -> LccaResult<Self> {
        check_arity("maintenance", Self::ARITY, values)?;
        let v = |i: usize| values[i].as_ref();
        let row = MaintenanceRow {
            periodic_maintenance_rate_percent: parse_non_negative("periodic_maintenance_rate", v(0))?,
            inspection_rate_percent: parse_non_negative("inspection_rate", v(1))?,
            repair_rate_percent: parse_non_negative("repair_rate", v(2))?,
            maintenance_period_years: parse_non_negative("maintenance_period", v(3))?,
            inspection_frequency_years: parse_non_negative("inspection_frequency", v(4))?,
        };
        row.validate()?;
        Ok(row)
    }

    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("periodic_maintenance_rate", self.periodic_maintenance_rate_percent)?;
        if !(self.maintenance_period_years > 0.0) {
            return Err(LccaError::invalid_input(
                "maintenance_period",
                self.maintenance_period_years.to_string(),
                "Maintenance period must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for MaintenanceRow {
    fn default() -> Self {
        MaintenanceRow {
            periodic_maintenance_rate_percent: 0.555,
            inspection_rate_percent: 1.0,
            repair_rate_percent: 10.0,
            maintenance_period_years: 5.0,
            inspection_frequency_years: 1.0,
        }
    }
}

/// `[demolitionRate%, scrapValuePerMt, steelScrap%]`, optionally followed
/// by the structural-steel tonnage eligible for scrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemolitionRow {
    pub demolition_rate_percent: f64,
    /// Currency per MT
    pub scrap_value_per_mt: f64,
    pub steel_scrap_percent: f64,
    /// Tonnage of structural steel recovered as scrap
    #[serde(default)]
    pub steel_quantity_mt: f64,
}

impl DemolitionRow {
    pub const ARITY: usize = 3;

    pub fn from_fields<S: AsRef<str>>(values: &[S]) -> LccaResult<Self> {
        if values.len() != Self::ARITY && values.len() != Self::ARITY + 1 {
            return Err(LccaError::row_arity("demolition", Self::ARITY, values.len()));
        }
        let v = |i: usize| values[i].as_ref();
        let steel_quantity_mt = match values.get(3) {
            Some(raw) => parse_non_negative("steel_quantity_mt", raw.as_ref())?,
            None => 0.0,
        };
        Ok(DemolitionRow {
            demolition_rate_percent: parse_non_negative("demolition_rate", v(0))?,
            scrap_value_per_mt: parse_non_negative("scrap_value", v(1))?,
            steel_scrap_percent: parse_non_negative("steel_scrap", v(2))?,
            steel_quantity_mt,
        })
    }

    pub fn validate(&self) -> LccaResult<()> {
        ensure_non_negative("demolition_rate", self.demolition_rate_percent)?;
        ensure_non_negative("scrap_value", self.scrap_value_per_mt)?;
        ensure_non_negative("steel_scrap", self.steel_scrap_percent)?;
        ensure_non_negative("steel_quantity_mt", self.steel_quantity_mt)
    }
}

impl Default for DemolitionRow {
    fn default() -> Self {
        DemolitionRow {
            demolition_rate_percent: 10.0,
            scrap_value_per_mt: 50_000.0,
            steel_scrap_percent: 98.0,
            steel_quantity_mt: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_component_row_from_text() {
        let row = ComponentRow::from_text_fields(&fields(&[
            ("component", "Pile"),
            ("type", "Reinforced Cement Concrete"),
            ("grade", "M25"),
            ("quantity", " 100 "),
            ("unit", "cum"),
            ("rate", "6000"),
            ("rate_data_source", ""),
        ]))
        .unwrap();
        assert_eq!(row.quantity, 100.0);
        assert_eq!(row.rate, 6000.0);
        assert_eq!(row.rate_data_source, None);
    }

    #[test]
    fn test_component_row_rejects_text_quantity() {
        let err = ComponentRow::from_text_fields(&fields(&[
            ("component", "Pile"),
            ("type", "Steel Rebar"),
            ("grade", "Fe500"),
            ("quantity", "ten"),
            ("unit", "MT"),
            ("rate", "60000"),
        ]))
        .unwrap_err();
        assert_eq!(err.error_code(), "NUMERIC_PARSE");
        assert!(err.is_validation());
    }

    #[test]
    fn test_component_row_rejects_unknown_grade() {
        let err = ComponentRow::from_text_fields(&fields(&[
            ("component", "Pile"),
            ("type", "Steel Rebar"),
            ("grade", "Fe999"),
            ("quantity", "1"),
            ("unit", "MT"),
            ("rate", "60000"),
        ]))
        .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MATERIAL");
    }

    #[test]
    fn test_component_row_json_vocabulary() {
        let json = r#"{"component":"Girder","type":"Structural Steel","grade":"E250",
                       "quantity":12.5,"unit":"MT","rate":72000.0}"#;
        let row: ComponentRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.material, "Structural Steel");
        assert!(row.validate().is_ok());
    }

    #[test]
    fn test_carbon_row_missing_factor() {
        let err = CarbonRow::from_text_fields(&fields(&[
            ("type", "Steel Rebar"),
            ("grade", "Fe500"),
            ("quantity", "2"),
            ("unit", "MT"),
        ]))
        .unwrap_err();
        assert_eq!(err, LccaError::missing_field("carbon_emission_factor"));
    }

    #[test]
    fn test_financial_row_years() {
        let row = FinancialRow::from_fields(&["4.25", "10", "0.5", "50.0", "2"]).unwrap();
        assert_eq!(row.duration_of_study, 50);
        let err = FinancialRow::from_fields(&["4.25", "10", "0.5", "50 & 100", "2"]).unwrap_err();
        assert_eq!(err.error_code(), "NUMERIC_PARSE");
        assert!(FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "1.5"]).is_err());
    }

    #[test]
    fn test_traffic_row_parsing() {
        let row = TrafficRow::from_fields(&[
            "Two Lane Roads", "3.5", "3000", "10", "Rural Road", "Minor Injury",
            "1000", "200", "150", "100", "50",
        ])
        .unwrap();
        assert_eq!(row.road_type, RoadType::Rural);
        assert_eq!(row.total_vehicles(), 1500.0);
        assert_eq!(row.vehicle_count(VehicleClass::Hcv), 150.0);

        let short = TrafficRow::from_fields(&["2", "3.5"]).unwrap_err();
        assert_eq!(short, LccaError::row_arity("traffic", 11, 2));
    }

    #[test]
    fn test_maintenance_defaults_round_trip_fields() {
        let row = MaintenanceRow::from_fields(&["0.555", "1", "10", "5", "1"]).unwrap();
        assert_eq!(row, MaintenanceRow::default());
        assert!(MaintenanceRow::from_fields(&["0.555", "1", "10", "0", "1"]).is_err());
    }

    #[test]
    fn test_demolition_optional_steel_quantity() {
        let row = DemolitionRow::from_fields(&["10", "50000", "98"]).unwrap();
        assert_eq!(row.steel_quantity_mt, 0.0);
        let row = DemolitionRow::from_fields(&["10", "50000", "98", "12.5"]).unwrap();
        assert_eq!(row.steel_quantity_mt, 12.5);
        assert!(DemolitionRow::from_fields(&["10"]).is_err());
    }
}
