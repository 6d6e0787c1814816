//! # Unit Types
//!
//! Quantity units used on the material rows, and their conversion to
//! kilograms for carbon accounting.
//!
//! The kilogram table is a domain approximation: a cubic metre is treated
//! as a fixed concrete-equivalent mass of 2549.25 kg, and linear, area and
//! volume-of-liquid units pass through at 1.0. Carbon figures depend on
//! these exact factors.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::units::{QuantityUnit, Kilograms};
//!
//! let unit = QuantityUnit::from_str_flexible("cum").unwrap();
//! let mass: Kilograms = unit.to_kg(100.0);
//! assert_eq!(mass.0, 254_925.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::errors::{LccaError, LccaResult};

// ============================================================================
// Mass
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl Add for Kilograms {
    type Output = Kilograms;
    fn add(self, rhs: Kilograms) -> Kilograms {
        Kilograms(self.0 + rhs.0)
    }
}

// ============================================================================
// Quantity Units
// ============================================================================

/// Unit attached to a material quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityUnit {
    /// Cubic metre
    #[serde(rename = "cum")]
    CubicMetre,
    /// Kilogram
    #[serde(rename = "kg")]
    Kilogram,
    /// Metric tonne
    #[serde(rename = "MT")]
    MetricTonne,
    /// Running metre
    #[serde(rename = "rmt")]
    RunningMetre,
    /// Square metre
    #[serde(rename = "sqm")]
    SquareMetre,
    /// Litre
    #[serde(rename = "ltr")]
    Litre,
}

impl QuantityUnit {
    /// All units, in the order the input forms offer them
    pub const ALL: [QuantityUnit; 6] = [
        QuantityUnit::CubicMetre,
        QuantityUnit::Kilogram,
        QuantityUnit::MetricTonne,
        QuantityUnit::RunningMetre,
        QuantityUnit::SquareMetre,
        QuantityUnit::Litre,
    ];

    /// Code as stored in the `unit` column (e.g., "cum", "MT")
    pub fn code(&self) -> &'static str {
        match self {
            QuantityUnit::CubicMetre => "cum",
            QuantityUnit::Kilogram => "kg",
            QuantityUnit::MetricTonne => "MT",
            QuantityUnit::RunningMetre => "rmt",
            QuantityUnit::SquareMetre => "sqm",
            QuantityUnit::Litre => "ltr",
        }
    }

    /// Parse a unit code, ignoring case and surrounding whitespace
    pub fn from_str_flexible(s: &str) -> LccaResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "cum" | "m3" => Ok(QuantityUnit::CubicMetre),
            "kg" => Ok(QuantityUnit::Kilogram),
            "mt" | "t" => Ok(QuantityUnit::MetricTonne),
            "rmt" => Ok(QuantityUnit::RunningMetre),
            "sqm" | "m2" => Ok(QuantityUnit::SquareMetre),
            "ltr" | "l" => Ok(QuantityUnit::Litre),
            _ => Err(LccaError::invalid_input("unit", s, "Unknown quantity unit")),
        }
    }

    /// Multiplier that converts one of this unit into kilograms
    pub fn kg_factor(&self) -> f64 {
        match self {
            QuantityUnit::CubicMetre => 2549.25,
            QuantityUnit::Kilogram => 1.0,
            QuantityUnit::MetricTonne => 1000.0,
            QuantityUnit::RunningMetre => 1.0,
            QuantityUnit::SquareMetre => 1.0,
            QuantityUnit::Litre => 1.0,
        }
    }

    /// Convert a quantity in this unit into kilograms
    pub fn to_kg(&self, quantity: f64) -> Kilograms {
        Kilograms(quantity * self.kg_factor())
    }
}

impl std::fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Convert a quantity with a free-text unit into kilograms.
pub fn quantity_to_kg(quantity: f64, unit: &str) -> LccaResult<Kilograms> {
    Ok(QuantityUnit::from_str_flexible(unit)?.to_kg(quantity))
}
