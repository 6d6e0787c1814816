//! IRC Road User Cost Matrix
//!
//! Vehicle operating cost (INR per vehicle-km) keyed by vehicle class,
//! lane category, roughness category and terrain category.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::catalog::irc::{
//!     vehicle_operating_cost, LaneCategory, RoughnessCategory, TerrainCategory, VehicleClass,
//! };
//!
//! let cost = vehicle_operating_cost(
//!     VehicleClass::Car,
//!     LaneCategory::Two,
//!     RoughnessCategory::Good,
//!     TerrainCategory::Rolling,
//! );
//! assert_eq!(cost, Some(15.50));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Vehicle classes counted in the traffic composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    Car,
    Bus,
    /// Heavy commercial vehicle
    #[serde(rename = "HCV")]
    Hcv,
    /// Medium commercial vehicle
    #[serde(rename = "MCV")]
    Mcv,
    /// Light commercial vehicle
    #[serde(rename = "LCV")]
    Lcv,
}

impl VehicleClass {
    /// Classes in traffic-row order (car, bus, HCV, MCV, LCV)
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Car,
        VehicleClass::Bus,
        VehicleClass::Hcv,
        VehicleClass::Mcv,
        VehicleClass::Lcv,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VehicleClass::Car => "Car",
            VehicleClass::Bus => "Bus",
            VehicleClass::Hcv => "HCV",
            VehicleClass::Mcv => "MCV",
            VehicleClass::Lcv => "LCV",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneCategory {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "4")]
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoughnessCategory {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainCategory {
    Rolling,
    Hilly,
}

type MatrixKey = (VehicleClass, LaneCategory, RoughnessCategory, TerrainCategory);

use LaneCategory::{Four, Two};
use RoughnessCategory::{Fair, Good, Poor};
use TerrainCategory::{Hilly, Rolling};

/// Per-class cost grid in (lanes, roughness, terrain) order:
/// 2/Good/Rolling, 2/Good/Hilly, 2/Fair/Rolling, ... 4/Poor/Hilly
const GRID_ORDER: [(LaneCategory, RoughnessCategory, TerrainCategory); 12] = [
    (Two, Good, Rolling),
    (Two, Good, Hilly),
    (Two, Fair, Rolling),
    (Two, Fair, Hilly),
    (Two, Poor, Rolling),
    (Two, Poor, Hilly),
    (Four, Good, Rolling),
    (Four, Good, Hilly),
    (Four, Fair, Rolling),
    (Four, Fair, Hilly),
    (Four, Poor, Rolling),
    (Four, Poor, Hilly),
];

const COSTS: [(VehicleClass, [f64; 12]); 5] = [
    (
        VehicleClass::Car,
        [15.50, 18.20, 17.80, 20.90, 22.40, 26.10, 14.20, 16.80, 16.50, 19.40, 21.10, 24.70],
    ),
    (
        VehicleClass::Bus,
        [45.80, 52.30, 48.90, 55.80, 56.20, 64.10, 42.50, 48.70, 45.60, 52.10, 53.80, 61.40],
    ),
    (
        VehicleClass::Hcv,
        [78.90, 89.20, 84.50, 95.60, 96.80, 109.50, 75.40, 85.30, 81.20, 91.80, 93.70, 106.00],
    ),
    (
        VehicleClass::Mcv,
        [56.70, 64.80, 61.20, 69.90, 70.50, 80.40, 54.30, 62.10, 58.80, 67.20, 68.20, 77.90],
    ),
    (
        VehicleClass::Lcv,
        [38.40, 44.10, 41.60, 47.70, 48.30, 55.40, 36.80, 42.30, 40.10, 46.00, 46.90, 53.80],
    ),
];

static IRC_MATRIX: Lazy<HashMap<MatrixKey, f64>> = Lazy::new(|| {
    let mut matrix = HashMap::with_capacity(60);
    for (vehicle, row) in COSTS {
        for ((lanes, roughness, terrain), cost) in GRID_ORDER.iter().zip(row) {
            matrix.insert((vehicle, *lanes, *roughness, *terrain), cost);
        }
    }
    matrix
});

/// Operating cost per vehicle-km, `None` if the tuple is not in the matrix.
pub fn vehicle_operating_cost(
    vehicle: VehicleClass,
    lanes: LaneCategory,
    roughness: RoughnessCategory,
    terrain: TerrainCategory,
) -> Option<f64> {
    IRC_MATRIX.get(&(vehicle, lanes, roughness, terrain)).copied()
}
