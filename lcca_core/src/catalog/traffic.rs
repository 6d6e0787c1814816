//! Bridge and Traffic Options
//!
//! The option lists offered on the bridge-and-traffic input screen, and
//! the rules that map a raw selection onto an IRC matrix category.
//!
//! The form vocabulary ("Two Lane Roads", roughness in mm/km, rise and fall
//! in m/km) differs from the matrix keys ("2"/"4", Good/Fair/Poor,
//! Rolling/Hilly). Each resolver accepts either form and returns `None`
//! for anything it does not recognise; the caller treats that as a lookup
//! miss.

use serde::{Deserialize, Serialize};

use super::irc::{LaneCategory, RoughnessCategory, TerrainCategory};

pub const LANE_OPTIONS: [&str; 8] = [
    "Single Lane Roads",
    "Intermediate Lane Roads",
    "Two Lane Roads",
    "Four Lane Divided Roads",
    "Six Lane Divided Roads",
    "Four Lane Divided Expressways",
    "Six Lane Divided Expressways",
    "Eight Lane Divided Urban Expressways",
];

/// Road roughness bands (mm/km)
pub const ROUGHNESS_OPTIONS: [&str; 9] = [
    "2000", "3000", "4000", "5000", "6000", "7000", "8000", "9000", "10000",
];

/// Road rise and fall bands (m/km), 0 to 100 in steps of 5
pub fn rise_and_fall_options() -> Vec<String> {
    (0..=100).step_by(5).map(|v| v.to_string()).collect()
}

pub const TRAFFIC_INCREASE_OPTIONS: [&str; 3] = ["Minor Injury", "Major Injury", "Fatal"];

/// Upper roughness bound (mm/km) still rated Good
pub const GOOD_ROUGHNESS_MAX: f64 = 3000.0;
/// Upper roughness bound (mm/km) still rated Fair
pub const FAIR_ROUGHNESS_MAX: f64 = 5000.0;
/// Rise and fall (m/km) at or above which terrain is Hilly
pub const HILLY_RISE_FALL_MIN: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadType {
    #[serde(rename = "Urban Road")]
    Urban,
    #[serde(rename = "Rural Road")]
    Rural,
}

impl RoadType {
    pub const ALL: [RoadType; 2] = [RoadType::Urban, RoadType::Rural];

    pub fn label(&self) -> &'static str {
        match self {
            RoadType::Urban => "Urban Road",
            RoadType::Rural => "Rural Road",
        }
    }
}

/// Map a lane selection onto the matrix lane category.
pub fn resolve_lanes(raw: &str) -> Option<LaneCategory> {
    let s = raw.trim();
    match s {
        "2" | "Single Lane Roads" | "Intermediate Lane Roads" | "Two Lane Roads" => {
            Some(LaneCategory::Two)
        }
        "4" => Some(LaneCategory::Four),
        _ if LANE_OPTIONS.contains(&s) => Some(LaneCategory::Four),
        _ => None,
    }
}

/// Map a roughness selection (category name or mm/km) onto the matrix.
pub fn resolve_roughness(raw: &str) -> Option<RoughnessCategory> {
    let s = raw.trim();
    match s.to_lowercase().as_str() {
        "good" => return Some(RoughnessCategory::Good),
        "fair" => return Some(RoughnessCategory::Fair),
        "poor" => return Some(RoughnessCategory::Poor),
        _ => {}
    }
    let mm_per_km = s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)?;
    if mm_per_km <= GOOD_ROUGHNESS_MAX {
        Some(RoughnessCategory::Good)
    } else if mm_per_km <= FAIR_ROUGHNESS_MAX {
        Some(RoughnessCategory::Fair)
    } else {
        Some(RoughnessCategory::Poor)
    }
}

/// Map a rise-and-fall selection (category name or m/km) onto the matrix.
pub fn resolve_terrain(raw: &str) -> Option<TerrainCategory> {
    let s = raw.trim();
    match s.to_lowercase().as_str() {
        "rolling" => return Some(TerrainCategory::Rolling),
        "hilly" => return Some(TerrainCategory::Hilly),
        _ => {}
    }
    let m_per_km = s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)?;
    if m_per_km < HILLY_RISE_FALL_MIN {
        Some(TerrainCategory::Rolling)
    } else {
        Some(TerrainCategory::Hilly)
    }
}
