//! # Road User Cost
//!
//! Extra vehicle operating cost borne by traffic diverted while the bridge
//! is under construction. Each vehicle class is priced from the IRC matrix
//! for the road's lane, roughness and terrain categories:
//!
//! ```text
//! cost_class = vehicles × cost_per_vehicle_km × (construction years × detour km)
//! ```
//!
//! A class whose categories cannot be resolved, or whose tuple is absent
//! from the matrix, contributes zero and is reported as a miss. It never
//! fails the calculation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{
    resolve_lanes, resolve_roughness, resolve_terrain, vehicle_operating_cost, LaneCategory,
    RoughnessCategory, TerrainCategory, VehicleClass,
};
use crate::errors::LccaResult;
use crate::rows::{ensure_non_negative, TrafficRow};

/// Inputs for the road user cost calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadUserCostInput {
    pub traffic: TrafficRow,
    /// Construction period, years
    pub construction_years: f64,
}

impl RoadUserCostInput {
    pub fn validate(&self) -> LccaResult<()> {
        self.traffic.validate()?;
        ensure_non_negative("construction_years", self.construction_years)
    }

    /// Matrix categories for the traffic row, `None` where unresolvable
    pub fn categories(&self) -> (Option<LaneCategory>, Option<RoughnessCategory>, Option<TerrainCategory>) {
        (
            resolve_lanes(&self.traffic.lanes),
            resolve_roughness(&self.traffic.roughness),
            resolve_terrain(&self.traffic.rise_fall),
        )
    }
}

/// Cost attributed to one vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClassCost {
    pub vehicle: VehicleClass,
    pub vehicles: f64,
    /// Matrix cost per vehicle-km, `None` on a lookup miss
    pub cost_per_vehicle_km: Option<f64>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadUserCostResult {
    pub by_class: Vec<VehicleClassCost>,
    pub total: f64,
}

impl RoadUserCostResult {
    /// Vehicle classes that contributed zero because of a lookup miss
    pub fn misses(&self) -> Vec<VehicleClass> {
        self.by_class
            .iter()
            .filter(|c| c.cost_per_vehicle_km.is_none())
            .map(|c| c.vehicle)
            .collect()
    }
}

/// Road user cost per vehicle class and in total.
pub fn calculate(input: &RoadUserCostInput) -> LccaResult<RoadUserCostResult> {
    input.validate()?;

    let (lanes, roughness, terrain) = input.categories();
    let exposure = input.construction_years * input.traffic.reroute_distance_km;

    let mut by_class = Vec::with_capacity(VehicleClass::ALL.len());
    let mut total = 0.0;
    for vehicle in VehicleClass::ALL {
        let vehicles = input.traffic.vehicle_count(vehicle);
        let rate = match (lanes, roughness, terrain) {
            (Some(l), Some(r), Some(t)) => vehicle_operating_cost(vehicle, l, r, t),
            _ => None,
        };

        let cost = match rate {
            Some(per_km) => vehicles * per_km * exposure,
            None => {
                warn!(
                    vehicle = %vehicle,
                    lanes = %input.traffic.lanes,
                    roughness = %input.traffic.roughness,
                    rise_fall = %input.traffic.rise_fall,
                    "no IRC cost for vehicle class, counting zero"
                );
                0.0
            }
        };

        total += cost;
        by_class.push(VehicleClassCost {
            vehicle,
            vehicles,
            cost_per_vehicle_km: rate,
            cost,
        });
    }

    Ok(RoadUserCostResult { by_class, total })
}
