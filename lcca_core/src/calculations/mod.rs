//! # Cost Components
//!
//! One calculator per life-cycle cost category. Every calculator is a pure
//! function of explicit numeric inputs (no store access, no hidden state)
//! and returns a single currency amount, validating its inputs first.
//!
//! Two families:
//!
//! - **Direct** (undiscounted): [`construction`] initial and time cost,
//!   [`road_user`] cost, embodied and re-routing [`carbon`] cost.
//! - **Present value**: [`recurring`] maintenance, inspection and repair,
//!   maintenance carbon, and the [`end_of_life`] demolition, recycling and
//!   reconstruction figures.
//!
//! The [`crate::session::AnalysisSession`] wires these together in the
//! fixed pipeline order.

pub mod carbon;
pub mod construction;
pub mod end_of_life;
pub mod recurring;
pub mod road_user;

pub use carbon::{
    additional_carbon_emission_cost, carbon_emission_cost, periodic_maintenance_carbon_cost,
    AdditionalCarbonInput, CarbonItem, MaintenanceCarbonInput,
};
pub use construction::{initial_construction_cost, time_cost, TimeCostInput};
pub use end_of_life::{demolition_cost, reconstruction_cost, recycling_credit, ReconstructionInput, RecyclingInput};
pub use recurring::{
    discount_factor, periodic_maintenance_cost, present_value_recurring, repair_and_rehabilitation_cost,
    routine_inspection_cost, RecurringCostInput,
};
pub use road_user::{RoadUserCostInput, RoadUserCostResult, VehicleClassCost};
