//! # Reference Catalogs
//!
//! Static tables consulted by the store and the cost calculators. Nothing
//! here is persisted per project.
//!
//! - [`materials`] - Work categories and the allowed (material, grade, unit)
//!   combinations per structural component
//! - [`cost_template`] - Placeholder unit-cost template keyed by material,
//!   grade and unit
//! - [`traffic`] - Bridge-traffic form options and their mapping onto IRC
//!   matrix categories
//! - [`irc`] - IRC vehicle operating cost matrix
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::catalog::{self, WorkCategory};
//!
//! let pile = catalog::materials(WorkCategory::Foundation, "Pile");
//! assert!(pile.contains(&"Reinforced Cement Concrete"));
//!
//! assert!(catalog::validate_material("Steel Rebar", "Fe500", "MT").is_ok());
//! assert!(catalog::validate_material("Steel Rebar", "Fe999", "MT").is_err());
//! ```

pub mod cost_template;
pub mod irc;
pub mod materials;
pub mod traffic;

pub use cost_template::MaterialCostTemplate;
pub use irc::{vehicle_operating_cost, LaneCategory, RoughnessCategory, TerrainCategory, VehicleClass};
pub use materials::{
    component_types, grades, materials, units, validate_component, validate_material, ComponentEntry,
    MaterialEntry, WorkCategory,
};
pub use traffic::{resolve_lanes, resolve_roughness, resolve_terrain, RoadType};
