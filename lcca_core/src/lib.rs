//! # lcca_core - Bridge Life-Cycle Cost Engine
//!
//! `lcca_core` computes the life-cycle cost of a bridge: construction,
//! embodied carbon, financing, road-user disruption, maintenance,
//! inspection, repair, end-of-life and reconstruction, all brought to a
//! present value. Project data (structure works, material rows, financial
//! parameters, carbon records) lives in a SQLite store.
//!
//! ## Design Philosophy
//!
//! - **Pure calculators**: every cost component is a function of explicit inputs
//! - **Typed rows**: form text is parsed and validated at the boundary
//! - **Atomic writes**: a structure work and its material rows commit together
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use lcca_core::{AnalysisConfig, AnalysisSession, FinancialRow, Store};
//!
//! let store = Store::open_in_memory().unwrap();
//! let financial = FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "2"]).unwrap();
//! let session = AnalysisSession::new(AnalysisConfig::default(), financial).unwrap();
//!
//! let initial = session.initial_cost(&store).unwrap();
//! assert_eq!(session.inspection_cost(initial).unwrap(), 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Materials, cost template, traffic options and the IRC matrix
//! - [`rows`] - Typed input rows
//! - [`store`] - SQLite project store
//! - [`calculations`] - Cost components
//! - [`session`] - The twelve-step pipeline
//! - [`report`] - Pipeline output
//! - [`config`] - Economic constants
//! - [`units`] - Quantity units and kilogram conversion
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod report;
pub mod rows;
pub mod session;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::AnalysisConfig;
pub use errors::{LccaError, LccaResult};
pub use report::LifeCycleReport;
pub use rows::{CarbonRow, ComponentRow, DemolitionRow, FinancialRow, MaintenanceRow, TrafficRow};
pub use session::{AnalysisSession, PipelineInputs};
pub use store::{BatchOutcome, Store};
