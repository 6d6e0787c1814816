//! End-to-end run of the life-cycle pipeline against an in-memory store.

use lcca_core::catalog::{RoadType, WorkCategory};
use lcca_core::calculations::discount_factor;
use lcca_core::{
    AnalysisConfig, AnalysisSession, CarbonRow, ComponentRow, DemolitionRow, FinancialRow, MaintenanceRow,
    PipelineInputs, Store, TrafficRow,
};

fn pile() -> ComponentRow {
    ComponentRow {
        component: "Pile".to_string(),
        material: "Reinforced Cement Concrete".to_string(),
        grade: "M25".to_string(),
        quantity: 100.0,
        unit: "cum".to_string(),
        rate: 6000.0,
        rate_data_source: Some("SOR".to_string()),
    }
}

fn inputs() -> PipelineInputs {
    PipelineInputs {
        traffic: TrafficRow::from_fields(&[
            "Two Lane Roads", "3", "3000", "10", "Rural Road", "Minor Injury",
            "1000", "200", "150", "100", "50",
        ])
        .unwrap(),
        maintenance: MaintenanceRow::default(),
        demolition: DemolitionRow::default(),
    }
}

#[test]
fn single_concrete_pile_scenario() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_structure_work_group(WorkCategory::Foundation, &[vec![pile()]])
        .unwrap();

    // Carbon rows are seeded from the stored material totals
    let totals = store.list_unique_material_grade_unit().unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].label, "Reinforced Cement Concrete (M25)");
    let carbon: Vec<CarbonRow> = totals.iter().map(|t| t.to_carbon_row(0.15, 0.0)).collect();
    assert!(store.record_carbon_emissions(&carbon).is_saved());

    let financial = FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "2"]).unwrap();
    let session = AnalysisSession::new(AnalysisConfig::default(), financial).unwrap();
    let report = session.run(&store, &inputs()).unwrap();

    assert!((report.initial_construction_cost - 600_000.0).abs() < 1e-9);
    assert!((report.carbon_emission_cost - 254_925.0 * 0.15 * 6.3936).abs() < 1e-6);
    assert!((report.time_cost - 600_000.0 * 0.10 * 0.5 * 2.0).abs() < 1e-9);

    // Two lanes, Good roughness, Rolling terrain; 2 years x 3 km exposure
    let per_km = 1000.0 * 15.50 + 200.0 * 45.80 + 150.0 * 78.90 + 100.0 * 56.70 + 50.0 * 38.40;
    assert!((report.road_user_cost - per_km * 6.0).abs() < 1e-6);

    let rerouting = 1500.0 * 3.0 * 0.1213 * 6.3936;
    assert!((report.rerouting_carbon_cost - rerouting).abs() < 1e-9);

    let inspection: f64 = (1..=50).map(|t| 6_000.0 * discount_factor(0.0425, t as f64)).sum();
    assert!((report.routine_inspection_cost - inspection).abs() < 1e-6);

    let repair = 60_000.0 * discount_factor(0.0425, 30.0);
    assert!((report.repair_and_rehabilitation_cost - repair).abs() < 1e-6);

    let demolition = 60_000.0 * discount_factor(0.0425, 50.0);
    assert!((report.demolition_cost - demolition).abs() < 1e-6);

    assert_eq!(report.recycling_credit, 0.0);

    let second_cycle = report.initial_construction_cost
        + report.demolition_cost
        + report.carbon_emission_cost
        + report.time_cost
        + report.road_user_cost
        + report.rerouting_carbon_cost;
    let reconstruction = second_cycle * discount_factor(0.0425, 50.0);
    assert!((report.reconstruction_cost - reconstruction).abs() < 1e-6);

    let summed: f64 = report.line_items().iter().map(|(_, v)| v).sum();
    assert!((report.total() - (summed - 2.0 * report.recycling_credit)).abs() < 1e-6);

    // Step 3 records the session's financial parameters
    let stored = store.latest_financial_parameters().unwrap().unwrap();
    assert_eq!(stored.parameters.time_of_project, 2);
}

#[test]
fn deleted_work_no_longer_costs_anything() {
    let mut store = Store::open_in_memory().unwrap();
    let ids = store
        .submit_structure_work_group(WorkCategory::Foundation, &[vec![pile()], vec![pile()]])
        .unwrap();
    store.delete_structure_work(ids[0]).unwrap();

    let financial = FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "2"]).unwrap();
    let session = AnalysisSession::new(AnalysisConfig::default(), financial).unwrap();
    assert!((session.initial_cost(&store).unwrap() - 600_000.0).abs() < 1e-9);
}

#[test]
fn unknown_traffic_categories_do_not_fail_the_run() {
    let store = Store::open_in_memory().unwrap();
    let financial = FinancialRow::from_fields(&["4.25", "10", "0.5", "50", "2"]).unwrap();
    let session = AnalysisSession::new(AnalysisConfig::default(), financial).unwrap();

    let mut inputs = inputs();
    inputs.traffic.lanes = "Footpath".to_string();
    inputs.traffic.road_type = RoadType::Urban;

    let report = session.run(&store, &inputs).unwrap();
    assert_eq!(report.road_user_cost, 0.0);
    assert!(report.rerouting_carbon_cost > 0.0);
}
