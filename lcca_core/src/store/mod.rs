//! # Project Data Store
//!
//! SQLite-backed storage for structure-work items and their material rows,
//! financial parameters, and carbon-emission entries.
//!
//! ## Structure
//!
//! ```text
//! struct_works_data (comp_id)
//! └── component (comp_id FK, ON DELETE CASCADE)
//! financial_data        (append-only)
//! carbon_emission       (PRIMARY KEY type_material, grade, unit)
//! ```
//!
//! A structure-work item and its material rows are always written in one
//! transaction, so an item can never be left without components. Re-edits
//! replace whole groups rather than patching fields.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::catalog::WorkCategory;
//! use lcca_core::rows::ComponentRow;
//! use lcca_core::store::Store;
//!
//! let mut store = Store::open_in_memory().unwrap();
//! let pile = ComponentRow {
//!     component: "Pile".to_string(),
//!     material: "Reinforced Cement Concrete".to_string(),
//!     grade: "M25".to_string(),
//!     quantity: 100.0,
//!     unit: "cum".to_string(),
//!     rate: 6000.0,
//!     rate_data_source: None,
//! };
//!
//! let ids = store
//!     .submit_structure_work_group(WorkCategory::Foundation, &[vec![pile]])
//!     .unwrap();
//! assert_eq!(store.list_components(ids[0]).unwrap().len(), 1);
//! ```

pub mod records;
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::catalog::WorkCategory;
use crate::errors::{LccaError, LccaResult};
use crate::rows::{CarbonRow, ComponentRow, FinancialRow};

pub use records::{
    BatchOutcome, CarbonEmissionRecord, ComponentRecord, FinancialRecord, MaterialGradeUnit,
    MaterialUsage, StructureWorkItem, StructureWorkSummary,
};

fn now_utc_string() -> String {
    Utc::now().to_rfc3339()
}

fn parse_category(raw: &str) -> LccaResult<WorkCategory> {
    WorkCategory::from_str_flexible(raw)
        .map_err(|_| LccaError::persistence("read struct_works_data", format!("bad type '{}'", raw)))
}

/// Handle to one project database.
pub struct Store {
    connection: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) the database at `path`.
    ///
    /// When `recreate` is true any existing file is deleted first, wiping
    /// all persisted state.
    pub fn open(path: &Path, recreate: bool) -> LccaResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LccaError::persistence(format!("create directory {}", parent.display()), e.to_string())
            })?;
        }

        if recreate && path.exists() {
            fs::remove_file(path).map_err(|e| {
                LccaError::persistence(format!("delete {}", path.display()), e.to_string())
            })?;
            info!(path = %path.display(), "deleted existing database");
        }

        let connection = Connection::open(path)?;
        schema::configure_connection(&connection)?;
        schema::ensure_schema(&connection)?;
        debug!(path = %path.display(), recreate, "opened project database");

        Ok(Store {
            connection,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> LccaResult<Self> {
        let connection = Connection::open_in_memory()?;
        schema::configure_connection(&connection)?;
        schema::ensure_schema(&connection)?;
        Ok(Store {
            connection,
            path: None,
        })
    }

    /// Database file path (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ------------------------------------------------------------------
    // Structure works
    // ------------------------------------------------------------------

    /// Insert a structure-work item and return its comp-id.
    pub fn create_structure_work(&self, category: WorkCategory, component_type: &str) -> LccaResult<i64> {
        insert_structure_work(&self.connection, category, component_type)
    }

    /// Insert one material row under `work_id`.
    pub fn add_component(&self, work_id: i64, row: &ComponentRow) -> LccaResult<i64> {
        row.validate()?;
        insert_component(&self.connection, work_id, row)
    }

    /// Create one structure-work item per group, each with all of its
    /// material rows.
    ///
    /// Each group is its own transaction: either the item and every row are
    /// written, or nothing for that group is. Rows are validated up front,
    /// so a validation error leaves the store untouched.
    pub fn submit_structure_work_group(
        &mut self,
        category: WorkCategory,
        groups: &[Vec<ComponentRow>],
    ) -> LccaResult<Vec<i64>> {
        validate_groups(groups)?;

        let mut created = Vec::with_capacity(groups.len());
        for group in groups {
            let tx = self.connection.transaction()?;
            let work_id = insert_group(&tx, category, group)?;
            tx.commit()?;
            created.push(work_id);
        }

        info!(category = %category, items = created.len(), "stored structure works");
        Ok(created)
    }

    /// Delete the items in `old_ids` (with their rows) and insert `groups`
    /// in their place, as a single transaction.
    pub fn replace_structure_work_group(
        &mut self,
        category: WorkCategory,
        groups: &[Vec<ComponentRow>],
        old_ids: &[i64],
    ) -> LccaResult<Vec<i64>> {
        validate_groups(groups)?;

        let tx = self.connection.transaction()?;
        for id in old_ids {
            tx.execute("DELETE FROM struct_works_data WHERE comp_id = ?1", [id])?;
        }
        let mut created = Vec::with_capacity(groups.len());
        for group in groups {
            created.push(insert_group(&tx, category, group)?);
        }
        tx.commit()?;

        info!(
            category = %category,
            replaced = old_ids.len(),
            items = created.len(),
            "replaced structure works"
        );
        Ok(created)
    }

    /// Delete a structure-work item; its material rows cascade.
    ///
    /// Returns false if no item had that id.
    pub fn delete_structure_work(&self, id: i64) -> LccaResult<bool> {
        let removed = self
            .connection
            .execute("DELETE FROM struct_works_data WHERE comp_id = ?1", [id])?;
        Ok(removed > 0)
    }

    /// Delete a single material row. Returns false if no row had that id.
    ///
    /// Removing the last row of a structure work removes the work too, in
    /// the same transaction.
    pub fn delete_component(&mut self, id: i64) -> LccaResult<bool> {
        let tx = self.connection.transaction()?;
        let work_id: Option<i64> = tx
            .query_row("SELECT comp_id FROM component WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        let Some(work_id) = work_id else {
            return Ok(false);
        };

        tx.execute("DELETE FROM component WHERE id = ?1", [id])?;
        let remaining: i64 = tx.query_row(
            "SELECT COUNT(*) FROM component WHERE comp_id = ?1",
            [work_id],
            |row| row.get(0),
        )?;
        if remaining == 0 {
            tx.execute("DELETE FROM struct_works_data WHERE comp_id = ?1", [work_id])?;
            debug!(comp_id = work_id, "removed structure work with its last material row");
        }
        tx.commit()?;
        Ok(true)
    }

    pub fn get_structure_work(&self, id: i64) -> LccaResult<Option<StructureWorkItem>> {
        let raw = self
            .connection
            .query_row(
                "
                SELECT comp_id, type, component_type, created_at, updated_at
                FROM struct_works_data
                WHERE comp_id = ?1
                ",
                [id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        raw.map(|(id, category, component_type, created_at, updated_at)| {
            Ok(StructureWorkItem {
                id,
                category: parse_category(&category)?,
                component_type,
                created_at,
                updated_at,
            })
        })
        .transpose()
    }

    /// Summary of every structure-work item, ordered by category then id.
    pub fn list_structure_work_summaries(&self) -> LccaResult<Vec<StructureWorkSummary>> {
        let mut statement = self.connection.prepare(
            "
            SELECT sw.comp_id, sw.type, sw.component_type, COUNT(c.id)
            FROM struct_works_data sw
            LEFT JOIN component c ON sw.comp_id = c.comp_id
            GROUP BY sw.comp_id
            ORDER BY sw.type, sw.comp_id
            ",
        )?;

        let mut rows = statement.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let category: String = row.get(1)?;
            out.push(StructureWorkSummary {
                id: row.get(0)?,
                category: parse_category(&category)?,
                component_type: row.get(2)?,
                component_count: row.get::<_, i64>(3)? as usize,
            });
        }
        Ok(out)
    }

    /// Material rows of one structure-work item, in insertion order.
    pub fn list_components(&self, work_id: i64) -> LccaResult<Vec<ComponentRecord>> {
        let mut statement = self.connection.prepare(
            "
            SELECT id, comp_id, type_material, grade, quantity, unit, rate,
                   rate_data_source, created_at, updated_at
            FROM component
            WHERE comp_id = ?1
            ORDER BY id
            ",
        )?;

        let records = statement
            .query_map([work_id], |row| {
                Ok(ComponentRecord {
                    id: row.get(0)?,
                    work_id: row.get(1)?,
                    material: row.get(2)?,
                    grade: row.get(3)?,
                    quantity: row.get(4)?,
                    unit: row.get(5)?,
                    rate: row.get(6)?,
                    rate_data_source: row.get(7)?,
                    created_at: row.get(8)?,
                    updated_at: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Quantity and rate of every material row across all items.
    pub fn list_all_material_usages(&self) -> LccaResult<Vec<MaterialUsage>> {
        let mut statement = self.connection.prepare(
            "
            SELECT type_material, grade, quantity, unit, rate
            FROM component
            ORDER BY type_material, grade, id
            ",
        )?;

        let usages = statement
            .query_map([], |row| {
                Ok(MaterialUsage {
                    material: row.get(0)?,
                    grade: row.get(1)?,
                    quantity: row.get(2)?,
                    unit: row.get(3)?,
                    rate: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(usages)
    }

    /// Material rows grouped by (material, grade, unit) with summed quantity.
    pub fn list_unique_material_grade_unit(&self) -> LccaResult<Vec<MaterialGradeUnit>> {
        let mut statement = self.connection.prepare(
            "
            SELECT type_material, grade, unit, SUM(quantity)
            FROM component
            GROUP BY type_material, grade, unit
            ORDER BY type_material, grade, unit
            ",
        )?;

        let groups = statement
            .query_map([], |row| {
                let material: String = row.get(0)?;
                let grade: String = row.get(1)?;
                Ok(MaterialGradeUnit {
                    label: MaterialGradeUnit::label_for(&material, &grade),
                    unit: row.get(2)?,
                    total_quantity: row.get(3)?,
                    material,
                    grade,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    // ------------------------------------------------------------------
    // Financial parameters
    // ------------------------------------------------------------------

    /// Append one financial-parameter row.
    pub fn record_financial_parameters(&self, parameters: &FinancialRow) -> LccaResult<i64> {
        parameters.validate()?;
        let now = now_utc_string();
        self.connection.execute(
            "
            INSERT INTO financial_data(
              real_discount_rate, interest_rate, investment_ratio,
              duration_of_study, time_of_project, created_at, updated_at
            )
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ",
            params![
                parameters.real_discount_rate,
                parameters.interest_rate,
                parameters.investment_ratio,
                parameters.duration_of_study,
                parameters.time_of_project,
                now,
            ],
        )?;
        Ok(self.connection.last_insert_rowid())
    }

    /// Append one financial-parameter row given as form text in
    /// `[realDiscountRate, interestRate, investmentRatio, durationOfStudy,
    /// timeOfProject]` order. Wrong arity is rejected without writing.
    pub fn record_financial_values<S: AsRef<str>>(&self, values: &[S]) -> LccaResult<i64> {
        let parameters = FinancialRow::from_fields(values)?;
        self.record_financial_parameters(&parameters)
    }

    /// Most recently inserted parameter set, for display and read-back.
    pub fn latest_financial_parameters(&self) -> LccaResult<Option<FinancialRecord>> {
        let record = self
            .connection
            .query_row(
                "
                SELECT id, real_discount_rate, interest_rate, investment_ratio,
                       duration_of_study, time_of_project, created_at
                FROM financial_data
                ORDER BY id DESC
                LIMIT 1
                ",
                [],
                |row| {
                    Ok(FinancialRecord {
                        id: row.get(0)?,
                        parameters: FinancialRow {
                            real_discount_rate: row.get(1)?,
                            interest_rate: row.get(2)?,
                            investment_ratio: row.get(3)?,
                            duration_of_study: row.get(4)?,
                            time_of_project: row.get(5)?,
                        },
                        created_at: row.get(6)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Carbon emissions
    // ------------------------------------------------------------------

    /// Write a batch of carbon-emission rows.
    ///
    /// Rows are keyed by (material, grade, unit); writing an existing key
    /// updates it. Any failure rolls the whole batch back and is reported
    /// through [`BatchOutcome::RolledBack`] instead of an `Err`.
    pub fn record_carbon_emissions(&mut self, rows: &[CarbonRow]) -> BatchOutcome {
        match self.write_carbon_batch(rows) {
            Ok(count) => {
                info!(records = count, "stored carbon emission data");
                BatchOutcome::Saved(count)
            }
            Err(err) => {
                warn!(error = %err, "carbon emission batch rolled back");
                BatchOutcome::RolledBack(err)
            }
        }
    }

    fn write_carbon_batch(&mut self, rows: &[CarbonRow]) -> LccaResult<usize> {
        for row in rows {
            row.validate()?;
        }

        let now = now_utc_string();
        // Dropping the transaction without commit rolls it back.
        let tx = self.connection.transaction()?;
        {
            let mut statement = tx.prepare(
                "
                INSERT INTO carbon_emission(
                  type_material, grade, quantity, unit, emission_factor, embodied,
                  created_at, updated_at
                )
                VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                ON CONFLICT(type_material, grade, unit) DO UPDATE SET
                  quantity=excluded.quantity,
                  emission_factor=excluded.emission_factor,
                  embodied=excluded.embodied,
                  updated_at=excluded.updated_at
                ",
            )?;
            for row in rows {
                statement.execute(params![
                    row.material,
                    row.grade,
                    row.quantity,
                    row.unit,
                    row.carbon_emission_factor,
                    row.embodied_carbon_energy,
                    now,
                ])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    /// Carbon-emission entries in insertion order. An upsert keeps the
    /// entry's original position.
    pub fn list_carbon_emissions(&self) -> LccaResult<Vec<CarbonEmissionRecord>> {
        let mut statement = self.connection.prepare(
            "
            SELECT type_material, grade, quantity, unit, emission_factor, embodied,
                   created_at, updated_at
            FROM carbon_emission
            ORDER BY rowid
            ",
        )?;

        let records = statement
            .query_map([], |row| {
                Ok(CarbonEmissionRecord {
                    material: row.get(0)?,
                    grade: row.get(1)?,
                    quantity: row.get(2)?,
                    unit: row.get(3)?,
                    emission_factor: row.get(4)?,
                    embodied_energy: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn validate_groups(groups: &[Vec<ComponentRow>]) -> LccaResult<()> {
    if groups.is_empty() {
        return Err(LccaError::invalid_input("rows", "[]", "At least one component group is required"));
    }
    for group in groups {
        if group.is_empty() {
            return Err(LccaError::invalid_input(
                "rows",
                "[]",
                "A structure work needs at least one material row",
            ));
        }
        for row in group {
            row.validate()?;
        }
    }
    Ok(())
}

fn insert_group(connection: &Connection, category: WorkCategory, group: &[ComponentRow]) -> LccaResult<i64> {
    let component_type = group
        .first()
        .map(|row| row.component.as_str())
        .unwrap_or("Unknown");
    let work_id = insert_structure_work(connection, category, component_type)?;
    for row in group {
        insert_component(connection, work_id, row)?;
    }
    Ok(work_id)
}

fn insert_structure_work(connection: &Connection, category: WorkCategory, component_type: &str) -> LccaResult<i64> {
    if component_type.trim().is_empty() {
        return Err(LccaError::missing_field("component_type"));
    }
    let now = now_utc_string();
    connection.execute(
        "
        INSERT INTO struct_works_data(type, component_type, created_at, updated_at)
        VALUES(?1, ?2, ?3, ?3)
        ",
        params![category.label(), component_type.trim(), now],
    )?;
    let id = connection.last_insert_rowid();
    debug!(comp_id = id, category = %category, component_type, "inserted structure work");
    Ok(id)
}

fn insert_component(connection: &Connection, work_id: i64, row: &ComponentRow) -> LccaResult<i64> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM struct_works_data WHERE comp_id = ?1",
            [work_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !exists {
        return Err(LccaError::not_found("structure work", work_id));
    }

    let now = now_utc_string();
    connection.execute(
        "
        INSERT INTO component(
          comp_id, type_material, grade, quantity, unit, rate, rate_data_source,
          created_at, updated_at
        )
        VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
        ",
        params![
            work_id,
            row.material,
            row.grade,
            row.quantity,
            row.unit,
            row.rate,
            row.rate_data_source,
            now,
        ],
    )?;
    Ok(connection.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(component: &str, material: &str, grade: &str, quantity: f64, unit: &str, rate: f64) -> ComponentRow {
        ComponentRow {
            component: component.to_string(),
            material: material.to_string(),
            grade: grade.to_string(),
            quantity,
            unit: unit.to_string(),
            rate,
            rate_data_source: Some("SOR 2024".to_string()),
        }
    }

    fn pile_group() -> Vec<ComponentRow> {
        vec![
            row("Pile", "Reinforced Cement Concrete", "M25", 100.0, "cum", 6000.0),
            row("Pile", "Steel Rebar", "Fe500", 12.0, "MT", 65000.0),
        ]
    }

    fn carbon(material: &str, grade: &str, quantity: f64, unit: &str, factor: f64) -> CarbonRow {
        CarbonRow {
            material: material.to_string(),
            grade: grade.to_string(),
            quantity,
            unit: unit.to_string(),
            embodied_carbon_energy: 1.0,
            carbon_emission_factor: factor,
        }
    }

    #[test]
    fn test_create_and_add_component() {
        let store = Store::open_in_memory().unwrap();
        let id = store.create_structure_work(WorkCategory::SuperStructure, "Girder").unwrap();
        store
            .add_component(id, &row("Girder", "Structural Steel", "E250", 20.0, "MT", 70000.0))
            .unwrap();

        let item = store.get_structure_work(id).unwrap().unwrap();
        assert_eq!(item.category, WorkCategory::SuperStructure);
        assert_eq!(item.component_type, "Girder");

        let components = store.list_components(id).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].work_id, id);
        assert_eq!(components[0].rate_data_source.as_deref(), Some("SOR 2024"));
    }

    #[test]
    fn test_add_component_to_missing_work() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .add_component(99, &row("Pile", "Steel Rebar", "Fe500", 1.0, "MT", 1.0))
            .unwrap_err();
        assert_eq!(err, LccaError::not_found("structure work", 99));
        assert!(err.is_validation());
    }

    #[test]
    fn test_submit_group_creates_items_with_components() {
        let mut store = Store::open_in_memory().unwrap();
        let ids = store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group(), pile_group()])
            .unwrap();
        assert_eq!(ids.len(), 2);

        let summaries = store.list_structure_work_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.component_count == 2));
        assert_eq!(summaries[0].component_type, "Pile");
    }

    #[test]
    fn test_invalid_row_leaves_store_untouched() {
        let mut store = Store::open_in_memory().unwrap();
        let mut group = pile_group();
        group.push(row("Pile", "Steel Rebar", "Fe999", 1.0, "MT", 1.0));

        let err = store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group(), group])
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MATERIAL");
        assert!(store.list_structure_work_summaries().unwrap().is_empty());
    }

    #[test]
    fn test_empty_group_rejected() {
        let mut store = Store::open_in_memory().unwrap();
        assert!(store
            .submit_structure_work_group(WorkCategory::Foundation, &[vec![]])
            .is_err());
        assert!(store.submit_structure_work_group(WorkCategory::Foundation, &[]).is_err());
    }

    #[test]
    fn test_delete_cascades() {
        let mut store = Store::open_in_memory().unwrap();
        let ids = store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group()])
            .unwrap();

        assert!(store.delete_structure_work(ids[0]).unwrap());
        assert!(store.list_components(ids[0]).unwrap().is_empty());
        assert!(store.list_structure_work_summaries().unwrap().is_empty());
        assert!(store.list_all_material_usages().unwrap().is_empty());
        assert!(!store.delete_structure_work(ids[0]).unwrap());
    }

    #[test]
    fn test_replace_group() {
        let mut store = Store::open_in_memory().unwrap();
        let old = store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group()])
            .unwrap();
        let replacement = vec![row("Pile Cap", "Reinforced Cement Concrete", "M30", 40.0, "cum", 6500.0)];

        let new = store
            .replace_structure_work_group(WorkCategory::Foundation, &[replacement], &old)
            .unwrap();
        assert_ne!(old, new);

        let summaries = store.list_structure_work_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, new[0]);
        assert_eq!(summaries[0].component_type, "Pile Cap");
        assert_eq!(summaries[0].component_count, 1);
    }

    #[test]
    fn test_summaries_ordered_by_category_then_id() {
        let mut store = Store::open_in_memory().unwrap();
        let girder = vec![row("Girder", "Structural Steel", "E250", 5.0, "MT", 70000.0)];
        store
            .submit_structure_work_group(WorkCategory::SuperStructure, &[girder])
            .unwrap();
        store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group()])
            .unwrap();

        let summaries = store.list_structure_work_summaries().unwrap();
        assert_eq!(summaries[0].category, WorkCategory::Foundation);
        assert_eq!(summaries[1].category, WorkCategory::SuperStructure);
    }

    #[test]
    fn test_delete_single_component() {
        let mut store = Store::open_in_memory().unwrap();
        let ids = store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group()])
            .unwrap();
        let components = store.list_components(ids[0]).unwrap();
        assert!(store.delete_component(components[0].id).unwrap());
        assert_eq!(store.list_components(ids[0]).unwrap().len(), 1);
        assert!(!store.delete_component(components[0].id).unwrap());
    }

    #[test]
    fn test_deleting_last_component_removes_work() {
        let mut store = Store::open_in_memory().unwrap();
        let ids = store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group(), pile_group()])
            .unwrap();

        for component in store.list_components(ids[0]).unwrap() {
            assert!(store.delete_component(component.id).unwrap());
        }

        assert!(store.get_structure_work(ids[0]).unwrap().is_none());
        let summaries = store.list_structure_work_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, ids[1]);
        assert!(summaries.iter().all(|s| s.component_count > 0));
    }

    #[test]
    fn test_unique_material_grade_unit_sums_duplicates() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group(), pile_group()])
            .unwrap();
        let deck = vec![row("Deck Slab", "Reinforced Cement Concrete", "M25", 30.0, "cum", 6000.0)];
        store
            .submit_structure_work_group(WorkCategory::SuperStructure, &[deck])
            .unwrap();

        let groups = store.list_unique_material_grade_unit().unwrap();
        assert_eq!(groups.len(), 2);
        let rcc = groups
            .iter()
            .find(|g| g.material == "Reinforced Cement Concrete")
            .unwrap();
        assert_eq!(rcc.label, "Reinforced Cement Concrete (M25)");
        assert!((rcc.total_quantity - 230.0).abs() < 1e-9);
        let steel = groups.iter().find(|g| g.material == "Steel Rebar").unwrap();
        assert!((steel.total_quantity - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_material_usages_keep_identical_rows() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .submit_structure_work_group(WorkCategory::Foundation, &[pile_group(), pile_group()])
            .unwrap();
        assert_eq!(store.list_all_material_usages().unwrap().len(), 4);
    }

    #[test]
    fn test_financial_arity_rejected() {
        let store = Store::open_in_memory().unwrap();
        let err = store.record_financial_values(&["4.25", "10", "0.5", "50"]).unwrap_err();
        assert_eq!(err.error_code(), "ROW_ARITY");
        assert!(store.latest_financial_parameters().unwrap().is_none());

        store.record_financial_values(&["4.25", "10", "0.5", "50", "2"]).unwrap();
        store.record_financial_values(&["5", "9", "0.4", "60", "3"]).unwrap();
        let latest = store.latest_financial_parameters().unwrap().unwrap();
        assert_eq!(latest.parameters.time_of_project, 3);
    }

    #[test]
    fn test_carbon_batch_upserts_by_key() {
        let mut store = Store::open_in_memory().unwrap();
        let outcome = store.record_carbon_emissions(&[
            carbon("Reinforced Cement Concrete", "M25", 100.0, "cum", 0.15),
            carbon("Steel Rebar", "Fe500", 12.0, "MT", 1.9),
        ]);
        assert_eq!(outcome, BatchOutcome::Saved(2));

        let outcome = store.record_carbon_emissions(&[carbon("Steel Rebar", "Fe500", 14.0, "MT", 2.1)]);
        assert!(outcome.is_saved());

        let records = store.list_carbon_emissions().unwrap();
        assert_eq!(records.len(), 2);
        let steel = records.iter().find(|r| r.material == "Steel Rebar").unwrap();
        assert_eq!(steel.quantity, 14.0);
        assert_eq!(steel.emission_factor, 2.1);
    }

    #[test]
    fn test_carbon_batch_rolls_back_on_failure() {
        let mut store = Store::open_in_memory().unwrap();
        let outcome = store.record_carbon_emissions(&[
            carbon("Reinforced Cement Concrete", "M25", 100.0, "cum", 0.15),
            carbon("Steel Rebar", "Fe500", -1.0, "MT", 1.9),
        ]);
        assert!(!outcome.is_saved());
        assert!(store.list_carbon_emissions().unwrap().is_empty());
    }

    #[test]
    fn test_carbon_batch_rolls_back_after_partial_write() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .connection
            .execute_batch(
                "
                CREATE TRIGGER reject_rebar BEFORE INSERT ON carbon_emission
                WHEN NEW.type_material = 'Steel Rebar'
                BEGIN
                  SELECT RAISE(ABORT, 'rebar rejected');
                END;
                ",
            )
            .unwrap();

        let outcome = store.record_carbon_emissions(&[
            carbon("Reinforced Cement Concrete", "M25", 100.0, "cum", 0.15),
            carbon("Steel Rebar", "Fe500", 12.0, "MT", 1.9),
        ]);
        match outcome {
            BatchOutcome::RolledBack(err) => assert!(err.is_recoverable()),
            BatchOutcome::Saved(n) => panic!("expected rollback, saved {}", n),
        }
        assert!(store.list_carbon_emissions().unwrap().is_empty());
    }

    #[test]
    fn test_carbon_records_keep_insertion_order() {
        let mut store = Store::open_in_memory().unwrap();
        store.record_carbon_emissions(&[carbon("Reinforced Cement Concrete", "M25", 100.0, "cum", 0.15)]);
        store.record_carbon_emissions(&[carbon("Pre-stressed Cement Concrete", "M40", 20.0, "cum", 0.40)]);
        // Updating the first entry leaves it first
        store.record_carbon_emissions(&[carbon("Reinforced Cement Concrete", "M25", 110.0, "cum", 0.15)]);

        let materials: Vec<String> = store
            .list_carbon_emissions()
            .unwrap()
            .into_iter()
            .map(|r| r.material)
            .collect();
        assert_eq!(materials, ["Reinforced Cement Concrete", "Pre-stressed Cement Concrete"]);
    }

    #[test]
    fn test_open_recreate_wipes_state() {
        let dir = std::env::temp_dir().join(format!("lcca-store-{}", uuid::Uuid::new_v4()));
        let path = dir.join("project.db");

        {
            let mut store = Store::open(&path, true).unwrap();
            store
                .submit_structure_work_group(WorkCategory::Foundation, &[pile_group()])
                .unwrap();
        }
        {
            let store = Store::open(&path, false).unwrap();
            assert_eq!(store.list_structure_work_summaries().unwrap().len(), 1);
        }
        {
            let store = Store::open(&path, true).unwrap();
            assert!(store.list_structure_work_summaries().unwrap().is_empty());
        }

        let _ = fs::remove_dir_all(&dir);
    }
}
