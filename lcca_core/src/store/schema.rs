//! Table definitions for the project database.

use rusqlite::Connection;

use crate::errors::LccaResult;

/// Current schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i32 = 1;

pub(crate) fn configure_connection(connection: &Connection) -> LccaResult<()> {
    // Cascading deletes depend on this; SQLite ships with it off.
    connection.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

pub(crate) fn ensure_schema(connection: &Connection) -> LccaResult<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS struct_works_data (
          comp_id INTEGER PRIMARY KEY AUTOINCREMENT,
          type TEXT NOT NULL CHECK(type IN (
            'Foundation',
            'Sub-Structure',
            'Super-Structure',
            'Miscellaneous'
          )),
          component_type TEXT NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS component (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          comp_id INTEGER NOT NULL,
          type_material TEXT NOT NULL,
          grade TEXT NOT NULL DEFAULT '',
          quantity REAL NOT NULL DEFAULT 0 CHECK(quantity >= 0),
          unit TEXT NOT NULL,
          rate REAL NOT NULL DEFAULT 0.0 CHECK(rate >= 0),
          rate_data_source TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY(comp_id) REFERENCES struct_works_data(comp_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS financial_data (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          real_discount_rate REAL NOT NULL,
          interest_rate REAL NOT NULL,
          investment_ratio REAL NOT NULL,
          duration_of_study INTEGER NOT NULL,
          time_of_project INTEGER NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS carbon_emission (
          type_material TEXT NOT NULL,
          grade TEXT NOT NULL DEFAULT '',
          quantity REAL NOT NULL DEFAULT 0 CHECK(quantity >= 0),
          unit TEXT NOT NULL,
          emission_factor REAL NOT NULL,
          embodied REAL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          PRIMARY KEY(type_material, grade, unit)
        );

        CREATE INDEX IF NOT EXISTS idx_component_comp_id ON component(comp_id);
        ",
    )?;

    connection.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
