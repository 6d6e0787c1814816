//! Material Cost Template
//!
//! Placeholder unit costs keyed by material → grade → unit. Every cost
//! starts at 0.0 and is filled in by the user before it can seed component
//! rates. Each [`MaterialCostTemplate::new`] call returns an independent
//! copy, so edits to one template never leak into another.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Units and per-grade costs for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMaterial {
    /// Units costs may be given in
    pub units: Vec<String>,
    /// grade → unit → cost
    pub grades: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TemplateMaterial {
    fn new(units: &[&str], grades: &[&str]) -> Self {
        let grades = grades
            .iter()
            .map(|g| {
                let costs = units.iter().map(|u| (u.to_string(), 0.0)).collect();
                (g.to_string(), costs)
            })
            .collect();
        TemplateMaterial {
            units: units.iter().map(|u| u.to_string()).collect(),
            grades,
        }
    }
}

/// Editable material → grade → unit → cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCostTemplate {
    materials: BTreeMap<String, TemplateMaterial>,
}

impl MaterialCostTemplate {
    /// Fresh template with all costs at zero.
    pub fn new() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert(
            "concrete".to_string(),
            TemplateMaterial::new(
                &["cum", "kg"],
                &["M15", "M20", "M25", "M30", "M35", "M40", "M45", "M50"],
            ),
        );
        materials.insert(
            "steel".to_string(),
            TemplateMaterial::new(
                &["MT", "kg"],
                &[
                    "E 165(Fe 290)",
                    "E 250(Fe 410W)A",
                    "E 250(Fe 410W)B",
                    "E 250(Fe 410)C",
                    "E 300(Fe 440)",
                    "E 350(Fe 490)",
                    "E 410(Fe 540)",
                    "E 450(Fe 570)D",
                ],
            ),
        );
        materials.insert(
            "mastic asphalt".to_string(),
            TemplateMaterial::new(&["sqm"], &["default"]),
        );
        materials.insert(
            "paint".to_string(),
            TemplateMaterial::new(&["ltr"], &["white/yellow", "primer_epoxy", "oil", "alluminium"]),
        );
        materials.insert(
            "paver blocks".to_string(),
            TemplateMaterial::new(&["sqm"], &["default"]),
        );
        MaterialCostTemplate { materials }
    }

    /// Material names
    pub fn materials(&self) -> Vec<&str> {
        self.materials.keys().map(String::as_str).collect()
    }

    /// Grades of a material (empty if unknown)
    pub fn grades(&self, material: &str) -> Vec<&str> {
        self.materials
            .get(material)
            .map(|m| m.grades.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Units of a material (empty if unknown)
    pub fn units(&self, material: &str) -> Vec<&str> {
        self.materials
            .get(material)
            .map(|m| m.units.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Cost for a combination, `None` if any key is unknown
    pub fn cost(&self, material: &str, grade: &str, unit: &str) -> Option<f64> {
        self.materials
            .get(material)?
            .grades
            .get(grade)?
            .get(unit)
            .copied()
    }

    /// Set a cost. Returns false (and changes nothing) on an unknown key.
    pub fn set_cost(&mut self, material: &str, grade: &str, unit: &str, cost: f64) -> bool {
        match self
            .materials
            .get_mut(material)
            .and_then(|m| m.grades.get_mut(grade))
            .and_then(|units| units.get_mut(unit))
        {
            Some(slot) => {
                *slot = cost;
                true
            }
            None => false,
        }
    }

    pub fn is_valid_material(&self, material: &str) -> bool {
        self.materials.contains_key(material)
    }

    pub fn is_valid_grade(&self, material: &str, grade: &str) -> bool {
        self.materials
            .get(material)
            .is_some_and(|m| m.grades.contains_key(grade))
    }

    pub fn is_valid_unit(&self, material: &str, unit: &str) -> bool {
        self.materials
            .get(material)
            .is_some_and(|m| m.units.iter().any(|u| u == unit))
    }

    /// Every (material, grade, unit) combination in the template
    pub fn combinations(&self) -> Vec<(String, String, String)> {
        let mut out = Vec::new();
        for (material, data) in &self.materials {
            for (grade, units) in &data.grades {
                for unit in units.keys() {
                    out.push((material.clone(), grade.clone(), unit.clone()));
                }
            }
        }
        out
    }
}

impl Default for MaterialCostTemplate {
    fn default() -> Self {
        MaterialCostTemplate::new()
    }
}
