//! Construction Materials Catalog
//!
//! Allowed materials, grades and units for each structural component a
//! bridge is broken into. The four work categories mirror the input screens
//! (Foundation, Sub-Structure, Super-Structure, Miscellaneous).
//!
//! Gradeless materials (soils, rubber, PVC, ...) have an empty grade list and
//! accept only an empty grade string. Every material currently allows the
//! full unit set.

use serde::{Deserialize, Serialize};

use crate::errors::{LccaError, LccaResult};
use crate::units::QuantityUnit;

/// Work category a structure-work item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkCategory {
    #[serde(rename = "Foundation")]
    Foundation,
    #[serde(rename = "Sub-Structure")]
    SubStructure,
    #[serde(rename = "Super-Structure")]
    SuperStructure,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
}

impl WorkCategory {
    /// All categories in input-screen order
    pub const ALL: [WorkCategory; 4] = [
        WorkCategory::Foundation,
        WorkCategory::SubStructure,
        WorkCategory::SuperStructure,
        WorkCategory::Miscellaneous,
    ];

    /// Label as stored in the `type` column
    pub fn label(&self) -> &'static str {
        match self {
            WorkCategory::Foundation => "Foundation",
            WorkCategory::SubStructure => "Sub-Structure",
            WorkCategory::SuperStructure => "Super-Structure",
            WorkCategory::Miscellaneous => "Miscellaneous",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> LccaResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "foundation" => Ok(WorkCategory::Foundation),
            "sub-structure" | "substructure" => Ok(WorkCategory::SubStructure),
            "super-structure" | "superstructure" => Ok(WorkCategory::SuperStructure),
            "miscellaneous" | "auxiliary" => Ok(WorkCategory::Miscellaneous),
            _ => Err(LccaError::invalid_input("type", s, "Unknown work category")),
        }
    }

    /// Structural components that can be entered under this category
    pub fn components(&self) -> &'static [ComponentEntry] {
        match self {
            WorkCategory::Foundation => FOUNDATION,
            WorkCategory::SubStructure => SUB_STRUCTURE,
            WorkCategory::SuperStructure => SUPER_STRUCTURE,
            WorkCategory::Miscellaneous => MISCELLANEOUS,
        }
    }
}

impl std::fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A material and the grades it may be specified in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialEntry {
    pub name: &'static str,
    pub grades: &'static [&'static str],
}

impl MaterialEntry {
    /// True when `grade` is acceptable for this material
    pub fn accepts_grade(&self, grade: &str) -> bool {
        if self.grades.is_empty() {
            grade.trim().is_empty()
        } else {
            self.grades.contains(&grade.trim())
        }
    }

    /// Units this material may be measured in
    pub fn units(&self) -> &'static [QuantityUnit] {
        &QuantityUnit::ALL
    }

    /// True when `unit` is one of this material's units (exact code match)
    pub fn accepts_unit(&self, unit: &str) -> bool {
        self.units().iter().any(|u| u.code() == unit.trim())
    }
}

/// A structural component type (e.g., "Pile") and its allowed materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentEntry {
    pub name: &'static str,
    pub materials: &'static [MaterialEntry],
}

impl ComponentEntry {
    /// Look up one of this component's materials by name
    pub fn material(&self, name: &str) -> Option<&'static MaterialEntry> {
        self.materials.iter().find(|m| m.name == name.trim())
    }
}

const fn m(name: &'static str, grades: &'static [&'static str]) -> MaterialEntry {
    MaterialEntry { name, grades }
}

const NO_GRADES: &[&str] = &[];
const REBAR: &[&str] = &["Fe415", "Fe500", "Fe550"];
const STEEL: &[&str] = &["E250", "E350"];
const CONCRETE: &[&str] = &[
    "M10", "M15", "M20", "M25", "M30", "M35", "M40", "M45", "M50", "M55", "M60", "M65", "M70",
    "M75", "M80", "M85", "M90", "M95", "M100",
];
const PAINT_BASIC: &[&str] = &["Epoxy", "Oil Paint", "Primer"];
const PAINT: &[&str] = &["Epoxy", "Oil Paint", "Primer", "Anti-Corrosive Paint"];

const RCC: MaterialEntry = m("Reinforced Cement Concrete", CONCRETE);
const STEEL_REBAR: MaterialEntry = m("Steel Rebar", REBAR);
const STRUCTURAL_STEEL: MaterialEntry = m("Structural Steel", STEEL);

const FOUNDATION: &[ComponentEntry] = &[
    ComponentEntry {
        name: "Excavation",
        materials: &[
            m("Rock", NO_GRADES),
            m("Soft Rock", NO_GRADES),
            m("Medium Soil", NO_GRADES),
            m("Clay", NO_GRADES),
            m("Marshy Soil", NO_GRADES),
            m("Soft Murrum", NO_GRADES),
            m("Loam", NO_GRADES),
            m("Stiff Clay", NO_GRADES),
            m("Gravel", NO_GRADES),
            m("Hard Laterite", NO_GRADES),
            m("Marine Clay", NO_GRADES),
            m("Other", NO_GRADES),
        ],
    },
    ComponentEntry {
        name: "Pile",
        materials: &[STEEL_REBAR, RCC],
    },
    ComponentEntry {
        name: "Pile Cap",
        materials: &[STEEL_REBAR, RCC],
    },
];

const SUB_STRUCTURE: &[ComponentEntry] = &[
    ComponentEntry {
        name: "Pier",
        materials: &[STEEL_REBAR, RCC, m("Paint", PAINT_BASIC)],
    },
    ComponentEntry {
        name: "Pier Cap",
        materials: &[
            STEEL_REBAR,
            RCC,
            m("Paint", PAINT_BASIC),
            m("Steel Anchor Rods", STEEL),
        ],
    },
];

const SUPER_STRUCTURE: &[ComponentEntry] = &[
    ComponentEntry {
        name: "Girder",
        materials: &[
            STEEL_REBAR,
            RCC,
            m("Pre-stressed Cement Concrete", CONCRETE),
            m("Tendons", NO_GRADES),
            STRUCTURAL_STEEL,
            m("Shear Connectors", STEEL),
            m("Paint", PAINT),
        ],
    },
    ComponentEntry {
        name: "Deck Slab",
        materials: &[STEEL_REBAR, RCC],
    },
];

const MISCELLANEOUS: &[ComponentEntry] = &[
    ComponentEntry {
        name: "Bearings",
        materials: &[STRUCTURAL_STEEL, m("Rubber", NO_GRADES)],
    },
    ComponentEntry {
        name: "Railing & Crash Barrier",
        materials: &[RCC, STRUCTURAL_STEEL, STEEL_REBAR, m("Paint", PAINT)],
    },
    ComponentEntry {
        name: "Drainage",
        materials: &[m("PVC", NO_GRADES), RCC, STRUCTURAL_STEEL, m("FRP", NO_GRADES)],
    },
    ComponentEntry {
        name: "Asphalt & Utilities",
        materials: &[m("Asphalt", NO_GRADES), m("Paint", PAINT)],
    },
    ComponentEntry {
        name: "Waterproofing",
        materials: &[m("Waterproofing", NO_GRADES)],
    },
];

fn find_component(category: WorkCategory, component: &str) -> Option<&'static ComponentEntry> {
    category.components().iter().find(|c| c.name == component.trim())
}

/// Component type names offered under a category
pub fn component_types(category: WorkCategory) -> Vec<&'static str> {
    category.components().iter().map(|c| c.name).collect()
}

/// Material names allowed for a component (empty if the component is unknown)
pub fn materials(category: WorkCategory, component: &str) -> Vec<&'static str> {
    find_component(category, component)
        .map(|c| c.materials.iter().map(|mat| mat.name).collect())
        .unwrap_or_default()
}

/// Grades allowed for a material of a component
pub fn grades(category: WorkCategory, component: &str, material: &str) -> Option<&'static [&'static str]> {
    find_component(category, component)
        .and_then(|c| c.material(material))
        .map(|mat| mat.grades)
}

/// Units allowed for a material of a component
pub fn units(category: WorkCategory, component: &str, material: &str) -> Option<&'static [QuantityUnit]> {
    find_component(category, component)
        .and_then(|c| c.material(material))
        .map(|mat| mat.units())
}

/// Validate a full (category, component, material, grade, unit) selection.
pub fn validate_component(
    category: WorkCategory,
    component: &str,
    material: &str,
    grade: &str,
    unit: &str,
) -> LccaResult<()> {
    let entry = find_component(category, component).ok_or_else(|| {
        LccaError::invalid_input("component", component, format!("Not a {} component", category))
    })?;
    let mat = entry
        .material(material)
        .ok_or_else(|| LccaError::unknown_material(material, grade, unit))?;
    if !mat.accepts_grade(grade) || !mat.accepts_unit(unit) {
        return Err(LccaError::unknown_material(material, grade, unit));
    }
    Ok(())
}

/// Validate a (material, grade, unit) triple against every component in the
/// catalog. Used where the structural component is free text.
pub fn validate_material(material: &str, grade: &str, unit: &str) -> LccaResult<()> {
    let known = WorkCategory::ALL
        .iter()
        .flat_map(|cat| cat.components().iter())
        .flat_map(|c| c.materials.iter())
        .filter(|mat| mat.name == material.trim())
        .any(|mat| mat.accepts_grade(grade) && mat.accepts_unit(unit));

    if known {
        Ok(())
    } else {
        Err(LccaError::unknown_material(material, grade, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(WorkCategory::SubStructure.label(), "Sub-Structure");
        assert_eq!(
            WorkCategory::from_str_flexible("super structure").unwrap(),
            WorkCategory::SuperStructure
        );
        assert!(WorkCategory::from_str_flexible("Roof").is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&WorkCategory::SuperStructure).unwrap();
        assert_eq!(json, "\"Super-Structure\"");
    }

    #[test]
    fn test_component_types() {
        assert_eq!(
            component_types(WorkCategory::Foundation),
            vec!["Excavation", "Pile", "Pile Cap"]
        );
        assert_eq!(component_types(WorkCategory::Miscellaneous).len(), 5);
    }

    #[test]
    fn test_paint_grades_differ_by_component() {
        let pier = grades(WorkCategory::SubStructure, "Pier", "Paint").unwrap();
        let girder = grades(WorkCategory::SuperStructure, "Girder", "Paint").unwrap();
        assert!(!pier.contains(&"Anti-Corrosive Paint"));
        assert!(girder.contains(&"Anti-Corrosive Paint"));
    }

    #[test]
    fn test_validate_component() {
        assert!(validate_component(
            WorkCategory::Foundation,
            "Pile",
            "Reinforced Cement Concrete",
            "M25",
            "cum"
        )
        .is_ok());
        // Wrong grade family
        assert!(validate_component(WorkCategory::Foundation, "Pile", "Steel Rebar", "M25", "kg").is_err());
        // Material not used by this component
        assert!(validate_component(WorkCategory::Foundation, "Pile", "Rubber", "", "kg").is_err());
        // Unknown component
        assert!(validate_component(WorkCategory::Foundation, "Girder", "Steel Rebar", "Fe415", "kg").is_err());
    }

    #[test]
    fn test_gradeless_materials() {
        assert!(validate_material("Gravel", "", "cum").is_ok());
        assert!(validate_material("Gravel", "M25", "cum").is_err());
        assert_eq!(
            grades(WorkCategory::Foundation, "Excavation", "Clay").unwrap().len(),
            0
        );
    }

    #[test]
    fn test_unit_must_be_in_set() {
        assert!(validate_material("Structural Steel", "E250", "MT").is_ok());
        assert!(validate_material("Structural Steel", "E250", "bags").is_err());
        let u = units(WorkCategory::SuperStructure, "Girder", "Tendons").unwrap();
        assert_eq!(u.len(), 6);
    }
}
