//! Bullet material table.
//!
//! The process-wide default table is built once on first access and never
//! mutated. Callers wanting a different table build their own
//! [`MaterialDatabase`] (for example from JSON) and pass it wherever a
//! [`MaterialLookup`] is accepted.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COLOR_RGB, DEFAULT_DENSITY_G_CM3};
use crate::error::{DesignerError, DesignerResult};

fn default_density() -> f64 {
    DEFAULT_DENSITY_G_CM3
}

fn default_color() -> [f64; 3] {
    DEFAULT_COLOR_RGB
}

/// A single material definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    #[serde(default)]
    pub name: String,
    /// Density in g/cm³
    #[serde(default = "default_density")]
    pub density: f64,
    /// Display color, RGB in 0..1
    #[serde(default = "default_color")]
    pub color: [f64; 3],
    #[serde(default)]
    pub description: String,
}

/// Read contract used by the engine and its callers
pub trait MaterialLookup {
    fn material(&self, name: &str) -> Option<&MaterialEntry>;

    /// Density in g/cm³, falling back to gilding metal for unknown names
    fn lookup_density(&self, name: &str) -> f64 {
        self.material(name).map(|m| m.density).unwrap_or(DEFAULT_DENSITY_G_CM3)
    }

    /// Display color, falling back to a copper tone for unknown names
    fn lookup_color(&self, name: &str) -> [f64; 3] {
        self.material(name).map(|m| m.color).unwrap_or(DEFAULT_COLOR_RGB)
    }
}

#[derive(Debug, Deserialize)]
struct MaterialFile {
    #[serde(default)]
    materials: Vec<MaterialEntry>,
}

/// Named collection of materials, iterated in name order
#[derive(Debug, Clone, Default)]
pub struct MaterialDatabase {
    materials: BTreeMap<String, MaterialEntry>,
}

impl MaterialDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in material set
    pub fn builtin() -> Self {
        let mut db = Self::new();
        for (name, density, color, description) in [
            ("Gilding Metal (95/5)", 8.86, [0.80, 0.50, 0.20], "95% copper, 5% zinc"),
            ("Pure Copper", 8.96, [0.72, 0.45, 0.20], "Pure copper"),
            ("Cartridge Brass (70/30)", 8.53, [0.85, 0.70, 0.30], "70% copper, 30% zinc"),
            ("Lead Core", 11.34, [0.40, 0.40, 0.40], "Pure lead"),
        ] {
            db.add_custom(name, density, color, description);
        }
        db
    }

    /// Parse a `{"materials": [...]}` document.
    ///
    /// Entries without a name are skipped. A density that is not a positive
    /// finite number is a configuration error.
    pub fn from_json_str(json: &str) -> DesignerResult<Self> {
        let file: MaterialFile = serde_json::from_str(json)?;
        let mut db = Self::new();
        for entry in file.materials {
            if entry.name.is_empty() {
                continue;
            }
            if !(entry.density > 0.0) || !entry.density.is_finite() {
                return Err(DesignerError::Config(format!(
                    "material '{}' has invalid density {}",
                    entry.name, entry.density
                )));
            }
            db.materials.insert(entry.name.clone(), entry);
        }
        Ok(db)
    }

    pub fn from_path(path: &Path) -> DesignerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn add_custom(&mut self, name: &str, density: f64, color: [f64; 3], description: &str) {
        self.materials.insert(
            name.to_string(),
            MaterialEntry {
                name: name.to_string(),
                density,
                color,
                description: description.to_string(),
            },
        );
    }

    /// Material names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.materials.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &MaterialEntry> {
        self.materials.values()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

}

impl MaterialLookup for MaterialDatabase {
    fn material(&self, name: &str) -> Option<&MaterialEntry> {
        self.materials.get(name)
    }
}

static DEFAULT_MATERIALS: Lazy<MaterialDatabase> = Lazy::new(MaterialDatabase::builtin);

/// Process-wide read-only material table
pub fn default_materials() -> &'static MaterialDatabase {
    &DEFAULT_MATERIALS
}

/// Density of a named material from the default table
pub fn lookup_density(name: &str) -> f64 {
    DEFAULT_MATERIALS.lookup_density(name)
}

/// Color of a named material from the default table
pub fn lookup_color(name: &str) -> [f64; 3] {
    DEFAULT_MATERIALS.lookup_color(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(lookup_density("Pure Copper"), 8.96);
        assert_eq!(lookup_density("Lead Core"), 11.34);
        assert_eq!(lookup_color("Lead Core"), [0.40, 0.40, 0.40]);
    }

    #[test]
    fn test_unknown_material_falls_back() {
        assert_eq!(lookup_density("Unobtainium"), 8.86);
        assert_eq!(lookup_color("Unobtainium"), [0.80, 0.50, 0.20]);
    }

    #[test]
    fn test_names_are_sorted() {
        let names = default_materials().names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{"materials": [
            {"name": "Tungsten Alloy", "density": 17.5},
            {"name": "Mystery"},
            {"density": 3.0}
        ]}"#;
        let db = MaterialDatabase::from_json_str(json).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.lookup_density("Tungsten Alloy"), 17.5);
        let mystery = db.material("Mystery").unwrap();
        assert_eq!(mystery.density, 8.86);
        assert_eq!(mystery.color, [0.80, 0.50, 0.20]);
        assert!(mystery.description.is_empty());
    }

    #[test]
    fn test_add_custom_overrides() {
        let mut db = MaterialDatabase::builtin();
        db.add_custom("Pure Copper", 8.9, [0.7, 0.4, 0.2], "annealed");
        assert_eq!(db.lookup_density("Pure Copper"), 8.9);
        assert_eq!(db.len(), 4);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(MaterialDatabase::from_json_str("[1, 2").is_err());
    }

    #[test]
    fn test_non_positive_density_is_config_error() {
        let json = r#"{"materials": [{"name": "Foam", "density": 0.0}]}"#;
        let err = MaterialDatabase::from_json_str(json).unwrap_err();
        assert!(matches!(err, DesignerError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: material 'Foam' has invalid density 0");

        let negative = r#"{"materials": [{"name": "Air", "density": -1.2}]}"#;
        assert!(MaterialDatabase::from_json_str(negative).is_err());
    }
}
