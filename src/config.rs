//! JSON design files.
//!
//! ```json
//! {
//!   "design": { "mass_grains": 150.0, "ogive": "Secant" },
//!   "environment": { "velocity_mps": 900.0, "twist_inches": 7.5 },
//!   "material": "Pure Copper"
//! }
//! ```
//!
//! Every block is optional and missing fields take their defaults. A named
//! material overrides the design's density.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli_api::Environment;
use crate::design::DesignParameters;
use crate::error::{DesignerError, DesignerResult};
use crate::materials::MaterialLookup;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignFile {
    pub design: Option<DesignParameters>,
    pub environment: Option<Environment>,
    /// Material name resolved to a density through a material table
    pub material: Option<String>,
}

impl DesignFile {
    pub fn from_json_str(json: &str) -> DesignerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> DesignerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> DesignerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn environment(&self) -> Environment {
        self.environment.clone().unwrap_or_default()
    }

    /// Design parameters with the material density applied.
    ///
    /// Unlike the engine's density fallback, a material name missing from
    /// `materials` is an error here since it can only come from a typo in
    /// the file.
    pub fn design_parameters<M: MaterialLookup + ?Sized>(
        &self,
        materials: &M,
    ) -> DesignerResult<DesignParameters> {
        let mut params = self.design.clone().unwrap_or_default();
        if let Some(name) = &self.material {
            let entry = materials
                .material(name)
                .ok_or_else(|| DesignerError::UnknownMaterial(name.clone()))?;
            params.density_g_cm3 = entry.density;
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{BaseFamily, OgiveFamily};
    use crate::materials::{default_materials, MaterialDatabase};

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = DesignFile::from_json_str("{}").unwrap();
        assert_eq!(file.environment(), Environment::default());
        let params = file.design_parameters(default_materials()).unwrap();
        assert_eq!(params, DesignParameters::default());
    }

    #[test]
    fn test_partial_blocks() {
        let file = DesignFile::from_json_str(
            r#"{
                "design": {"mass_grains": 150.0, "ogive": "Secant", "base": "Flat"},
                "environment": {"velocity_mps": 900.0}
            }"#,
        )
        .unwrap();

        let params = file.design_parameters(default_materials()).unwrap();
        assert_eq!(params.mass_grains, 150.0);
        assert_eq!(params.ogive, OgiveFamily::Secant);
        assert_eq!(params.base, BaseFamily::Flat);
        assert_eq!(params.groove_diameter_mm, 6.7);

        let env = file.environment();
        assert_eq!(env.velocity_mps, 900.0);
        assert_eq!(env.twist_inches, 8.0);
    }

    #[test]
    fn test_material_sets_density() {
        let file = DesignFile::from_json_str(r#"{"material": "Lead Core"}"#).unwrap();
        let params = file.design_parameters(default_materials()).unwrap();
        assert_eq!(params.density_g_cm3, 11.34);
    }

    #[test]
    fn test_material_from_custom_table() {
        let mut db = MaterialDatabase::new();
        db.add_custom("Tungsten", 19.3, [0.5, 0.5, 0.55], "Sintered tungsten");
        let file = DesignFile::from_json_str(r#"{"material": "Tungsten"}"#).unwrap();
        assert_eq!(file.design_parameters(&db).unwrap().density_g_cm3, 19.3);
        assert!(file.design_parameters(default_materials()).is_err());
    }

    #[test]
    fn test_unknown_material_is_error() {
        let file = DesignFile::from_json_str(r#"{"material": "Unobtainium"}"#).unwrap();
        match file.design_parameters(default_materials()) {
            Err(DesignerError::UnknownMaterial(name)) => assert_eq!(name, "Unobtainium"),
            other => panic!("expected unknown material, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            DesignFile::from_json_str("{\"design\": 3}"),
            Err(DesignerError::Json(_))
        ));
        assert!(DesignFile::from_json_str(r#"{"desing": {}}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = DesignFile::from_path(Path::new("/nonexistent/design.json"));
        assert!(matches!(result, Err(DesignerError::Io(_))));
    }

    #[test]
    fn test_serialized_file_reloads() {
        let file = DesignFile {
            design: Some(DesignParameters::default()),
            environment: Some(Environment::default()),
            material: Some("Pure Copper".to_string()),
        };
        let json = file.to_json_string().unwrap();
        assert_eq!(DesignFile::from_json_str(&json).unwrap(), file);
    }
}
