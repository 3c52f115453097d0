//! Module type catalog and habitat context
//!
//! The catalog is static data: one [`ModuleTypeSpec`] per module type. It is
//! never mutated while the editor runs, but a config file may replace it at
//! startup. The habitat table only feeds the evaluation report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by catalog lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested module type has no catalog entry
    #[error("Unknown module type: {0}")]
    UnknownModuleType(String),

    /// The requested habitat name is not recognised
    #[error("Unknown habitat: {0}")]
    UnknownHabitat(String),

    /// Two catalog entries describe the same module type
    #[error("Duplicate catalog entry for module type {0}")]
    DuplicateModuleType(ModuleType),
}

/// Module type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    /// Habitation module
    Halo,
    /// Environmental control and life support
    Eclss,
    /// Power generation
    Power,
}

impl ModuleType {
    /// All built-in module types in catalog order
    pub const ALL: [Self; 3] = [Self::Halo, Self::Eclss, Self::Power];

    /// Lowercase identifier used in config files and by the UI layer
    pub const fn id(self) -> &'static str {
        match self {
            Self::Halo => "halo",
            Self::Eclss => "eclss",
            Self::Power => "power",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id().to_uppercase())
    }
}

impl FromStr for ModuleType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownModuleType(s.to_string()))
    }
}

/// Body shape of a module type; drives geometry and hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleShape {
    /// Upright cylinder, picked by radius in the XZ plane
    Cylinder,
    /// Axis-aligned box, picked by half-extents in X and Z
    Box,
}

/// Static description of one module type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTypeSpec {
    /// Type this entry describes
    pub module_type: ModuleType,
    /// Display name
    pub name: String,
    /// One-line description shown next to the name
    pub description: String,
    /// Body shape
    pub shape: ModuleShape,
    /// Base RGB color applied to the body mesh
    pub color: [f32; 3],
    /// Habitable volume contributed to the habitat, in cubic meters
    pub base_volume: u32,
    /// Crew berths contributed to the habitat
    pub base_capacity: u32,
    /// Number of docking ports generated on the module
    pub docking_ports: usize,
    /// Maximum number of connections the module accepts
    pub max_connections: usize,
}

/// The module type catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleCatalog {
    entries: Vec<ModuleTypeSpec>,
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                ModuleTypeSpec {
                    module_type: ModuleType::Halo,
                    name: "HALO".to_string(),
                    description: "Habitation module".to_string(),
                    shape: ModuleShape::Cylinder,
                    color: [0.2, 0.6, 1.0],
                    base_volume: 50,
                    base_capacity: 4,
                    docking_ports: 2,
                    max_connections: 4,
                },
                ModuleTypeSpec {
                    module_type: ModuleType::Eclss,
                    name: "ECLSS".to_string(),
                    description: "Life support system".to_string(),
                    shape: ModuleShape::Box,
                    color: [0.0, 0.8, 0.4],
                    base_volume: 30,
                    base_capacity: 0,
                    docking_ports: 3,
                    max_connections: 6,
                },
                ModuleTypeSpec {
                    module_type: ModuleType::Power,
                    name: "Power".to_string(),
                    description: "Power module".to_string(),
                    shape: ModuleShape::Box,
                    color: [1.0, 0.8, 0.0],
                    base_volume: 20,
                    base_capacity: 0,
                    docking_ports: 2,
                    max_connections: 4,
                },
            ],
        }
    }
}

impl ModuleCatalog {
    /// Build a catalog from explicit entries
    pub fn from_entries(entries: Vec<ModuleTypeSpec>) -> Result<Self, CatalogError> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Look up the spec for a module type
    pub fn spec(&self, module_type: ModuleType) -> Result<&ModuleTypeSpec, CatalogError> {
        self.entries
            .iter()
            .find(|spec| spec.module_type == module_type)
            .ok_or_else(|| CatalogError::UnknownModuleType(module_type.to_string()))
    }

    /// Whether the catalog has an entry for `module_type`
    pub fn contains(&self, module_type: ModuleType) -> bool {
        self.entries.iter().any(|spec| spec.module_type == module_type)
    }

    /// Iterate entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleTypeSpec> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject catalogs with more than one entry per module type
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (i, spec) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|other| other.module_type == spec.module_type) {
                return Err(CatalogError::DuplicateModuleType(spec.module_type));
            }
        }
        Ok(())
    }
}

/// Habitat environment choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Habitat {
    /// Low Earth orbit
    #[default]
    Leo,
    /// Lunar surface
    Luna,
    /// Martian surface
    Mars,
}

/// Environmental parameters of a habitat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitatSpec {
    /// Display name
    pub name: &'static str,
    /// Gravity relative to Earth
    pub gravity: f32,
    /// Relative radiation exposure, 0..1
    pub radiation: f32,
}

impl Habitat {
    /// All habitats in UI order
    pub const ALL: [Self; 3] = [Self::Leo, Self::Luna, Self::Mars];

    /// Environmental parameters for this habitat
    pub const fn spec(self) -> HabitatSpec {
        match self {
            Self::Leo => HabitatSpec { name: "LEO", gravity: 0.9, radiation: 0.3 },
            Self::Luna => HabitatSpec { name: "Luna", gravity: 0.16, radiation: 0.8 },
            Self::Mars => HabitatSpec { name: "Mars", gravity: 0.38, radiation: 0.5 },
        }
    }
}

impl FromStr for Habitat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.spec().name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownHabitat(s.to_string()))
    }
}

/// Habitat choice and crew size used by the evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitatContext {
    habitat: Habitat,
    crew_count: u32,
}

impl Default for HabitatContext {
    fn default() -> Self {
        Self::new(Habitat::Leo, 4)
    }
}

impl HabitatContext {
    /// Create a context; crew count is kept at one or more
    pub fn new(habitat: Habitat, crew_count: u32) -> Self {
        Self {
            habitat,
            crew_count: crew_count.max(1),
        }
    }

    /// Current habitat
    pub const fn habitat(&self) -> Habitat {
        self.habitat
    }

    /// Crew size driving the score denominators
    pub const fn crew_count(&self) -> u32 {
        self.crew_count
    }

    /// Change the habitat
    pub fn set_habitat(&mut self, habitat: Habitat) {
        self.habitat = habitat;
    }

    /// Change the crew size; zero is raised to one
    pub fn set_crew_count(&mut self, crew_count: u32) {
        self.crew_count = crew_count.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_matches_reference_table() {
        let catalog = ModuleCatalog::default();
        let halo = catalog.spec(ModuleType::Halo).unwrap();
        assert_eq!(halo.base_volume, 50);
        assert_eq!(halo.base_capacity, 4);
        assert_eq!(halo.docking_ports, 2);
        assert_eq!(halo.max_connections, 4);
        assert_eq!(halo.shape, ModuleShape::Cylinder);

        let eclss = catalog.spec(ModuleType::Eclss).unwrap();
        assert_eq!(eclss.docking_ports, 3);
        assert_eq!(eclss.max_connections, 6);
        assert_eq!(catalog.spec(ModuleType::Power).unwrap().base_volume, 20);
    }

    #[test]
    fn test_missing_entry_is_unknown_module_type() {
        let catalog = ModuleCatalog::from_entries(vec![ModuleCatalog::default()
            .spec(ModuleType::Halo)
            .unwrap()
            .clone()])
        .unwrap();

        assert!(catalog.contains(ModuleType::Halo));
        assert_eq!(
            catalog.spec(ModuleType::Power),
            Err(CatalogError::UnknownModuleType("POWER".to_string()))
        );
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let halo = ModuleCatalog::default().spec(ModuleType::Halo).unwrap().clone();
        let result = ModuleCatalog::from_entries(vec![halo.clone(), halo]);
        assert_eq!(result, Err(CatalogError::DuplicateModuleType(ModuleType::Halo)));
    }

    #[test]
    fn test_module_type_parsing() {
        assert_eq!("halo".parse::<ModuleType>(), Ok(ModuleType::Halo));
        assert_eq!(" ECLSS ".parse::<ModuleType>(), Ok(ModuleType::Eclss));
        assert!(matches!("greenhouse".parse::<ModuleType>(), Err(CatalogError::UnknownModuleType(_))));
    }

    #[test]
    fn test_habitat_lookup() {
        assert_eq!("luna".parse::<Habitat>(), Ok(Habitat::Luna));
        assert_eq!(Habitat::Mars.spec().gravity, 0.38);
        assert!("venus".parse::<Habitat>().is_err());
    }

    #[test]
    fn test_crew_count_never_zero() {
        let mut context = HabitatContext::new(Habitat::Leo, 0);
        assert_eq!(context.crew_count(), 1);
        context.set_crew_count(6);
        assert_eq!(context.crew_count(), 6);
    }
}
