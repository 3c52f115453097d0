//! # Editor Configuration
//!
//! All tunables of the editor core in one serde-enabled tree, loadable from
//! TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Canvas**: pixel size used by the screen-to-world mapping
//! - **Placement**: spawn spacing, scale limits and wheel factors
//! - **Geometry**: default module size and docking-port radius
//! - **Habitat**: starting habitat and crew size
//! - **Catalog**: module type table, defaults to the built-in one

use serde::{Deserialize, Serialize};

use crate::catalog::{Habitat, HabitatContext, ModuleCatalog};
use crate::geometry::SizeParams;

// Re-export the file-format layer next to the config types
pub use crate::config::{Config, ConfigError};

/// # Canvas Configuration
///
/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// # Placement Configuration
///
/// Where new modules spawn and how far they can be resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance along X between consecutive spawn positions
    pub spawn_spacing: f32,
    /// Lower bound of every scale component
    pub min_scale: f32,
    /// Upper bound of every scale component
    pub max_scale: f32,
    /// Scale factor for one wheel step with positive delta
    pub wheel_grow: f32,
    /// Scale factor for one wheel step otherwise
    pub wheel_shrink: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spawn_spacing: 4.0,
            min_scale: 0.1,
            max_scale: 5.0,
            wheel_grow: 1.1,
            wheel_shrink: 0.9,
        }
    }
}

impl PlacementConfig {
    /// Set the spawn spacing
    pub fn with_spawn_spacing(mut self, spacing: f32) -> Self {
        self.spawn_spacing = spacing;
        self
    }

    /// Set the scale limits
    pub fn with_scale_limits(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::Invalid(format!(
                "scale limits must satisfy 0 < min <= max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if self.wheel_grow <= 1.0 || self.wheel_shrink <= 0.0 || self.wheel_shrink >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "wheel factors must grow above 1 and shrink within (0, 1), got {} / {}",
                self.wheel_grow, self.wheel_shrink
            )));
        }
        if !self.spawn_spacing.is_finite() {
            return Err(ConfigError::Invalid("spawn spacing must be finite".to_string()));
        }
        Ok(())
    }
}

/// # Geometry Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Radius of the docking-port ring mesh
    pub port_radius: f32,
    /// Size used when the UI supplies none
    pub default_size: SizeParams,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            port_radius: 0.2,
            default_size: SizeParams::default(),
        }
    }
}

/// # Habitat Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitatConfig {
    /// Starting habitat
    pub habitat: Habitat,
    /// Starting crew size
    pub crew_count: u32,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            habitat: Habitat::Leo,
            crew_count: 4,
        }
    }
}

impl HabitatConfig {
    /// Build the runtime context
    pub fn context(&self) -> HabitatContext {
        HabitatContext::new(self.habitat, self.crew_count)
    }
}

/// # Complete Editor Configuration
///
/// Top-level configuration for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Log filter passed to the logger, e.g. `"info"`
    pub log_level: String,
    /// Canvas settings
    pub canvas: CanvasConfig,
    /// Placement rules
    pub placement: PlacementConfig,
    /// Geometry defaults
    pub geometry: GeometryConfig,
    /// Starting habitat context
    pub habitat: HabitatConfig,
    /// Module type table
    pub catalog: ModuleCatalog,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            canvas: CanvasConfig::default(),
            placement: PlacementConfig::default(),
            geometry: GeometryConfig::default(),
            habitat: HabitatConfig::default(),
            catalog: ModuleCatalog::default(),
        }
    }
}

impl EditorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set canvas size
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = CanvasConfig { width, height };
        self
    }

    /// Set placement rules
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Set starting habitat and crew
    pub fn with_habitat(mut self, habitat: Habitat, crew_count: u32) -> Self {
        self.habitat = HabitatConfig { habitat, crew_count };
        self
    }

    /// Replace the module catalog
    pub fn with_catalog(mut self, catalog: ModuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.habitat.crew_count == 0 {
            return Err(ConfigError::Invalid("crew count must be at least 1".to_string()));
        }
        if !(self.geometry.port_radius > 0.0) {
            return Err(ConfigError::Invalid("port radius must be positive".to_string()));
        }
        self.placement.validate()?;
        self.catalog
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

impl Config for EditorConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModuleType;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_scale_limits() {
        let config = EditorConfig::new().with_placement(PlacementConfig::default().with_scale_limits(2.0, 1.0));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_canvas() {
        assert!(EditorConfig::new().with_canvas(0, 600).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        let config = EditorConfig::new()
            .with_log_level("debug")
            .with_canvas(1024, 768)
            .with_habitat(Habitat::Mars, 6);

        config.save_to_file(&path).unwrap();
        let loaded = EditorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");
        std::fs::write(&path, "(log_level: \"warn\", habitat: (habitat: luna))").unwrap();

        let loaded = EditorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.log_level, "warn");
        assert_eq!(loaded.habitat.habitat, Habitat::Luna);
        assert_eq!(loaded.habitat.crew_count, 4);
        assert!(loaded.catalog.contains(ModuleType::Eclss));
    }

    #[test]
    fn test_partial_canvas_table_keeps_default_height() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        std::fs::write(&path, "[canvas]\nwidth = 1024\n").unwrap();

        let loaded = EditorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.canvas, CanvasConfig { width: 1024, height: 600 });
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = EditorConfig::load_from_file("editor.yaml");
        assert!(result.is_err());
    }
}
