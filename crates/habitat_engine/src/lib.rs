//! # Habitat Engine
//!
//! Editor core for laying out space-habitat modules in 3D.
//!
//! ## Features
//!
//! - **Module Catalog**: HALO, ECLSS and Power module types with volume,
//!   crew capacity, docking ports and connection limits
//! - **Scene Store**: generation-checked handles for modules and connections
//! - **Docking**: validated port-to-port connections that follow their modules
//! - **Interaction**: click to select, drag on the ground plane, wheel to resize
//! - **Evaluation**: weighted habitability score for a given crew and habitat
//! - **Rendering**: injected backend, persistent connection lines, selection
//!   highlight applied at draw time
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use habitat_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut editor = HabitatEditor::new(EditorConfig::default(), HeadlessBackend::new())?;
//!
//!     editor.select_module_type(ModuleType::Halo)?;
//!     let halo = editor.generate_module(SizeParams::default())?;
//!     editor.select_module_type(ModuleType::Eclss)?;
//!     let eclss = editor.generate_module(SizeParams::default())?;
//!     editor.connect(halo, 0, eclss, 0)?;
//!
//!     println!("{}", editor.evaluate());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

// Shared configuration
pub mod core;

pub mod foundation;
pub mod config;
pub mod catalog;
pub mod geometry;
pub mod scene;
pub mod docking;
pub mod input;
pub mod evaluation;
pub mod render;

mod editor;

pub use editor::{EditorError, HabitatEditor};

#[cfg(test)]
mod tests;

/// Common imports for editor users
pub mod prelude {
    pub use crate::{
        EditorError, HabitatEditor,
        catalog::{Habitat, HabitatContext, ModuleCatalog, ModuleShape, ModuleType, ModuleTypeSpec},
        core::config::{Config, EditorConfig},
        docking::{ConnectionError, PortRef},
        evaluation::{EvaluationReport, HabitabilityBand, ScoreBreakdown},
        foundation::math::{Mat4, Transform, Vec3},
        geometry::{GeometryProvider, MeshData, PrimitiveGeometry, SizeParams},
        render::{HeadlessBackend, RenderBackend},
        scene::{ConnectionId, ModuleId, SceneSummary},
    };
}
