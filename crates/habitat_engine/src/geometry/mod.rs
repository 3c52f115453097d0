//! Geometry provider interface
//!
//! Mesh generation is a collaborator of the editor core: the core asks for a
//! body mesh per module and one port mesh per docking port, and never looks
//! inside the vertex data beyond tinting it. [`PrimitiveGeometry`] is the
//! built-in provider.

mod primitives;

pub use primitives::PrimitiveGeometry;

use crate::catalog::ModuleTypeSpec;
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// CPU-side mesh produced by a [`GeometryProvider`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in model space
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex RGB colors, same length as `positions`
    pub colors: Vec<[f32; 3]>,
    /// Triangle list indices into `positions`
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replace every vertex color with `color`
    pub fn tint(&mut self, color: [f32; 3]) {
        self.colors.iter_mut().for_each(|c| *c = color);
    }

    /// Builder form of [`MeshData::tint`]
    #[must_use]
    pub fn tinted(mut self, color: [f32; 3]) -> Self {
        self.tint(color);
        self
    }
}

/// Size parameters for a generated module, in meters
///
/// Cylinders use `diameter` and `length`; boxes use `width`, `height` and
/// `depth`. Docking ports are always placed on a circle of `diameter / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeParams {
    /// Cylinder diameter
    pub diameter: f32,
    /// Cylinder length (height along Y)
    pub length: f32,
    /// Box width (X)
    pub width: f32,
    /// Box height (Y)
    pub height: f32,
    /// Box depth (Z)
    pub depth: f32,
}

impl Default for SizeParams {
    fn default() -> Self {
        Self {
            diameter: 3.0,
            length: 7.0,
            width: 2.0,
            height: 2.0,
            depth: 2.0,
        }
    }
}

impl SizeParams {
    /// Derive box dimensions from the two design sliders the UI exposes
    ///
    /// Width is 80% of the length, height and depth are 60% of it.
    pub fn from_design(diameter: f32, length: f32) -> Self {
        Self {
            diameter,
            length,
            width: length * 0.8,
            height: length * 0.6,
            depth: length * 0.6,
        }
    }

    /// Replace non-positive or non-finite fields with the defaults
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| if value.is_finite() && value > 0.0 { value } else { fallback };
        Self {
            diameter: pick(self.diameter, defaults.diameter),
            length: pick(self.length, defaults.length),
            width: pick(self.width, defaults.width),
            height: pick(self.height, defaults.height),
            depth: pick(self.depth, defaults.depth),
        }
    }
}

/// Mesh generation collaborator
///
/// Implementations must be deterministic: identical inputs give identical
/// meshes.
pub trait GeometryProvider {
    /// Generate the body mesh for a module type
    fn generate_mesh(&self, spec: &ModuleTypeSpec, size: &SizeParams) -> MeshData;

    /// Generate the mesh drawn at every docking port
    fn generate_port_mesh(&self, radius: f32) -> MeshData;

    /// Local offsets of the docking ports of a module, fixed at creation
    fn port_positions(&self, spec: &ModuleTypeSpec, size: &SizeParams) -> Vec<Vec3> {
        (0..spec.docking_ports)
            .map(|i| docking_port_position(i, spec.docking_ports, size.diameter / 2.0))
            .collect()
    }
}

/// Offset of port `index` out of `total`, evenly spaced on a horizontal circle
pub fn docking_port_position(index: usize, total: usize, radius: f32) -> Vec3 {
    if total == 0 {
        return Vec3::zeros();
    }
    let angle = (index as f32 / total as f32) * std::f32::consts::TAU;
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}
