//! Built-in primitive meshes: cylinders, boxes and docking-port rings

use super::{GeometryProvider, MeshData, SizeParams};
use crate::catalog::{ModuleShape, ModuleTypeSpec};

const BODY_SHADE_BOTTOM: [f32; 3] = [0.8, 0.8, 0.8];
const BODY_SHADE_TOP: [f32; 3] = [0.9, 0.9, 0.9];
const BOX_SHADE: [f32; 3] = [0.7, 0.7, 0.7];
const PORT_COLOR: [f32; 3] = [1.0, 1.0, 0.0];
const PORT_HALF_HEIGHT: f32 = 0.1;

// Rings emit 2 * (segments + 1) vertices and indices are u16
const MIN_SEGMENTS: u16 = 3;
const MAX_SEGMENTS: u16 = u16::MAX / 2;

/// Default geometry provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveGeometry {
    /// Segments around a module cylinder
    pub cylinder_segments: u16,
    /// Segments around a docking port ring
    pub port_segments: u16,
}

impl Default for PrimitiveGeometry {
    fn default() -> Self {
        Self {
            cylinder_segments: 16,
            port_segments: 8,
        }
    }
}

impl PrimitiveGeometry {
    /// Upright cylinder side wall centered on the origin
    ///
    /// Two vertices per ring step (bottom, top). Each segment emits both
    /// windings so the wall is visible from inside and outside. The segment
    /// count is clamped to `[3, 32767]` so every index fits in a `u16`.
    pub fn cylinder(radius: f32, height: f32, segments: u16) -> MeshData {
        let segments = segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
        let mut mesh = Self::ring(radius, height / 2.0, segments, BODY_SHADE_BOTTOM, BODY_SHADE_TOP);

        for i in 0..segments {
            let (i1, i2, i3, i4) = Self::quad_corners(i, segments);
            mesh.indices.extend_from_slice(&[i1, i2, i3, i2, i4, i3]);
            mesh.indices.extend_from_slice(&[i3, i4, i1, i4, i2, i1]);
        }
        mesh
    }

    /// Axis-aligned box centered on the origin, 4 vertices per face
    pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
        let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
        let positions = vec![
            // front
            [-w, -h, d], [w, -h, d], [w, h, d], [-w, h, d],
            // back
            [-w, -h, -d], [-w, h, -d], [w, h, -d], [w, -h, -d],
            // top
            [-w, h, -d], [-w, h, d], [w, h, d], [w, h, -d],
            // bottom
            [-w, -h, -d], [w, -h, -d], [w, -h, d], [-w, -h, d],
            // right
            [w, -h, -d], [w, h, -d], [w, h, d], [w, -h, d],
            // left
            [-w, -h, -d], [-w, -h, d], [-w, h, d], [-w, h, -d],
        ];

        let indices = (0..6u16)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base, base + 2, base + 3]
            })
            .collect();

        MeshData {
            colors: vec![BOX_SHADE; positions.len()],
            positions,
            indices,
        }
    }

    /// Short ring used for docking ports, single-sided
    ///
    /// Segments are clamped like [`Self::cylinder`].
    pub fn port_ring(radius: f32, segments: u16) -> MeshData {
        let segments = segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
        let mut mesh = Self::ring(radius, PORT_HALF_HEIGHT, segments, PORT_COLOR, PORT_COLOR);

        for i in 0..segments {
            let (i1, i2, i3, i4) = Self::quad_corners(i, segments);
            mesh.indices.extend_from_slice(&[i1, i2, i3, i2, i4, i3]);
        }
        mesh
    }

    fn ring(radius: f32, half_height: f32, segments: u16, bottom: [f32; 3], top: [f32; 3]) -> MeshData {
        let mut mesh = MeshData::default();
        for i in 0..=segments {
            let angle = (f32::from(i) / f32::from(segments)) * std::f32::consts::TAU;
            let x = angle.cos() * radius;
            let z = angle.sin() * radius;

            mesh.positions.push([x, -half_height, z]);
            mesh.colors.push(bottom);
            mesh.positions.push([x, half_height, z]);
            mesh.colors.push(top);
        }
        mesh
    }

    // The last segment wraps back to the first column, so the closing
    // duplicate column emitted by `ring` is never indexed.
    fn quad_corners(i: u16, segments: u16) -> (u16, u16, u16, u16) {
        let i1 = i * 2;
        let i2 = i1 + 1;
        let i3 = ((i + 1) % segments) * 2;
        let i4 = i3 + 1;
        (i1, i2, i3, i4)
    }
}

impl GeometryProvider for PrimitiveGeometry {
    fn generate_mesh(&self, spec: &ModuleTypeSpec, size: &SizeParams) -> MeshData {
        match spec.shape {
            ModuleShape::Cylinder => Self::cylinder(size.diameter / 2.0, size.length, self.cylinder_segments),
            ModuleShape::Box => Self::cuboid(size.width, size.height, size.depth),
        }
    }

    fn generate_port_mesh(&self, radius: f32) -> MeshData {
        Self::port_ring(radius, self.port_segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ModuleCatalog, ModuleType};

    #[test]
    fn test_cylinder_layout() {
        let mesh = PrimitiveGeometry::cylinder(1.5, 7.0, 16);
        assert_eq!(mesh.vertex_count(), 34);
        assert_eq!(mesh.colors.len(), 34);
        assert_eq!(mesh.indices.len(), 16 * 12);
        assert!(mesh.indices.iter().all(|&i| usize::from(i) < mesh.vertex_count()));
        assert!(mesh.positions.iter().all(|p| (p[1].abs() - 3.5).abs() < 1e-6));
    }

    #[test]
    fn test_segment_count_clamped_to_index_range() {
        let provider = PrimitiveGeometry {
            cylinder_segments: u16::MAX,
            port_segments: u16::MAX,
        };
        let spec = ModuleCatalog::default().spec(ModuleType::Halo).unwrap().clone();

        let body = provider.generate_mesh(&spec, &SizeParams::default());
        assert_eq!(body.vertex_count(), 2 * (usize::from(MAX_SEGMENTS) + 1));
        assert!(body.indices.iter().all(|&i| usize::from(i) < body.vertex_count()));

        let port = provider.generate_port_mesh(0.2);
        assert_eq!(port.indices.len(), usize::from(MAX_SEGMENTS) * 6);
        assert!(port.indices.iter().all(|&i| usize::from(i) < port.vertex_count()));

        assert_eq!(PrimitiveGeometry::port_ring(0.2, 0).vertex_count(), 8);
    }

    #[test]
    fn test_cuboid_layout() {
        let mesh = PrimitiveGeometry::cuboid(2.0, 4.0, 6.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.indices[30..], [20, 21, 22, 20, 22, 23]);
        assert!(mesh.positions.iter().all(|p| p[0].abs() == 1.0 && p[1].abs() == 2.0 && p[2].abs() == 3.0));
    }

    #[test]
    fn test_port_ring_layout() {
        let mesh = PrimitiveGeometry::default().generate_port_mesh(0.2);
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.indices.len(), 8 * 6);
        assert!(mesh.colors.iter().all(|c| *c == PORT_COLOR));
    }

    #[test]
    fn test_shape_selects_mesh_kind() {
        let catalog = ModuleCatalog::default();
        let provider = PrimitiveGeometry::default();
        let size = SizeParams::default();

        let halo = provider.generate_mesh(catalog.spec(ModuleType::Halo).unwrap(), &size);
        let power = provider.generate_mesh(catalog.spec(ModuleType::Power).unwrap(), &size);
        assert_eq!(halo.vertex_count(), 34);
        assert_eq!(power.vertex_count(), 24);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let catalog = ModuleCatalog::default();
        let provider = PrimitiveGeometry::default();
        let spec = catalog.spec(ModuleType::Eclss).unwrap();
        let size = SizeParams::from_design(3.0, 5.0);

        assert_eq!(provider.generate_mesh(spec, &size), provider.generate_mesh(spec, &size));
        assert_eq!(provider.port_positions(spec, &size).len(), 3);
    }
}
