//! Read-only per-frame views handed to the render backend

use crate::catalog::ModuleType;
use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::render::{LineHandle, MeshHandle};
use crate::scene::{Connection, ConnectionId, Module, ModuleId};

/// Emissive overlay color of the selected module
pub const HIGHLIGHT_COLOR: [f32; 3] = [1.0, 0.5, 0.5];

/// Color of connection lines
pub const CONNECTION_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

/// Uniform scale applied to docking-port markers
pub const PORT_SCALE: f32 = 0.1;

/// A docking port marker
#[derive(Debug, Clone, PartialEq)]
pub struct PortView {
    /// Port ring mesh
    pub mesh: MeshHandle,
    /// Model matrix: translation to the port's world position, scale 0.1
    pub transform: Mat4,
    /// Whether a connection uses this port
    pub connected: bool,
}

/// A module body plus its ports
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleView {
    /// Module handle
    pub id: ModuleId,
    /// Module type
    pub module_type: ModuleType,
    /// Body mesh
    pub mesh: MeshHandle,
    /// Model matrix of the body
    pub transform: Mat4,
    /// Catalog color of the type
    pub base_color: [f32; 3],
    /// Whether the module is the current selection
    pub highlighted: bool,
    /// Port markers in port order
    pub ports: Vec<PortView>,
}

impl ModuleView {
    /// Build the view of `module`
    ///
    /// Port markers are placed at `module.position + port.local_position`;
    /// the body's rotation and scale do not move them.
    pub fn from_module(module: &Module, highlighted: bool) -> Self {
        let ports = module
            .ports()
            .iter()
            .map(|port| PortView {
                mesh: port.mesh(),
                transform: Transform::from_position_uniform_scale(
                    module.position() + port.local_position(),
                    PORT_SCALE,
                )
                .to_matrix(),
                connected: port.is_connected(),
            })
            .collect();

        Self {
            id: module.id(),
            module_type: module.module_type(),
            mesh: module.mesh_handle(),
            transform: module.transform().to_matrix(),
            base_color: module.spec().color,
            highlighted,
            ports,
        }
    }

    /// Emissive color to draw the body with, if any
    pub fn emissive(&self) -> Option<[f32; 3]> {
        self.highlighted.then_some(HIGHLIGHT_COLOR)
    }
}

/// A connection line between two ports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionView {
    /// Connection handle
    pub id: ConnectionId,
    /// Persistent backend line
    pub line: LineHandle,
    /// Source endpoint in world space
    pub from: Vec3,
    /// Destination endpoint in world space
    pub to: Vec3,
    /// Line color
    pub color: [f32; 3],
}

impl ConnectionView {
    /// Build the view of `connection` drawn with `line`
    pub fn from_connection(connection: &Connection, line: LineHandle) -> Self {
        Self {
            id: connection.id(),
            line,
            from: connection.from().position,
            to: connection.to().position,
            color: CONNECTION_COLOR,
        }
    }
}
