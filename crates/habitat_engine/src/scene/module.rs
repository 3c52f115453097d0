//! Placed modules and their docking ports

use crate::catalog::{ModuleShape, ModuleType, ModuleTypeSpec};
use crate::foundation::math::{Transform, Vec3};
use crate::geometry::MeshData;
use crate::render::MeshHandle;
use crate::scene::ConnectionId;

slotmap::new_key_type! {
    /// Generation-checked handle to a module in the [`SceneStore`](crate::scene::SceneStore)
    pub struct ModuleId;
}

/// A fixed attachment point on a module
#[derive(Debug, Clone, PartialEq)]
pub struct DockingPort {
    local_position: Vec3,
    mesh: MeshHandle,
    pub(crate) connected: bool,
}

impl DockingPort {
    /// Offset from the module center, fixed at creation
    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    /// Render mesh owned by this port
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Whether a connection references this port
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Geometry for one docking port, as produced by the editor before insertion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortGeometry {
    /// Offset from the module center
    pub local_position: Vec3,
    /// Uploaded port mesh
    pub mesh: MeshHandle,
}

/// Everything the store needs to build a module besides its type spec
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleGeometry {
    /// Body mesh, already tinted
    pub mesh: MeshData,
    /// Uploaded body mesh
    pub mesh_handle: MeshHandle,
    /// One entry per docking port, in port order
    pub ports: Vec<PortGeometry>,
}

/// A placed module
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    spec: ModuleTypeSpec,
    mesh: MeshData,
    mesh_handle: MeshHandle,
    pub(crate) transform: Transform,
    ports: Vec<DockingPort>,
    pub(crate) connections: Vec<ConnectionId>,
}

impl Module {
    pub(crate) fn new(id: ModuleId, spec: ModuleTypeSpec, geometry: ModuleGeometry, position: Vec3) -> Self {
        let ports = geometry
            .ports
            .into_iter()
            .map(|port| DockingPort {
                local_position: port.local_position,
                mesh: port.mesh,
                connected: false,
            })
            .collect();

        Self {
            id,
            spec,
            mesh: geometry.mesh,
            mesh_handle: geometry.mesh_handle,
            transform: Transform::from_position(position),
            ports,
            connections: Vec::new(),
        }
    }

    /// Stable handle of this module
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Module type
    pub fn module_type(&self) -> ModuleType {
        self.spec.module_type
    }

    /// Type spec captured when the module was generated
    pub fn spec(&self) -> &ModuleTypeSpec {
        &self.spec
    }

    /// Body shape
    pub fn shape(&self) -> ModuleShape {
        self.spec.shape
    }

    /// CPU copy of the body mesh
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Render mesh owned by the body
    pub fn mesh_handle(&self) -> MeshHandle {
        self.mesh_handle
    }

    /// Full transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World-space center
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Euler rotation; carried for rendering only
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// Component-wise scale
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    /// Docking ports in creation order
    pub fn ports(&self) -> &[DockingPort] {
        &self.ports
    }

    /// A single docking port
    pub fn port(&self, index: usize) -> Option<&DockingPort> {
        self.ports.get(index)
    }

    pub(crate) fn port_mut(&mut self, index: usize) -> Option<&mut DockingPort> {
        self.ports.get_mut(index)
    }

    /// World position of a port: module position plus the port's local offset
    pub fn port_world_position(&self, index: usize) -> Option<Vec3> {
        self.port(index).map(|port| self.transform.position + port.local_position)
    }

    /// Connections this module takes part in
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    /// Whether another connection still fits under `max_connections`
    pub fn has_free_capacity(&self) -> bool {
        self.connections.len() < self.spec.max_connections
    }

    /// Iterate every render resource owned by the module (body first)
    pub fn mesh_handles(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        std::iter::once(self.mesh_handle).chain(self.ports.iter().map(DockingPort::mesh))
    }
}
