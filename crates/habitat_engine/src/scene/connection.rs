//! Docking connections between module ports

use crate::foundation::math::Vec3;
use crate::scene::ModuleId;

slotmap::new_key_type! {
    /// Generation-checked handle to a connection in the [`SceneStore`](crate::scene::SceneStore)
    pub struct ConnectionId;
}

/// One side of a connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    /// Module the port belongs to
    pub module: ModuleId,
    /// Index into the module's docking ports
    pub port: usize,
    /// Port offset from the module center, copied at connect time
    pub port_offset: Vec3,
    /// Cached world position, refreshed by a resync
    pub position: Vec3,
}

impl Endpoint {
    pub(crate) fn resync(&mut self, module_position: Vec3) {
        self.position = module_position + self.port_offset;
    }
}

/// A bidirectional link between ports on two different modules
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    id: ConnectionId,
    from: Endpoint,
    to: Endpoint,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, from: Endpoint, to: Endpoint) -> Self {
        Self { id, from, to }
    }

    /// Stable handle of this connection
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Endpoint on the module that requested the connection
    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    /// Endpoint on the other module
    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    pub(crate) fn endpoints_mut(&mut self) -> [&mut Endpoint; 2] {
        [&mut self.from, &mut self.to]
    }

    /// Whether this connection joins `a` and `b`, in either direction
    pub fn links(&self, a: ModuleId, b: ModuleId) -> bool {
        (self.from.module == a && self.to.module == b) || (self.from.module == b && self.to.module == a)
    }

    /// Whether `module` is one of the two ends
    pub fn involves(&self, module: ModuleId) -> bool {
        self.from.module == module || self.to.module == module
    }

    /// Whether the given port is one of the two ends
    pub fn uses_port(&self, module: ModuleId, port: usize) -> bool {
        (self.from.module == module && self.from.port == port) || (self.to.module == module && self.to.port == port)
    }
}
