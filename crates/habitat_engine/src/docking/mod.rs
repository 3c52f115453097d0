//! Connection Manager - docking rules and endpoint sync
//!
//! Validates connection requests against the scene and keeps the cached
//! endpoint positions of every connection in step with module movement.
//!
//! There is no way to remove a single connection; clearing the habitat is the
//! only removal path.

use crate::scene::{Endpoint, ModuleId, SceneStore, ConnectionId};
use std::fmt;
use thiserror::Error;

/// Which side of a connection request tripped a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionSide {
    /// The module the request starts from
    Source,
    /// The module the request points at
    Destination,
}

impl fmt::Display for ConnectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Reasons a connection request is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionError {
    /// A module handle does not name a live module
    #[error("Unknown {side} module {module:?}")]
    UnknownModule {
        /// Side of the request
        side: ConnectionSide,
        /// Offending handle
        module: ModuleId,
    },

    /// The port index is out of range for the module
    #[error("Port {port} does not exist on {side} module ({available} ports)")]
    InvalidPort {
        /// Side of the request
        side: ConnectionSide,
        /// Requested port index
        port: usize,
        /// Number of ports on the module
        available: usize,
    },

    /// Both ends name the same module
    #[error("A module cannot be connected to itself")]
    SelfConnection,

    /// The two modules are already linked through some pair of ports
    #[error("Modules are already connected")]
    AlreadyConnected,

    /// A module has reached its type's connection limit
    #[error("The {side} module has reached its limit of {max} connections")]
    CapacityExceeded {
        /// Side that is full; the source is checked first
        side: ConnectionSide,
        /// The module's `max_connections`
        max: usize,
    },

    /// The port already carries another connection
    #[error("Port {port} on the {side} module is already in use")]
    PortInUse {
        /// Side of the request
        side: ConnectionSide,
        /// Port index
        port: usize,
    },
}

/// One end of a connection request: a module and one of its port indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRef {
    /// Module handle
    pub module: ModuleId,
    /// Index into the module's docking ports
    pub port: usize,
}

impl PortRef {
    /// Create a port reference
    pub const fn new(module: ModuleId, port: usize) -> Self {
        Self { module, port }
    }
}

/// Creates connections and resyncs their endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionManager;

impl ConnectionManager {
    /// Create a connection manager
    pub const fn new() -> Self {
        Self
    }

    /// Connect two module ports
    ///
    /// Checks run in this order: both modules exist, both ports exist, the
    /// modules differ, the pair is not already linked, the source then the
    /// destination has spare capacity, neither port is taken. On success both
    /// modules record the connection, both ports are marked connected and the
    /// endpoint positions are cached.
    pub fn connect(&self, store: &mut SceneStore, from: PortRef, to: PortRef) -> Result<ConnectionId, ConnectionError> {
        let result = self.validate(store, from, to);
        if let Err(reason) = result {
            log::warn!("Connection rejected: {reason}");
            return Err(reason);
        }

        let from_endpoint = Self::endpoint(store, from);
        let to_endpoint = Self::endpoint(store, to);
        let id = store.insert_connection(from_endpoint, to_endpoint);

        for end in [from, to] {
            let module = &mut store.modules[end.module];
            module.connections.push(id);
            if let Some(port) = module.port_mut(end.port) {
                port.connected = true;
            }
        }

        log::info!(
            "Connected {} port {} to {} port {}",
            store.modules[from.module].module_type(),
            from.port,
            store.modules[to.module].module_type(),
            to.port
        );
        Ok(id)
    }

    /// Recompute every cached endpoint as module position plus port offset
    ///
    /// Runs in O(connections); call after any module move.
    pub fn resync_all(&self, store: &mut SceneStore) {
        let SceneStore { modules, connections, .. } = store;
        for connection in connections.values_mut() {
            for endpoint in connection.endpoints_mut() {
                if let Some(module) = modules.get(endpoint.module) {
                    endpoint.resync(module.position());
                }
            }
        }
    }

    /// Connections that reference `module`, in creation order
    pub fn connections_of<'a>(&self, store: &'a SceneStore, module: ModuleId) -> impl Iterator<Item = ConnectionId> + 'a {
        store
            .connections()
            .filter(move |connection| connection.involves(module))
            .map(|connection| connection.id())
    }

    fn validate(&self, store: &SceneStore, from: PortRef, to: PortRef) -> Result<(), ConnectionError> {
        let sides = [(ConnectionSide::Source, from), (ConnectionSide::Destination, to)];

        for (side, end) in sides {
            let module = store
                .module(end.module)
                .ok_or(ConnectionError::UnknownModule { side, module: end.module })?;
            if end.port >= module.ports().len() {
                return Err(ConnectionError::InvalidPort {
                    side,
                    port: end.port,
                    available: module.ports().len(),
                });
            }
        }

        if from.module == to.module {
            return Err(ConnectionError::SelfConnection);
        }

        if store.connections().any(|c| c.links(from.module, to.module)) {
            return Err(ConnectionError::AlreadyConnected);
        }

        for (side, end) in sides {
            let module = &store.modules[end.module];
            if !module.has_free_capacity() {
                return Err(ConnectionError::CapacityExceeded {
                    side,
                    max: module.spec().max_connections,
                });
            }
        }

        for (side, end) in sides {
            if store.connections().any(|c| c.uses_port(end.module, end.port)) {
                return Err(ConnectionError::PortInUse { side, port: end.port });
            }
        }

        Ok(())
    }

    fn endpoint(store: &SceneStore, end: PortRef) -> Endpoint {
        let module = &store.modules[end.module];
        let port_offset = module.ports()[end.port].local_position();
        Endpoint {
            module: end.module,
            port: end.port,
            port_offset,
            position: module.position() + port_offset,
        }
    }
}
