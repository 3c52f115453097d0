//! Scene model
//!
//! The in-memory habitat: modules with their docking ports, the connections
//! between ports, and the [`SceneStore`] that owns all of them. Nothing in
//! this module touches rendering beyond holding opaque mesh handles.

mod connection;
mod module;
mod store;

pub use connection::{Connection, ConnectionId, Endpoint};
pub use module::{DockingPort, Module, ModuleGeometry, ModuleId, PortGeometry};
pub use store::{SceneError, SceneStore, SceneSummary};
