//! # Rendering
//!
//! Backend-agnostic rendering layer of the editor.
//!
//! ## Architecture
//!
//! - **RenderBackend**: trait implemented by whatever owns the GPU (or a
//!   headless stand-in). It only ever sees meshes, lines and read-only views.
//! - **Views**: per-frame snapshots of modules and connections, with the
//!   selection highlight applied as an overlay.
//! - **SceneRenderer**: keeps one persistent line per connection, drives the
//!   cancellable render loop and never mutates the scene.

pub mod api;
pub mod headless;
pub mod scene_renderer;
pub mod views;

pub use api::{BackendResult, LineHandle, MeshHandle, RenderBackend};
pub use headless::HeadlessBackend;
pub use scene_renderer::SceneRenderer;
pub use views::{
    ConnectionView, ModuleView, PortView, CONNECTION_COLOR, HIGHLIGHT_COLOR, PORT_SCALE,
};

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Typically an empty or malformed mesh, or the backend running out of
    /// memory.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A draw call failed
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// The mesh handle was never created or was already released
    #[error("Unknown mesh handle: {0:?}")]
    UnknownMesh(MeshHandle),

    /// The line handle was never created or was already released
    #[error("Unknown line handle: {0:?}")]
    UnknownLine(LineHandle),

    /// Backend-specific error
    #[error("Backend error: {0}")]
    BackendError(String),
}
