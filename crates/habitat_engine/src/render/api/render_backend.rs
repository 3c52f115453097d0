//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement. The
//! editor core only ever talks to a backend through these calls: it uploads
//! and releases module meshes, maintains one persistent line per connection,
//! and hands over read-only views once per frame.

use crate::render::views::{ConnectionView, ModuleView};
use crate::render::RenderError;
use crate::foundation::math::Vec3;
use crate::geometry::MeshData;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a mesh resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a connection line stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(pub u64);

/// Main rendering backend trait
///
/// Backends own every GPU-side buffer. A handle returned by a `create_*` call
/// stays valid until the matching `release_*` call.
pub trait RenderBackend {
    /// Upload a mesh and return an opaque handle
    fn create_mesh(&mut self, mesh: &MeshData) -> BackendResult<MeshHandle>;

    /// Free the buffers behind a mesh handle
    fn release_mesh(&mut self, handle: MeshHandle) -> BackendResult<()>;

    /// Create a persistent line segment
    fn create_line(&mut self, from: Vec3, to: Vec3, color: [f32; 3]) -> BackendResult<LineHandle>;

    /// Move both ends of an existing line without reallocating it
    fn update_line(&mut self, handle: LineHandle, from: Vec3, to: Vec3) -> BackendResult<()>;

    /// Free a line
    fn release_line(&mut self, handle: LineHandle) -> BackendResult<()>;

    /// Draw one frame from read-only views of the scene
    fn draw_frame(&mut self, modules: &[ModuleView], connections: &[ConnectionView]) -> BackendResult<()>;
}
