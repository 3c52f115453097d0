//! Public rendering API
//!
//! The render backend trait and the opaque resource handles it hands out.

pub mod render_backend;

pub use render_backend::{BackendResult, LineHandle, MeshHandle, RenderBackend};
