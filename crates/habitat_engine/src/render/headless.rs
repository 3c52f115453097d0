//! Headless render backend
//!
//! Keeps every uploaded resource in memory and records what each frame would
//! have drawn. Used by the demo binary and by tests to check that resources
//! are released and that lines follow their modules.

use std::collections::HashMap;

use crate::foundation::math::Vec3;
use crate::geometry::MeshData;
use crate::render::{
    BackendResult, ConnectionView, LineHandle, MeshHandle, ModuleView, RenderBackend, RenderError,
};

/// A live line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRecord {
    /// Start point
    pub from: Vec3,
    /// End point
    pub to: Vec3,
    /// Color
    pub color: [f32; 3],
}

/// Counts of what the last frame contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Module bodies drawn
    pub modules: usize,
    /// Port markers drawn
    pub ports: usize,
    /// Lines drawn
    pub connections: usize,
    /// Bodies drawn with the highlight overlay
    pub highlighted: usize,
}

/// In-memory render backend
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    meshes: HashMap<MeshHandle, usize>,
    lines: HashMap<LineHandle, LineRecord>,
    next_handle: u64,
    frames_drawn: u64,
    line_updates: u64,
    last_frame: FrameStats,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes not yet released
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Lines not yet released
    pub fn live_lines(&self) -> usize {
        self.lines.len()
    }

    /// Look up a live line
    pub fn line(&self, handle: LineHandle) -> Option<&LineRecord> {
        self.lines.get(&handle)
    }

    /// Frames drawn so far
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Calls to `update_line` so far
    pub fn line_updates(&self) -> u64 {
        self.line_updates
    }

    /// What the most recent frame contained
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_mesh(&mut self, mesh: &MeshData) -> BackendResult<MeshHandle> {
        if mesh.positions.is_empty() || mesh.indices.is_empty() {
            return Err(RenderError::ResourceCreationFailed("mesh has no geometry".to_string()));
        }
        let handle = MeshHandle(self.allocate());
        self.meshes.insert(handle, mesh.vertex_count());
        log::trace!("Created mesh {:?} with {} vertices", handle, mesh.vertex_count());
        Ok(handle)
    }

    fn release_mesh(&mut self, handle: MeshHandle) -> BackendResult<()> {
        self.meshes
            .remove(&handle)
            .map(|_| ())
            .ok_or(RenderError::UnknownMesh(handle))
    }

    fn create_line(&mut self, from: Vec3, to: Vec3, color: [f32; 3]) -> BackendResult<LineHandle> {
        let handle = LineHandle(self.allocate());
        self.lines.insert(handle, LineRecord { from, to, color });
        Ok(handle)
    }

    fn update_line(&mut self, handle: LineHandle, from: Vec3, to: Vec3) -> BackendResult<()> {
        let line = self.lines.get_mut(&handle).ok_or(RenderError::UnknownLine(handle))?;
        line.from = from;
        line.to = to;
        self.line_updates += 1;
        Ok(())
    }

    fn release_line(&mut self, handle: LineHandle) -> BackendResult<()> {
        self.lines
            .remove(&handle)
            .map(|_| ())
            .ok_or(RenderError::UnknownLine(handle))
    }

    fn draw_frame(&mut self, modules: &[ModuleView], connections: &[ConnectionView]) -> BackendResult<()> {
        for module in modules {
            let handles = std::iter::once(module.mesh).chain(module.ports.iter().map(|p| p.mesh));
            for handle in handles {
                if !self.meshes.contains_key(&handle) {
                    return Err(RenderError::UnknownMesh(handle));
                }
            }
        }
        if let Some(view) = connections.iter().find(|c| !self.lines.contains_key(&c.line)) {
            return Err(RenderError::UnknownLine(view.line));
        }

        self.last_frame = FrameStats {
            modules: modules.len(),
            ports: modules.iter().map(|m| m.ports.len()).sum(),
            connections: connections.len(),
            highlighted: modules.iter().filter(|m| m.emissive().is_some()).count(),
        };
        self.frames_drawn += 1;
        Ok(())
    }
}
