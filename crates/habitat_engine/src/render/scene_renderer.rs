//! Scene Renderer - bridges the scene store with a render backend
//!
//! Each frame it builds read-only views of the store and hands them to the
//! backend. Connection lines are persistent backend resources: they are
//! created when the topology changes, released when their connection
//! disappears and only repositioned when an endpoint moved.

use std::collections::HashMap;

use crate::foundation::math::Vec3;
use crate::geometry::MeshData;
use crate::render::{
    BackendResult, ConnectionView, LineHandle, MeshHandle, ModuleView, RenderBackend, CONNECTION_COLOR,
};
use crate::scene::{ConnectionId, Module, SceneStore};

#[derive(Debug, Clone, Copy)]
struct CachedLine {
    handle: LineHandle,
    from: Vec3,
    to: Vec3,
}

/// Scene renderer that owns the backend and the render loop state
pub struct SceneRenderer<B: RenderBackend> {
    backend: B,
    lines: HashMap<ConnectionId, CachedLine>,
    synced_revision: Option<u64>,
    running: bool,
}

impl<B: RenderBackend> SceneRenderer<B> {
    /// Wrap a backend; the render loop starts stopped
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lines: HashMap::new(),
            synced_revision: None,
            running: false,
        }
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get mutable access to the underlying backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Start (or restart) the render loop
    pub fn start(&mut self) {
        if !self.running {
            log::info!("Render loop started");
        }
        self.running = true;
    }

    /// Stop the render loop; further ticks draw nothing until restarted
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Render loop stopped");
        }
        self.running = false;
    }

    /// Whether the render loop is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One iteration of the render loop
    ///
    /// Returns `Ok(false)` without drawing when the loop is stopped.
    pub fn tick(&mut self, store: &SceneStore) -> BackendResult<bool> {
        if !self.running {
            return Ok(false);
        }
        self.render_frame(store)?;
        Ok(true)
    }

    /// Draw a single frame regardless of the loop state
    pub fn render_frame(&mut self, store: &SceneStore) -> BackendResult<()> {
        self.sync_lines(store)?;

        let modules: Vec<ModuleView> = store
            .modules()
            .map(|module| ModuleView::from_module(module, store.is_selected(module.id())))
            .collect();

        let connections: Vec<ConnectionView> = store
            .connections()
            .filter_map(|connection| {
                self.lines
                    .get(&connection.id())
                    .map(|line| ConnectionView::from_connection(connection, line.handle))
            })
            .collect();

        self.backend.draw_frame(&modules, &connections)
    }

    /// Upload a mesh through the backend
    pub fn upload_mesh(&mut self, mesh: &MeshData) -> BackendResult<MeshHandle> {
        self.backend.create_mesh(mesh)
    }

    /// Release the body mesh and every port mesh of a removed module
    ///
    /// Every handle is attempted even after a failure; the first error is
    /// returned.
    pub fn release_module(&mut self, module: &Module) -> BackendResult<()> {
        self.release_meshes(module.mesh_handles())
    }

    /// Release a set of meshes, e.g. after a partially failed upload
    ///
    /// Every handle is attempted even after a failure; the first error is
    /// returned.
    pub fn release_meshes(&mut self, handles: impl IntoIterator<Item = MeshHandle>) -> BackendResult<()> {
        let backend = &mut self.backend;
        release_each(handles, |handle| backend.release_mesh(handle))
    }

    /// Release every cached connection line
    ///
    /// The cache is emptied even if the backend rejects some handles; the
    /// first error is returned.
    pub fn release_lines(&mut self) -> BackendResult<()> {
        let backend = &mut self.backend;
        let result = release_each(self.lines.drain().map(|(_, line)| line.handle), |handle| {
            backend.release_line(handle)
        });
        self.synced_revision = None;
        result
    }

    /// Number of persistent lines currently cached
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn sync_lines(&mut self, store: &SceneStore) -> BackendResult<()> {
        let revision = store.topology_revision();
        if self.synced_revision != Some(revision) {
            let stale: Vec<ConnectionId> = self
                .lines
                .keys()
                .copied()
                .filter(|id| store.connection(*id).is_none())
                .collect();
            for id in stale {
                if let Some(line) = self.lines.remove(&id) {
                    self.backend.release_line(line.handle)?;
                }
            }

            for connection in store.connections() {
                if self.lines.contains_key(&connection.id()) {
                    continue;
                }
                let (from, to) = (connection.from().position, connection.to().position);
                let handle = self.backend.create_line(from, to, CONNECTION_COLOR)?;
                self.lines.insert(connection.id(), CachedLine { handle, from, to });
            }
            self.synced_revision = Some(revision);
            log::debug!("Connection lines rebuilt for topology revision {revision}");
        }

        for connection in store.connections() {
            let Some(line) = self.lines.get_mut(&connection.id()) else {
                continue;
            };
            let (from, to) = (connection.from().position, connection.to().position);
            if line.from != from || line.to != to {
                self.backend.update_line(line.handle, from, to)?;
                line.from = from;
                line.to = to;
            }
        }
        Ok(())
    }
}

/// Run `release` on every handle, keeping the first error
fn release_each<H>(
    handles: impl IntoIterator<Item = H>,
    mut release: impl FnMut(H) -> BackendResult<()>,
) -> BackendResult<()> {
    let mut first_error = None;
    for handle in handles {
        if let Err(err) = release(handle) {
            log::warn!("Failed to release render resource: {err}");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}
