//! Habitat editor facade
//!
//! Owns the scene store and every subsystem around it, and exposes the calls
//! a UI layer makes: pick a module type, generate modules, connect ports,
//! forward pointer and wheel events, read the summary and the evaluation, and
//! drive the render loop.

use crate::catalog::{CatalogError, Habitat, HabitatContext, ModuleCatalog, ModuleType};
use crate::config::ConfigError;
use crate::core::config::EditorConfig;
use crate::docking::{ConnectionError, ConnectionManager, PortRef};
use crate::evaluation::{self, EvaluationReport};
use crate::foundation::math::Vec3;
use crate::geometry::{GeometryProvider, PrimitiveGeometry, SizeParams};
use crate::input::InteractionEngine;
use crate::render::{MeshHandle, RenderBackend, RenderError, SceneRenderer};
use crate::scene::{ConnectionId, ModuleGeometry, ModuleId, PortGeometry, SceneError, SceneStore, SceneSummary};
use thiserror::Error;

/// Editor errors
///
/// Every variant is recoverable; the editor state is unchanged when an
/// operation fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// `generate_module` was called before a module type was chosen
    #[error("No module type selected")]
    NoSelection,

    /// Catalog lookup error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Connection request rejected
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Scene mutation error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Render backend error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for EditorError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Main editor struct
///
/// Generic over the render backend and the geometry provider so both can be
/// injected; the built-in primitive meshes are the default provider.
pub struct HabitatEditor<B: RenderBackend, G: GeometryProvider = PrimitiveGeometry> {
    config: EditorConfig,
    geometry: G,
    store: SceneStore,
    connections: ConnectionManager,
    interaction: InteractionEngine,
    renderer: SceneRenderer<B>,
    context: HabitatContext,
    selected_type: Option<ModuleType>,
}

impl<B: RenderBackend> HabitatEditor<B, PrimitiveGeometry> {
    /// Create an editor with the built-in geometry
    pub fn new(config: EditorConfig, backend: B) -> Result<Self, EditorError> {
        Self::with_geometry(config, backend, PrimitiveGeometry::default())
    }
}

impl<B: RenderBackend, G: GeometryProvider> HabitatEditor<B, G> {
    /// Create an editor with a custom geometry provider
    pub fn with_geometry(config: EditorConfig, backend: B, geometry: G) -> Result<Self, EditorError> {
        config.validate()?;
        log::info!(
            "Initializing habitat editor ({} module types, {}x{} canvas)",
            config.catalog.len(),
            config.canvas.width,
            config.canvas.height
        );

        Ok(Self {
            store: SceneStore::new(config.placement),
            connections: ConnectionManager::new(),
            interaction: InteractionEngine::new(config.canvas.width, config.canvas.height, &config.placement),
            renderer: SceneRenderer::new(backend),
            context: config.habitat.context(),
            selected_type: None,
            geometry,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Module catalog
    pub fn catalog(&self) -> &ModuleCatalog {
        &self.config.catalog
    }

    /// Scene store, read-only
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Interaction engine, read-only
    pub fn interaction(&self) -> &InteractionEngine {
        &self.interaction
    }

    /// Scene renderer, read-only
    pub fn renderer(&self) -> &SceneRenderer<B> {
        &self.renderer
    }

    /// Render backend, read-only
    pub fn backend(&self) -> &B {
        self.renderer.backend()
    }

    // ---- module type selection ----

    /// Choose the module type used by the next `generate_module`
    pub fn select_module_type(&mut self, module_type: ModuleType) -> Result<(), EditorError> {
        let spec = self.config.catalog.spec(module_type)?;
        log::debug!("Module type selected: {}", spec.name);
        self.selected_type = Some(module_type);
        Ok(())
    }

    /// Choose the module type by its identifier, e.g. `"halo"`
    pub fn select_module_type_by_name(&mut self, name: &str) -> Result<(), EditorError> {
        let module_type = name.parse::<ModuleType>()?;
        self.select_module_type(module_type)
    }

    /// Module type chosen for generation
    pub fn selected_module_type(&self) -> Option<ModuleType> {
        self.selected_type
    }

    // ---- habitat context ----

    /// Change the habitat environment
    pub fn set_habitat(&mut self, habitat: Habitat) {
        self.context.set_habitat(habitat);
    }

    /// Change the crew size; zero is raised to one
    pub fn set_crew_count(&mut self, crew_count: u32) {
        self.context.set_crew_count(crew_count);
    }

    /// Habitat and crew used by the evaluation
    pub fn habitat_context(&self) -> &HabitatContext {
        &self.context
    }

    // ---- scene mutation ----

    /// Generate a module of the selected type and add it to the habitat
    ///
    /// Size values that are missing or not positive fall back to the
    /// defaults. The body mesh is tinted with the type's catalog color. All
    /// meshes are uploaded before the scene changes, so a failed upload
    /// leaves nothing behind.
    pub fn generate_module(&mut self, size: SizeParams) -> Result<ModuleId, EditorError> {
        let module_type = self.selected_type.ok_or(EditorError::NoSelection)?;
        let spec = self.config.catalog.spec(module_type)?.clone();
        let size = size.sanitized();

        let mesh = self.geometry.generate_mesh(&spec, &size).tinted(spec.color);
        let port_mesh = self.geometry.generate_port_mesh(self.config.geometry.port_radius);
        let port_positions = self.geometry.port_positions(&spec, &size);

        let mut uploaded: Vec<MeshHandle> = Vec::with_capacity(port_positions.len() + 1);
        let meshes = std::iter::once(&mesh).chain(std::iter::repeat(&port_mesh).take(port_positions.len()));
        for data in meshes {
            match self.renderer.upload_mesh(data) {
                Ok(handle) => uploaded.push(handle),
                Err(err) => {
                    log::error!("Failed to upload {} module meshes: {err}", spec.name);
                    if let Err(release_err) = self.renderer.release_meshes(uploaded) {
                        log::warn!("Failed to release partial upload: {release_err}");
                    }
                    return Err(err.into());
                }
            }
        }

        let mesh_handle = uploaded[0];
        let ports = port_positions
            .into_iter()
            .zip(uploaded[1..].iter().copied())
            .map(|(local_position, mesh)| PortGeometry { local_position, mesh })
            .collect();

        let id = self.store.add_module(&spec, ModuleGeometry { mesh, mesh_handle, ports });
        if let Some(module) = self.store.module(id) {
            log::info!("Generated {} module at {:?}", spec.name, module.position());
        }
        Ok(id)
    }

    /// Generate a module of the selected type with the configured default size
    pub fn generate_default_module(&mut self) -> Result<ModuleId, EditorError> {
        self.generate_module(self.config.geometry.default_size)
    }

    /// Remove every module and connection and release their render resources
    ///
    /// Returns the number of modules removed. Any drag in progress ends.
    pub fn clear_habitat(&mut self) -> Result<usize, EditorError> {
        let removed = self.store.remove_all_modules();
        self.interaction.reset();

        let mut first_error = None;
        for module in &removed {
            if let Err(err) = self.renderer.release_module(module) {
                log::warn!("Failed to release {} module meshes: {err}", module.module_type());
                first_error.get_or_insert(err);
            }
        }
        if let Err(err) = self.renderer.release_lines() {
            log::warn!("Failed to release connection lines: {err}");
            first_error.get_or_insert(err);
        }

        log::info!("Habitat cleared ({} modules removed)", removed.len());
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(removed.len()),
        }
    }

    /// Connect port `from_port` of `from` to port `to_port` of `to`
    pub fn connect(
        &mut self,
        from: ModuleId,
        from_port: usize,
        to: ModuleId,
        to_port: usize,
    ) -> Result<ConnectionId, EditorError> {
        Ok(self
            .connections
            .connect(&mut self.store, PortRef::new(from, from_port), PortRef::new(to, to_port))?)
    }

    /// Select a module directly, replacing any previous selection
    pub fn select_module(&mut self, id: ModuleId) -> Result<(), EditorError> {
        Ok(self.store.set_selected(id, true)?)
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    // ---- input ----

    /// Primary button pressed at canvas coordinates
    pub fn pointer_down(&mut self, screen_x: f32, screen_y: f32) -> Option<ModuleId> {
        self.interaction.on_pointer_down(&mut self.store, screen_x, screen_y)
    }

    /// Pointer moved to canvas coordinates; returns whether a module moved
    pub fn pointer_move(&mut self, screen_x: f32, screen_y: f32) -> bool {
        self.interaction
            .on_pointer_move(&mut self.store, &self.connections, screen_x, screen_y)
    }

    /// Primary button released
    pub fn pointer_up(&mut self) {
        self.interaction.on_pointer_up();
    }

    /// Wheel step; returns the selected module's new scale
    pub fn wheel(&mut self, delta_y: f32) -> Option<Vec3> {
        self.interaction.on_wheel(&mut self.store, delta_y)
    }

    /// Canvas was resized
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.config.canvas.width = width;
        self.config.canvas.height = height;
        self.interaction.update_canvas_size(width, height);
    }

    // ---- read side ----

    /// Totals for the summary panel
    pub fn summary(&self) -> SceneSummary {
        self.store.summary()
    }

    /// Score the current design
    pub fn evaluate(&self) -> EvaluationReport {
        evaluation::evaluate(&self.store, &self.context)
    }

    // ---- render loop ----

    /// Start (or restart) the render loop
    pub fn start_render_loop(&mut self) {
        self.renderer.start();
    }

    /// Stop the render loop
    pub fn stop_render_loop(&mut self) {
        self.renderer.stop();
    }

    /// One render-loop iteration; returns whether a frame was drawn
    pub fn tick(&mut self) -> Result<bool, EditorError> {
        Ok(self.renderer.tick(&self.store)?)
    }

    /// Draw one frame regardless of the loop state
    pub fn render_frame(&mut self) -> Result<(), EditorError> {
        Ok(self.renderer.render_frame(&self.store)?)
    }
}
