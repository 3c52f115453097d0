//! Scene Store - single owner of modules, ports and connections
//!
//! Modules and connections live in slot maps so every cross reference is a
//! generation-checked handle. A stale handle (one that outlived a
//! [`SceneStore::remove_all_modules`]) resolves to `None` instead of silently
//! pointing at a newer module. Insertion order is tracked separately because
//! hit-testing and spawning depend on it.

use crate::catalog::ModuleTypeSpec;
use crate::core::config::PlacementConfig;
use crate::foundation::math::{utils, Vec3};
use crate::scene::{Connection, ConnectionId, Endpoint, Module, ModuleGeometry, ModuleId};
use slotmap::SlotMap;
use thiserror::Error;

/// Errors raised by direct store mutations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not name a live module
    #[error("Unknown module: {0:?}")]
    UnknownModule(ModuleId),

    /// A scale factor was NaN or infinite
    #[error("Scale factor must be finite")]
    NonFiniteScale,
}

/// Aggregate numbers shown in the habitat summary panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneSummary {
    /// Number of placed modules
    pub module_count: usize,
    /// Sum of base volumes, in cubic meters
    pub total_volume: u32,
    /// Sum of crew berths
    pub total_capacity: u32,
    /// Number of connections
    pub total_connections: usize,
}

/// Owner of every module and connection in the habitat
#[derive(Debug, Clone)]
pub struct SceneStore {
    pub(crate) modules: SlotMap<ModuleId, Module>,
    module_order: Vec<ModuleId>,
    pub(crate) connections: SlotMap<ConnectionId, Connection>,
    connection_order: Vec<ConnectionId>,
    selected: Option<ModuleId>,
    placement: PlacementConfig,
    topology_revision: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

impl SceneStore {
    /// Create an empty store
    pub fn new(placement: PlacementConfig) -> Self {
        Self {
            modules: SlotMap::with_key(),
            module_order: Vec::new(),
            connections: SlotMap::with_key(),
            connection_order: Vec::new(),
            selected: None,
            placement,
            topology_revision: 0,
        }
    }

    /// Placement rules this store applies
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Build a module from its spec and generated geometry and append it
    ///
    /// The module spawns at `(module_count * spawn_spacing, 0, 0)`.
    pub fn add_module(&mut self, spec: &ModuleTypeSpec, geometry: ModuleGeometry) -> ModuleId {
        let spawn = Vec3::new(self.module_order.len() as f32 * self.placement.spawn_spacing, 0.0, 0.0);
        let id = self
            .modules
            .insert_with_key(|id| Module::new(id, spec.clone(), geometry, spawn));
        self.module_order.push(id);
        self.topology_revision += 1;
        id
    }

    /// Remove every module and connection at once
    ///
    /// Returns the removed modules in insertion order so their render
    /// resources can be released. The selection is cleared too.
    pub fn remove_all_modules(&mut self) -> Vec<Module> {
        let order = std::mem::take(&mut self.module_order);
        let removed = order.into_iter().filter_map(|id| self.modules.remove(id)).collect();

        self.modules.clear();
        self.connections.clear();
        self.connection_order.clear();
        self.selected = None;
        self.topology_revision += 1;
        removed
    }

    /// Set the X/Z position of a module, keeping Y
    pub fn set_module_position(&mut self, id: ModuleId, x: f32, z: f32) -> Result<(), SceneError> {
        let module = self.modules.get_mut(id).ok_or(SceneError::UnknownModule(id))?;
        module.transform.position.x = x;
        module.transform.position.z = z;
        Ok(())
    }

    /// Multiply a module's scale by `factor` and clamp each component
    ///
    /// Returns the resulting scale. A NaN or infinite factor is rejected and
    /// leaves the scale untouched.
    pub fn set_module_scale(&mut self, id: ModuleId, factor: f32) -> Result<Vec3, SceneError> {
        let (min, max) = (self.placement.min_scale, self.placement.max_scale);
        let module = self.modules.get_mut(id).ok_or(SceneError::UnknownModule(id))?;
        if !factor.is_finite() {
            return Err(SceneError::NonFiniteScale);
        }
        module.transform.scale = utils::clamp_components(module.transform.scale * factor, min, max);
        Ok(module.transform.scale)
    }

    /// Mark a module selected or unselected
    ///
    /// Selecting a module replaces any previous selection. Unselecting a module
    /// that is not the current selection does nothing.
    pub fn set_selected(&mut self, id: ModuleId, selected: bool) -> Result<(), SceneError> {
        if !self.modules.contains_key(id) {
            return Err(SceneError::UnknownModule(id));
        }
        if selected {
            self.selected = Some(id);
        } else if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Currently selected module
    pub fn selected(&self) -> Option<ModuleId> {
        self.selected
    }

    /// Whether `id` is the selected module
    pub fn is_selected(&self, id: ModuleId) -> bool {
        self.selected == Some(id)
    }

    /// Look up a module
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id)
    }

    /// Modules in insertion order
    pub fn modules(&self) -> impl Iterator<Item = &Module> + '_ {
        self.module_order.iter().filter_map(|id| self.modules.get(*id))
    }

    /// Module handles in insertion order
    pub fn module_ids(&self) -> &[ModuleId] {
        &self.module_order
    }

    /// Number of modules
    pub fn module_count(&self) -> usize {
        self.module_order.len()
    }

    /// Whether the habitat has no modules
    pub fn is_empty(&self) -> bool {
        self.module_order.is_empty()
    }

    /// Look up a connection
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Connections in creation order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connection_order.iter().filter_map(|id| self.connections.get(*id))
    }

    /// Number of connections
    pub fn connection_count(&self) -> usize {
        self.connection_order.len()
    }

    /// Counter bumped whenever modules or connections are added or cleared
    pub fn topology_revision(&self) -> u64 {
        self.topology_revision
    }

    pub(crate) fn insert_connection(&mut self, from: Endpoint, to: Endpoint) -> ConnectionId {
        let id = self
            .connections
            .insert_with_key(|id| Connection::new(id, from, to));
        self.connection_order.push(id);
        self.topology_revision += 1;
        id
    }

    /// Totals for the summary panel
    pub fn summary(&self) -> SceneSummary {
        self.modules().fold(
            SceneSummary {
                total_connections: self.connection_count(),
                ..SceneSummary::default()
            },
            |mut summary, module| {
                summary.module_count += 1;
                summary.total_volume += module.spec().base_volume;
                summary.total_capacity += module.spec().base_capacity;
                summary
            },
        )
    }
}
