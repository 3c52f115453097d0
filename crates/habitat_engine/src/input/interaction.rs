//! Interaction engine: pointer and wheel input driving the scene
//!
//! A two-state machine (idle, dragging) over a single stream of input
//! events. Each handler runs to completion before the next event is
//! processed, so no locking is involved.
//!
//! Resizing is driven by the wheel only. Selected modules are highlighted by
//! the renderer, but there are no draggable resize handles.

use crate::catalog::ModuleShape;
use crate::core::config::PlacementConfig;
use crate::docking::ConnectionManager;
use crate::foundation::math::{utils, Vec2, Vec3};
use crate::input::picking::PointerState;
use crate::scene::{Module, ModuleId, SceneStore};

/// Pick radius of a cylinder module at scale 1
pub const CYLINDER_PICK_RADIUS: f32 = 1.5;

/// Current interaction state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    /// No drag in progress
    Idle,
    /// A module follows the pointer
    Dragging {
        /// Module being dragged
        module: ModuleId,
        /// Pick point minus module center, in X/Z
        offset: Vec2,
    },
}

/// Whether `point` hits `module`, using the simplified ground-plane rules
///
/// Cylinders: XZ distance from the center below `1.5 * scale.x`.
/// Boxes: `|dx| < scale.x` and `|dz| < scale.z`. Rotation and height are
/// ignored.
pub fn hit_test(module: &Module, point: Vec3) -> bool {
    let center = module.position();
    let scale = module.scale();
    match module.shape() {
        ModuleShape::Cylinder => utils::distance_xz(point, center) < CYLINDER_PICK_RADIUS * scale.x,
        ModuleShape::Box => (point.x - center.x).abs() < scale.x && (point.z - center.z).abs() < scale.z,
    }
}

/// First module in store order that `point` hits
///
/// Earlier modules win when shapes overlap.
pub fn pick(store: &SceneStore, point: Vec3) -> Option<ModuleId> {
    store.modules().find(|module| hit_test(module, point)).map(Module::id)
}

/// Maps pointer and wheel events onto scene mutations
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    pointer: PointerState,
    state: InteractionState,
    wheel_grow: f32,
    wheel_shrink: f32,
}

impl InteractionEngine {
    /// Create an interaction engine for a canvas of the given size
    pub fn new(canvas_width: u32, canvas_height: u32, placement: &PlacementConfig) -> Self {
        Self {
            pointer: PointerState::new(canvas_width, canvas_height),
            state: InteractionState::Idle,
            wheel_grow: placement.wheel_grow,
            wheel_shrink: placement.wheel_shrink,
        }
    }

    /// Current state
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    /// Pointer state
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Update canvas size for the screen-to-world mapping
    pub fn update_canvas_size(&mut self, width: u32, height: u32) {
        self.pointer.update_canvas_size(width, height);
    }

    /// Handle a primary button press at canvas coordinates
    ///
    /// On a hit the module becomes the only selection and a drag starts. On a
    /// miss everything is deselected and the engine stays idle.
    pub fn on_pointer_down(&mut self, store: &mut SceneStore, screen_x: f32, screen_y: f32) -> Option<ModuleId> {
        self.pointer.press(screen_x, screen_y);
        let world = self.pointer.screen_to_world();

        let picked = pick(store, world)
            .and_then(|id| store.module(id).map(|module| (id, module.position(), module.module_type())));
        store.clear_selection();

        let Some((id, center, module_type)) = picked else {
            self.state = InteractionState::Idle;
            return None;
        };
        match store.set_selected(id, true) {
            Ok(()) => {
                self.state = InteractionState::Dragging {
                    module: id,
                    offset: Vec2::new(world.x - center.x, world.z - center.z),
                };
                log::info!("Selected {module_type} module");
                Some(id)
            }
            Err(err) => {
                log::warn!("Picked module could not be selected: {err}");
                self.state = InteractionState::Idle;
                None
            }
        }
    }

    /// Handle pointer movement; drags the module under the pointer if any
    ///
    /// Returns whether a module moved. Connections are resynced after every
    /// move. A drag whose module has disappeared ends quietly.
    pub fn on_pointer_move(
        &mut self,
        store: &mut SceneStore,
        connections: &ConnectionManager,
        screen_x: f32,
        screen_y: f32,
    ) -> bool {
        self.pointer.update_position(screen_x, screen_y);

        let InteractionState::Dragging { module, offset } = self.state else {
            return false;
        };

        let world = self.pointer.screen_to_world();
        if store.set_module_position(module, world.x - offset.x, world.z - offset.y).is_err() {
            log::debug!("Dragged module {module:?} no longer exists, ending drag");
            self.state = InteractionState::Idle;
            return false;
        }
        connections.resync_all(store);
        true
    }

    /// Handle a primary button release; always returns to idle
    pub fn on_pointer_up(&mut self) {
        self.pointer.release();
        self.state = InteractionState::Idle;
    }

    /// Handle a wheel step on the selected module
    ///
    /// Positive `delta_y` grows the module by the grow factor, anything else
    /// shrinks it; every scale component is then clamped. Returns the new
    /// scale, or `None` when nothing is selected.
    pub fn on_wheel(&mut self, store: &mut SceneStore, delta_y: f32) -> Option<Vec3> {
        let selected = store.selected()?;
        let factor = if delta_y > 0.0 { self.wheel_grow } else { self.wheel_shrink };
        store.set_module_scale(selected, factor).ok()
    }

    /// Drop any drag in progress, e.g. after the habitat was cleared
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.pointer.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ModuleCatalog, ModuleType};
    use crate::docking::PortRef;
    use crate::geometry::{docking_port_position, MeshData};
    use crate::render::MeshHandle;
    use crate::scene::{ModuleGeometry, PortGeometry};
    use approx::assert_relative_eq;

    fn add(store: &mut SceneStore, module_type: ModuleType) -> ModuleId {
        let spec = ModuleCatalog::default().spec(module_type).unwrap().clone();
        let ports = (0..spec.docking_ports)
            .map(|i| PortGeometry {
                local_position: docking_port_position(i, spec.docking_ports, 1.5),
                mesh: MeshHandle(i as u64),
            })
            .collect();
        store.add_module(&spec, ModuleGeometry { mesh: MeshData::default(), mesh_handle: MeshHandle(99), ports })
    }

    fn engine() -> InteractionEngine {
        InteractionEngine::new(1000, 1000, &PlacementConfig::default())
    }

    /// Canvas pixel that maps to world (x, z) on a 1000x1000 canvas
    fn pixel(x: f32, z: f32) -> (f32, f32) {
        ((x + 5.0) * 100.0, (z + 5.0) * 100.0)
    }

    #[test]
    fn test_cylinder_hit_test_examples() {
        let mut store = SceneStore::default();
        let halo = add(&mut store, ModuleType::Halo);
        assert!(hit_test(store.module(halo).unwrap(), Vec3::zeros()));

        store.set_module_position(halo, 2.0, 0.0).unwrap();
        assert!(!hit_test(store.module(halo).unwrap(), Vec3::zeros()));
    }

    #[test]
    fn test_box_hit_test_uses_scale_extents() {
        let mut store = SceneStore::default();
        let _ = add(&mut store, ModuleType::Halo);
        let power = add(&mut store, ModuleType::Power);
        store.set_module_position(power, 0.0, 0.0).unwrap();

        assert!(hit_test(store.module(power).unwrap(), Vec3::new(0.9, 0.0, -0.9)));
        assert!(!hit_test(store.module(power).unwrap(), Vec3::new(1.0, 0.0, 0.0)));

        store.set_module_scale(power, 2.0).unwrap();
        assert!(hit_test(store.module(power).unwrap(), Vec3::new(1.5, 0.0, 1.5)));
    }

    #[test]
    fn test_earlier_module_wins_on_overlap() {
        let mut store = SceneStore::default();
        let first = add(&mut store, ModuleType::Eclss);
        let second = add(&mut store, ModuleType::Halo);
        store.set_module_position(second, 0.0, 0.0).unwrap();

        assert_eq!(pick(&store, Vec3::new(0.2, 0.0, 0.2)), Some(first));
    }

    #[test]
    fn test_pointer_down_selects_and_starts_drag() {
        let mut store = SceneStore::default();
        let mut engine = engine();
        let halo = add(&mut store, ModuleType::Halo);

        let (sx, sy) = pixel(0.5, -0.25);
        assert_eq!(engine.on_pointer_down(&mut store, sx, sy), Some(halo));
        assert_eq!(store.selected(), Some(halo));
        match engine.state() {
            InteractionState::Dragging { module, offset } => {
                assert_eq!(module, halo);
                assert_relative_eq!(offset, Vec2::new(0.5, -0.25), epsilon = 1e-5);
            }
            InteractionState::Idle => panic!("expected a drag"),
        }
    }

    #[test]
    fn test_pointer_down_moves_selection_to_new_module() {
        let mut store = SceneStore::default();
        let mut engine = engine();
        let halo = add(&mut store, ModuleType::Halo);
        let power = add(&mut store, ModuleType::Power);
        store.set_module_position(power, 3.0, 0.0).unwrap();
        store.set_selected(halo, true).unwrap();

        let (sx, sy) = pixel(3.0, 0.0);
        assert_eq!(engine.on_pointer_down(&mut store, sx, sy), Some(power));
        assert_eq!(store.selected(), Some(power));
        assert!(!store.is_selected(halo));
        assert!(matches!(engine.state(), InteractionState::Dragging { module, .. } if module == power));
    }

    #[test]
    fn test_miss_deselects_everything() {
        let mut store = SceneStore::default();
        let mut engine = engine();
        let halo = add(&mut store, ModuleType::Halo);
        store.set_selected(halo, true).unwrap();

        let (sx, sy) = pixel(-4.5, 4.5);
        assert_eq!(engine.on_pointer_down(&mut store, sx, sy), None);
        assert_eq!(store.selected(), None);
        assert_eq!(engine.state(), InteractionState::Idle);
    }

    #[test]
    fn test_drag_moves_module_and_connections() {
        let mut store = SceneStore::default();
        let manager = ConnectionManager::new();
        let mut engine = engine();
        let halo = add(&mut store, ModuleType::Halo);
        let eclss = add(&mut store, ModuleType::Eclss);
        manager.connect(&mut store, PortRef::new(halo, 0), PortRef::new(eclss, 0)).unwrap();

        let (sx, sy) = pixel(0.5, 0.0);
        engine.on_pointer_down(&mut store, sx, sy);
        let (mx, my) = pixel(-2.5, 3.0);
        assert!(engine.on_pointer_move(&mut store, &manager, mx, my));

        let module = store.module(halo).unwrap();
        assert_relative_eq!(module.position(), Vec3::new(-3.0, 0.0, 3.0), epsilon = 1e-5);
        let connection = store.connections().next().unwrap();
        assert_relative_eq!(connection.from().position, module.port_world_position(0).unwrap(), epsilon = 1e-5);

        engine.on_pointer_up();
        assert!(!engine.is_dragging());
        assert!(!engine.on_pointer_move(&mut store, &manager, 0.0, 0.0));
        assert_relative_eq!(store.module(halo).unwrap().position(), Vec3::new(-3.0, 0.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_wheel_scales_selected_module_within_limits() {
        let mut store = SceneStore::default();
        let mut engine = engine();
        let halo = add(&mut store, ModuleType::Halo);

        assert_eq!(engine.on_wheel(&mut store, 1.0), None);

        store.set_selected(halo, true).unwrap();
        let grown = engine.on_wheel(&mut store, 120.0).unwrap();
        assert_relative_eq!(grown, Vec3::new(1.1, 1.1, 1.1), epsilon = 1e-6);
        let shrunk = engine.on_wheel(&mut store, -120.0).unwrap();
        assert_relative_eq!(shrunk, Vec3::new(0.99, 0.99, 0.99), epsilon = 1e-6);

        for _ in 0..100 {
            engine.on_wheel(&mut store, 1.0);
        }
        assert!(store.module(halo).unwrap().scale().iter().all(|&c| (0.1..=5.0).contains(&c)));
        for _ in 0..200 {
            engine.on_wheel(&mut store, -1.0);
        }
        assert!(store.module(halo).unwrap().scale().iter().all(|&c| (0.1..=5.0).contains(&c)));
    }

    #[test]
    fn test_drag_of_cleared_module_ends() {
        let mut store = SceneStore::default();
        let manager = ConnectionManager::new();
        let mut engine = engine();
        add(&mut store, ModuleType::Halo);

        let (sx, sy) = pixel(0.0, 0.0);
        engine.on_pointer_down(&mut store, sx, sy);
        store.remove_all_modules();

        assert!(!engine.on_pointer_move(&mut store, &manager, 10.0, 10.0));
        assert_eq!(engine.state(), InteractionState::Idle);
    }
}
