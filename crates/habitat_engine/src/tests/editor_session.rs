//! Editor sessions against the headless backend

use crate::prelude::*;
use crate::evaluation::evaluate;
use crate::scene::SceneStore;
use approx::assert_relative_eq;

fn editor() -> HabitatEditor<HeadlessBackend> {
    HabitatEditor::new(EditorConfig::default(), HeadlessBackend::new()).unwrap()
}

fn generate(editor: &mut HabitatEditor<HeadlessBackend>, module_type: ModuleType) -> ModuleId {
    editor.select_module_type(module_type).unwrap();
    editor.generate_module(SizeParams::default()).unwrap()
}

/// Canvas pixel of world (x, z) on the default 800x600 canvas
fn pixel(x: f32, z: f32) -> (f32, f32) {
    ((x + 5.0) * 80.0, (z + 5.0) * 60.0)
}

#[test]
fn test_single_halo_session_scores_fifty() {
    let mut editor = editor();
    generate(&mut editor, ModuleType::Halo);

    let report = editor.evaluate();
    assert_relative_eq!(report.final_score().unwrap(), 50.0, epsilon = 1e-9);
    assert_eq!(report.band(), Some(HabitabilityBand::Critical));
}

#[test]
fn test_clear_matches_fresh_store() {
    let mut editor = editor();
    let halo = generate(&mut editor, ModuleType::Halo);
    let eclss = generate(&mut editor, ModuleType::Eclss);
    let power = generate(&mut editor, ModuleType::Power);
    editor.connect(halo, 0, eclss, 0).unwrap();
    editor.connect(eclss, 1, power, 0).unwrap();
    editor.select_module(power).unwrap();
    editor.start_render_loop();
    assert!(editor.tick().unwrap());

    assert_eq!(editor.clear_habitat().unwrap(), 3);

    let fresh = SceneStore::default();
    assert_eq!(editor.summary(), fresh.summary());
    assert_eq!(editor.evaluate(), evaluate(&fresh, editor.habitat_context()));
    assert_eq!(editor.store().selected(), None);
    assert_eq!(editor.backend().live_meshes(), 0);
    assert_eq!(editor.backend().live_lines(), 0);

    assert!(editor.store().module(halo).is_none());
    assert!(matches!(
        editor.connect(halo, 1, eclss, 2),
        Err(EditorError::Connection(ConnectionError::UnknownModule { .. }))
    ));
}

#[test]
fn test_spawn_positions_restart_after_clear() {
    let mut editor = editor();
    generate(&mut editor, ModuleType::Halo);
    generate(&mut editor, ModuleType::Halo);
    editor.clear_habitat().unwrap();

    let again = generate(&mut editor, ModuleType::Power);
    assert_eq!(editor.store().module(again).unwrap().position(), Vec3::zeros());
}

#[test]
fn test_drag_keeps_connection_endpoints_attached() {
    let mut editor = editor();
    let halo = generate(&mut editor, ModuleType::Halo);
    let power = generate(&mut editor, ModuleType::Power);
    editor.connect(halo, 1, power, 0).unwrap();
    editor.render_frame().unwrap();

    let (sx, sy) = pixel(0.0, 0.0);
    assert_eq!(editor.pointer_down(sx, sy), Some(halo));
    for step in 1..=4 {
        let (mx, my) = pixel(-0.5 * step as f32, 0.75 * step as f32);
        assert!(editor.pointer_move(mx, my));
        editor.render_frame().unwrap();
    }
    editor.pointer_up();

    let store = editor.store();
    let module = store.module(halo).unwrap();
    assert_relative_eq!(module.position(), Vec3::new(-2.0, 0.0, 3.0), epsilon = 1e-4);

    let connection = store.connections().next().unwrap();
    assert_relative_eq!(
        connection.from().position,
        module.position() + module.port(1).unwrap().local_position(),
        epsilon = 1e-5
    );
    let other = store.module(power).unwrap();
    assert_relative_eq!(
        connection.to().position,
        other.position() + other.port(0).unwrap().local_position(),
        epsilon = 1e-5
    );
    assert_eq!(editor.backend().live_lines(), 1);
    assert_eq!(editor.backend().line_updates(), 4);
}

#[test]
fn test_wheel_resizes_only_the_selected_module() {
    let mut editor = editor();
    let halo = generate(&mut editor, ModuleType::Halo);
    let power = generate(&mut editor, ModuleType::Power);

    assert_eq!(editor.wheel(1.0), None);

    let (sx, sy) = pixel(4.0, 0.0);
    assert_eq!(editor.pointer_down(sx, sy), Some(power));
    editor.pointer_up();
    for _ in 0..60 {
        editor.wheel(1.0);
    }

    assert_relative_eq!(editor.store().module(power).unwrap().scale(), Vec3::new(5.0, 5.0, 5.0));
    assert_relative_eq!(editor.store().module(halo).unwrap().scale(), Vec3::new(1.0, 1.0, 1.0));

    for _ in 0..60 {
        editor.wheel(-1.0);
    }
    assert_relative_eq!(editor.store().module(power).unwrap().scale(), Vec3::new(0.1, 0.1, 0.1));
}

#[test]
fn test_click_on_empty_ground_deselects() {
    let mut editor = editor();
    let halo = generate(&mut editor, ModuleType::Halo);
    editor.select_module(halo).unwrap();

    let (sx, sy) = pixel(-4.0, -4.0);
    assert_eq!(editor.pointer_down(sx, sy), None);
    assert_eq!(editor.store().selected(), None);

    editor.render_frame().unwrap();
    assert_eq!(editor.backend().last_frame().highlighted, 0);
}

#[test]
fn test_connection_rules_through_editor() {
    let mut editor = editor();
    let hub = generate(&mut editor, ModuleType::Halo);
    let spokes: Vec<ModuleId> = (0..3).map(|_| generate(&mut editor, ModuleType::Eclss)).collect();

    editor.connect(hub, 0, spokes[0], 0).unwrap();
    editor.connect(hub, 1, spokes[1], 0).unwrap();
    // HALO has two ports, so the third spoke trips port validation first
    assert!(matches!(
        editor.connect(hub, 2, spokes[2], 0),
        Err(EditorError::Connection(ConnectionError::InvalidPort { .. }))
    ));
    assert!(matches!(
        editor.connect(spokes[0], 1, hub, 0),
        Err(EditorError::Connection(ConnectionError::AlreadyConnected))
    ));
    assert_eq!(editor.summary().total_connections, 2);
}

#[test]
fn test_stopped_loop_draws_nothing() {
    let mut editor = editor();
    generate(&mut editor, ModuleType::Halo);

    assert!(!editor.tick().unwrap());
    editor.start_render_loop();
    assert!(editor.tick().unwrap());
    editor.stop_render_loop();
    assert!(!editor.tick().unwrap());
    assert_eq!(editor.backend().frames_drawn(), 1);
}
