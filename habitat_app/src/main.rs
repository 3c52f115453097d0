//! Habitat editor demo
//!
//! Drives a scripted editor session against the headless backend: builds a
//! small habitat, docks the modules, drags and resizes one of them, prints
//! the summary and evaluation, then clears everything.
//!
//! Usage: `habitat_demo [config.toml|config.ron]`

use habitat_engine::config::ConfigError;
use habitat_engine::core::CanvasConfig;
use habitat_engine::foundation::logging;
use habitat_engine::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

fn load_config() -> Result<EditorConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = EditorConfig::load_from_file(&path)?;
            config.validate()?;
            Ok(config)
        }
        None => Ok(EditorConfig::default()),
    }
}

/// Canvas pixel of a ground-plane point for the configured canvas
fn to_pixel(canvas: CanvasConfig, x: f32, z: f32) -> (f32, f32) {
    let width = canvas.width as f32;
    let height = canvas.height as f32;
    ((x + 5.0) / 10.0 * width, (z + 5.0) / 10.0 * height)
}

fn print_state(editor: &HabitatEditor<HeadlessBackend>) {
    let summary = editor.summary();
    println!(
        "Modules: {}  Volume: {} m³  Capacity: {}  Connections: {}",
        summary.module_count, summary.total_volume, summary.total_capacity, summary.total_connections
    );
    println!("{}", editor.evaluate());
}

fn run(config: EditorConfig) -> Result<(), DemoError> {
    let mut editor = HabitatEditor::new(config, HeadlessBackend::new())?;
    editor.start_render_loop();

    let mut placed = Vec::new();
    for module_type in [ModuleType::Halo, ModuleType::Eclss, ModuleType::Power, ModuleType::Halo] {
        editor.select_module_type(module_type)?;
        placed.push(editor.generate_default_module()?);
        editor.tick()?;
    }

    editor.connect(placed[0], 0, placed[1], 0)?;
    editor.connect(placed[1], 1, placed[2], 0)?;
    editor.connect(placed[3], 0, placed[1], 2)?;
    if let Err(err) = editor.connect(placed[1], 0, placed[0], 1) {
        log::info!("Expected rejection: {err}");
    }
    editor.tick()?;

    // Drag the Power module down and to the left, one step per frame
    let canvas = editor.config().canvas;
    let start_x = editor.config().placement.spawn_spacing * 2.0;
    let (sx, sy) = to_pixel(canvas, start_x, 0.0);
    if editor.pointer_down(sx, sy) == Some(placed[2]) {
        for step in 1..=5 {
            let (mx, my) = to_pixel(canvas, start_x - step as f32, step as f32 * 0.6);
            editor.pointer_move(mx, my);
            editor.tick()?;
        }
        editor.pointer_up();
        for _ in 0..3 {
            editor.wheel(1.0);
        }
        editor.tick()?;
    } else {
        editor.pointer_up();
        log::warn!("Power module not under the pointer; skipping drag");
    }

    print_state(&editor);

    editor.set_habitat(Habitat::Mars);
    editor.set_crew_count(6);
    println!("-- Mars, crew of 6 --");
    print_state(&editor);

    let removed = editor.clear_habitat()?;
    editor.tick()?;
    editor.stop_render_loop();
    println!("-- Cleared {removed} modules --");
    print_state(&editor);

    log::info!(
        "Session finished after {} frames ({} meshes, {} lines still live)",
        editor.backend().frames_drawn(),
        editor.backend().live_meshes(),
        editor.backend().live_lines()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    if let Err(e) = logging::init_with_level(&config.log_level) {
        eprintln!("Logger already initialised: {e}");
    }
    log::info!("Starting habitat editor demo");

    match run(config) {
        Ok(()) => {
            log::info!("Demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Demo failed: {e}");
            Err(e.into())
        }
    }
}
