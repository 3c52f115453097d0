//! # Core Editor Module
//!
//! Shared configuration used by every editor subsystem.

pub mod config;

pub use config::{
    CanvasConfig,
    Config,
    ConfigError,
    EditorConfig,
    GeometryConfig,
    HabitatConfig,
    PlacementConfig,
};
