//! Input handling
//!
//! Canvas pointer tracking and the interaction state machine that turns
//! pointer and wheel events into selection, drag and resize operations.

pub mod interaction;
pub mod picking;

pub use interaction::{hit_test, pick, InteractionEngine, InteractionState, CYLINDER_PICK_RADIUS};
pub use picking::PointerState;
