//! Pointer state for picking operations
//!
//! Converts canvas pixel coordinates to the editor's ground plane.

use crate::foundation::math::Vec3;

/// Half-width of the visible ground area in world units
const WORLD_HALF_EXTENT: f32 = 5.0;

/// Pointer state for picking operations
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Current canvas-space X position (pixels from left)
    pub screen_x: f32,
    /// Current canvas-space Y position (pixels from top)
    pub screen_y: f32,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Whether the primary button is held down
    pub button_down: bool,
}

impl PointerState {
    /// Create a pointer state for a canvas of the given size
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            canvas_width,
            canvas_height,
            button_down: false,
        }
    }

    /// Map the current pointer position onto the ground plane (Y = 0)
    ///
    /// `world_x = screen_x / width * 10 - 5`, `world_z = screen_y / height * 10 - 5`.
    ///
    /// # Known limitation
    /// This is a fixed linear mapping of the canvas onto a 10×10 patch around
    /// the origin. It ignores the camera's perspective projection, so picks
    /// drift away from the drawn modules towards the canvas edges.
    pub fn screen_to_world(&self) -> Vec3 {
        let width = self.canvas_width.max(1) as f32;
        let height = self.canvas_height.max(1) as f32;
        let x = (self.screen_x / width) * WORLD_HALF_EXTENT * 2.0 - WORLD_HALF_EXTENT;
        let z = (self.screen_y / height) * WORLD_HALF_EXTENT * 2.0 - WORLD_HALF_EXTENT;
        Vec3::new(x, 0.0, z)
    }

    /// Update pointer position from canvas events
    pub fn update_position(&mut self, x: f32, y: f32) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update canvas size
    ///
    /// Call whenever the canvas is resized so the mapping stays proportional.
    pub fn update_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Record a button press at the given position
    pub fn press(&mut self, x: f32, y: f32) {
        self.update_position(x, y);
        self.button_down = true;
    }

    /// Record a button release
    pub fn release(&mut self) {
        self.button_down = false;
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_to_world_center() {
        let mut pointer = PointerState::new(800, 600);
        pointer.update_position(400.0, 300.0);
        assert_relative_eq!(pointer.screen_to_world(), Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_screen_to_world_corners() {
        let mut pointer = PointerState::new(1000, 500);
        pointer.update_position(0.0, 0.0);
        assert_relative_eq!(pointer.screen_to_world(), Vec3::new(-5.0, 0.0, -5.0));

        pointer.update_position(1000.0, 500.0);
        assert_relative_eq!(pointer.screen_to_world(), Vec3::new(5.0, 0.0, 5.0));

        pointer.update_position(750.0, 100.0);
        assert_relative_eq!(pointer.screen_to_world(), Vec3::new(2.5, 0.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_sized_canvas_stays_finite() {
        let mut pointer = PointerState::new(0, 0);
        pointer.update_position(10.0, 10.0);
        let world = pointer.screen_to_world();
        assert!(world.x.is_finite() && world.z.is_finite());
    }
}
