//! Horizontal camera window over the world
//!
//! The simulation owns the camera offset; this only turns it into canvas
//! bounds and culls what falls outside.

use crate::core::types::Position;
use crate::simulation::constants::{VIEWPORT_WIDTH, WORLD_HEIGHT};

/// Slack around the viewport for partially visible sprites
pub const CULL_MARGIN: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World x of the left edge
    pub left: f32,
    pub width: f32,
}

impl Viewport {
    pub fn new(camera_x: f32) -> Self {
        Self {
            left: camera_x,
            width: VIEWPORT_WIDTH,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Canvas x bounds (world units)
    pub fn x_bounds(&self) -> [f64; 2] {
        [self.left as f64, self.right() as f64]
    }

    /// Canvas y bounds; the whole world height is always shown
    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, WORLD_HEIGHT as f64]
    }

    /// True if anything within `margin` of `x` would land on screen
    pub fn contains_x(&self, x: f32, margin: f32) -> bool {
        x >= self.left - margin && x <= self.right() + margin
    }

    /// World position to canvas point
    ///
    /// World y grows downward; canvas y grows upward.
    pub fn to_canvas(&self, position: Position) -> (f64, f64) {
        (position.x as f64, (WORLD_HEIGHT - position.y) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_camera() {
        let viewport = Viewport::new(500.0);
        assert_eq!(viewport.x_bounds(), [500.0, 1700.0]);
        assert_eq!(viewport.y_bounds(), [0.0, 800.0]);
    }

    #[test]
    fn test_contains_x_with_margin() {
        let viewport = Viewport::new(0.0);
        assert!(viewport.contains_x(-150.0, CULL_MARGIN));
        assert!(!viewport.contains_x(-250.0, CULL_MARGIN));
        assert!(viewport.contains_x(1300.0, CULL_MARGIN));
        assert!(!viewport.contains_x(1300.0, 0.0));
    }

    #[test]
    fn test_to_canvas_flips_y() {
        let viewport = Viewport::new(0.0);
        assert_eq!(viewport.to_canvas(Position::new(10.0, 0.0)), (10.0, 800.0));
        assert_eq!(viewport.to_canvas(Position::new(10.0, 800.0)), (10.0, 0.0));
    }
}
