//! Polled input boundary
//!
//! The host collects key/pointer events asynchronously and hands the sim
//! one snapshot per step; the sim reads it once at the start of the step.

use glam::Vec2;

/// Latest input state, read once per simulation step
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Absolute pointer target in arena coordinates, present only when the
    /// pointer moved since the previous step
    pub pointer: Option<Vec2>,
}

impl InputSnapshot {
    /// True if any directional key is held (selects directional movement
    /// even when opposing keys cancel out)
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Unit direction from held keys, or zero when they cancel
    pub fn direction(&self) -> Vec2 {
        let x = (self.right as i32 - self.left as i32) as f32;
        let y = (self.down as i32 - self.up as i32) as f32;
        Vec2::new(x, y).normalize_or_zero()
    }
}
