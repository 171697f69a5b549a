//! Output contracts of the simulation core
//!
//! The loop controller emits a world snapshot to the render sink once per
//! step (at whatever rate frames arrive) and a HUD frame at a throttled
//! cadence. Sinks only read; they never touch simulation state.

use crate::sim::{Hazard, Pickup, Player, Pulse};

/// Read-only view of the world at the end of a step
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub hazards: &'a [Hazard],
    pub pickups: &'a [Pickup],
    pub pulses: &'a [Pulse],
    pub shield_active: bool,
    /// Screen-flash intensity in [0, 1]
    pub flash: f32,
    pub arena_size: f32,
}

/// Paints the world. Must tolerate being called at uncapped frequency.
pub trait RenderSink {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// Stats panel payload, emitted at most once per HUD interval
#[derive(Debug, Clone, PartialEq)]
pub struct HudFrame {
    pub score: u32,
    /// Whole survival seconds
    pub time: u32,
    pub best: u32,
    pub danger: f32,
    pub status: &'static str,
}

pub trait HudSink {
    fn update(&mut self, hud: &HudFrame);
}
