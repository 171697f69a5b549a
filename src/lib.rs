//! Void Drift - an arena survival game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, spawning, progression)
//! - `engine`: Frame loop controller and run lifecycle
//! - `audio`: Procedural synthesis, sound cues, music sequencers
//! - `render`: Snapshot/HUD contracts consumed by the platform
//! - `persistence`: Best-score storage boundary
//! - `settings`: Audio preferences

pub mod audio;
pub mod engine;
pub mod input;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use input::InputSnapshot;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena side length (the arena is a fixed square)
    pub const ARENA_SIZE: f32 = 480.0;
    /// Hard cap on per-frame simulation delta (seconds); bounds the work
    /// done after a tab suspension or scheduling stall
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 12.0;
    /// Clamp margin keeping the player inside the arena walls
    pub const WALL_MARGIN: f32 = 16.0;
    pub const PLAYER_BASE_SPEED: f32 = 220.0;
    /// Extra player speed per danger unit
    pub const PLAYER_DANGER_SPEED: f32 = 14.0;
    /// Pointer pursuit gain: velocity = displacement * gain
    pub const POINTER_GAIN: f32 = 4.0;

    /// Hazard defaults
    pub const HAZARD_BASE_SPEED: f32 = 110.0;
    /// Extra hazard speed per danger unit
    pub const HAZARD_DANGER_SPEED: f32 = 20.0;
    pub const HAZARD_MIN_RADIUS: f32 = 10.0;
    pub const HAZARD_MAX_RADIUS: f32 = 16.0;
    /// Hazards spawn this far outside their edge
    pub const HAZARD_SPAWN_OFFSET: f32 = 20.0;
    /// Hazards are culled once past the arena bounds by this much
    pub const HAZARD_CULL_MARGIN: f32 = 40.0;

    /// Spawn cadence (milliseconds)
    pub const HAZARD_SPAWN_START_MS: f32 = 1200.0;
    pub const HAZARD_SPAWN_MIN_MS: f32 = 350.0;
    /// Spawn interval shrinks this many ms per survived second
    pub const HAZARD_SPAWN_RAMP: f32 = 45.0;
    pub const PICKUP_SPAWN_MS: f32 = 4200.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 8.0;
    /// Pickups spawn inset from every arena edge
    pub const PICKUP_MARGIN: f32 = 40.0;
    /// Collection slack added to the sum of radii
    pub const PICKUP_GRAB_SLACK: f32 = 4.0;

    /// Shield
    pub const SHIELD_MAX: f32 = 6.0;
    pub const SHIELD_PICKUP_GAIN: f32 = 3.5;
    pub const SHIELD_HIT_COST: f32 = 1.5;

    /// Scoring (points per second, plus flat boost bonus)
    pub const SCORE_RATE: f32 = 10.0;
    pub const SCORE_RATE_SHIELDED: f32 = 14.0;
    pub const BOOST_BONUS: f32 = 120.0;

    /// Danger ramp: 1x at t=0, +1x every 12 s, capped
    pub const DANGER_CAP: f32 = 6.0;
    pub const DANGER_RAMP_SECS: f32 = 12.0;

    /// Pulse ring growth (px/s)
    pub const PULSE_GROWTH: f32 = 120.0;
    /// Pulse spawned by a collected shield pickup
    pub const SHIELD_PULSE_RADIUS: f32 = 14.0;
    pub const SHIELD_PULSE_LIFE: f32 = 0.35;
    /// Pulse spawned by a collected boost pickup
    pub const BOOST_PULSE_RADIUS: f32 = 12.0;
    pub const BOOST_PULSE_LIFE: f32 = 0.25;
    /// Screen-flash intensity set on a shielded hit / on game over
    pub const FLASH_SHIELDED_HIT: f32 = 0.15;
    pub const FLASH_GAME_OVER: f32 = 0.4;

    /// HUD emission throttle (ms of wall time, independent of sim delta)
    pub const HUD_INTERVAL_MS: f64 = 180.0;
}
