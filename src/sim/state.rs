//! Run state and core simulation types
//!
//! Everything that is run-scoped lives here, owned by the loop controller
//! and mutated only by the simulation step.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No simulation advance; HUD shows zeroed stats
    Idle,
    /// Active survival run
    Running,
    /// Player was struck without shield; nothing advances
    Over,
}

/// The controllable entity. Exactly one per run.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Player {
    fn at_center() -> Self {
        Self {
            pos: Vec2::splat(ARENA_SIZE / 2.0),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
        }
    }
}

/// A player-seeking hazard. Aims at the player once, at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Pickup flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Shield,
    Boost,
}

/// A time-limited collectible
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PickupKind,
}

/// Transient feedback ring left behind by a collected pickup
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    pub pos: Vec2,
    pub radius: f32,
    /// Remaining lifetime in seconds; discarded at <= 0
    pub life: f32,
}

/// Domain events raised by a simulation step, consumed by the loop
/// controller for audio cues and persistence. The sim itself never touches
/// a platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShieldCollected,
    BoostCollected,
    /// Hazard struck a shielded player and was thrown out of the arena
    ShieldedHit,
    /// Hazard struck an unshielded player; the run is over
    RunEnded,
}

/// Complete run-scoped simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Last known pointer target in arena coordinates
    pub pointer: Vec2,
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub pulses: Vec<Pulse>,
    /// Score accumulator; displayed floored
    pub score: f32,
    /// Elapsed survival time in seconds
    pub elapsed: f32,
    /// Shield time remaining, clamped to [0, SHIELD_MAX]
    pub shield: f32,
    /// Screen-flash intensity in [0, 1], decaying
    pub flash: f32,
    /// Spawn accumulators (milliseconds)
    pub hazard_spawn_ms: f32,
    pub pickup_spawn_ms: f32,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh state with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            player: Player::at_center(),
            pointer: Vec2::splat(ARENA_SIZE / 2.0),
            hazards: Vec::new(),
            pickups: Vec::new(),
            pulses: Vec::new(),
            score: 0.0,
            elapsed: 0.0,
            shield: 0.0,
            flash: 0.0,
            hazard_spawn_ms: 0.0,
            pickup_spawn_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Clear all run-scoped state back to Idle. The RNG stream continues so
    /// consecutive runs differ.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.player = Player::at_center();
        self.pointer = Vec2::splat(ARENA_SIZE / 2.0);
        self.hazards.clear();
        self.pickups.clear();
        self.pulses.clear();
        self.score = 0.0;
        self.elapsed = 0.0;
        self.shield = 0.0;
        self.flash = 0.0;
        self.hazard_spawn_ms = 0.0;
        self.pickup_spawn_ms = 0.0;
    }

    /// Score as displayed
    pub fn display_score(&self) -> u32 {
        self.score.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_run_state() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::Running;
        state.score = 450.7;
        state.shield = 2.0;
        state.hazards.push(Hazard {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            radius: 12.0,
        });
        state.reset();

        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.hazards.is_empty());
        assert!(state.pickups.is_empty());
        assert!(state.pulses.is_empty());
        assert_eq!(state.score, 0.0);
        assert_eq!(state.shield, 0.0);
        assert_eq!(state.player.pos, Vec2::splat(ARENA_SIZE / 2.0));
    }

    #[test]
    fn test_display_score_floors() {
        let mut state = GameState::new(7);
        state.score = 129.93;
        assert_eq!(state.display_score(), 129);
    }
}
