//! Entity spawning
//!
//! Hazards enter just outside a random arena edge aimed at the player's
//! current position; pickups appear inside the arena interior. Both are
//! driven by accumulator timers in the tick, so a stall produces at most
//! one spawn per step.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Hazard, Pickup, PickupKind};
use crate::consts::*;

/// Spawn a hazard just outside a uniformly random edge, moving toward the
/// player's position at this instant. Hazards never retarget.
pub fn spawn_hazard(state: &mut GameState, speed: f32) {
    let edge = state.rng.random_range(0..4);
    let along = state.rng.random_range(0.0..ARENA_SIZE);
    let pos = match edge {
        0 => Vec2::new(along, -HAZARD_SPAWN_OFFSET),
        1 => Vec2::new(ARENA_SIZE + HAZARD_SPAWN_OFFSET, along),
        2 => Vec2::new(along, ARENA_SIZE + HAZARD_SPAWN_OFFSET),
        _ => Vec2::new(-HAZARD_SPAWN_OFFSET, along),
    };
    let dir = (state.player.pos - pos).normalize_or_zero();
    let radius = state
        .rng
        .random_range(HAZARD_MIN_RADIUS..HAZARD_MAX_RADIUS);
    state.hazards.push(Hazard {
        pos,
        vel: dir * speed,
        radius,
    });
}

/// Spawn a pickup at a uniformly random interior position; kind decided by
/// a fair coin flip.
pub fn spawn_pickup(state: &mut GameState) {
    let x = state
        .rng
        .random_range(PICKUP_MARGIN..ARENA_SIZE - PICKUP_MARGIN);
    let y = state
        .rng
        .random_range(PICKUP_MARGIN..ARENA_SIZE - PICKUP_MARGIN);
    let kind = if state.rng.random::<bool>() {
        PickupKind::Shield
    } else {
        PickupKind::Boost
    };
    state.pickups.push(Pickup {
        pos: Vec2::new(x, y),
        radius: PICKUP_RADIUS,
        kind,
    });
}
