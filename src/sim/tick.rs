//! Variable-timestep simulation tick
//!
//! Advances one frame's worth of world state in a fixed order: progression,
//! spawn scheduling, player movement, hazard integration, pickup
//! collisions, shield/flash/pulse decay, hazard collisions, culling.
//! The caller clamps dt before handing it in.

use glam::Vec2;

use super::progression;
use super::spawn::{spawn_hazard, spawn_pickup};
use super::state::{GameEvent, GamePhase, GameState, PickupKind, Pulse};
use crate::consts::*;
use crate::input::InputSnapshot;

/// Advance the world by `dt` seconds. Domain events raised during the step
/// are appended to `events`. Does nothing unless the run is in progress.
pub fn tick(state: &mut GameState, input: &InputSnapshot, dt: f32, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }

    // Latest pointer target, read once up front
    if let Some(pointer) = input.pointer {
        state.pointer = pointer;
    }

    state.elapsed += dt;
    state.score += dt
        * if state.shield > 0.0 {
            SCORE_RATE_SHIELDED
        } else {
            SCORE_RATE
        };

    let danger = progression::danger(state.elapsed);

    // Spawn scheduling: accumulators fire at most once per step and reset
    // to zero rather than subtracting the threshold
    state.hazard_spawn_ms += dt * 1000.0;
    state.pickup_spawn_ms += dt * 1000.0;
    if state.hazard_spawn_ms >= progression::hazard_spawn_interval_ms(state.elapsed) {
        state.hazard_spawn_ms = 0.0;
        spawn_hazard(state, progression::hazard_speed(danger));
    }
    if state.pickup_spawn_ms >= PICKUP_SPAWN_MS {
        state.pickup_spawn_ms = 0.0;
        spawn_pickup(state);
    }

    // Player movement: held keys win over pointer pursuit
    let speed = progression::player_speed(danger);
    if input.any_direction() {
        let dir = input.direction();
        state.player.vel = dir * speed;
        state.player.pos += dir * speed * dt;
        // Park the pointer target on the player so releasing the keys
        // causes no snap-back
        state.pointer = state.player.pos;
    } else {
        let displacement = state.pointer - state.player.pos;
        state.player.vel = displacement * POINTER_GAIN;
        state.player.pos += state.player.vel * dt;
    }
    state.player.pos = state.player.pos.clamp(
        Vec2::splat(WALL_MARGIN),
        Vec2::splat(ARENA_SIZE - WALL_MARGIN),
    );

    // Hazards fly straight at their spawn-time target; no re-aiming
    for hazard in &mut state.hazards {
        hazard.pos += hazard.vel * dt;
    }

    // Pickup collection
    let mut i = 0;
    while i < state.pickups.len() {
        let pickup = state.pickups[i];
        let reach = state.player.radius + pickup.radius + PICKUP_GRAB_SLACK;
        if state.player.pos.distance(pickup.pos) < reach {
            state.pickups.swap_remove(i);
            match pickup.kind {
                PickupKind::Shield => {
                    state.shield = (state.shield + SHIELD_PICKUP_GAIN).min(SHIELD_MAX);
                    state.pulses.push(Pulse {
                        pos: pickup.pos,
                        radius: SHIELD_PULSE_RADIUS,
                        life: SHIELD_PULSE_LIFE,
                    });
                    events.push(GameEvent::ShieldCollected);
                }
                PickupKind::Boost => {
                    state.score += BOOST_BONUS;
                    state.pulses.push(Pulse {
                        pos: pickup.pos,
                        radius: BOOST_PULSE_RADIUS,
                        life: BOOST_PULSE_LIFE,
                    });
                    events.push(GameEvent::BoostCollected);
                }
            }
        } else {
            i += 1;
        }
    }

    // Shield and flash decay linearly, floored at zero
    if state.shield > 0.0 {
        state.shield = (state.shield - dt).max(0.0);
    }
    state.flash = (state.flash - dt).max(0.0);

    // Pulse rings grow while their lifetime drains
    for pulse in &mut state.pulses {
        pulse.radius += PULSE_GROWTH * dt;
        pulse.life -= dt;
    }
    state.pulses.retain(|pulse| pulse.life > 0.0);

    // Hazard collisions
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    for hazard in &mut state.hazards {
        if player_pos.distance(hazard.pos) < player_radius + hazard.radius {
            if state.shield > 0.0 {
                state.shield = (state.shield - SHIELD_HIT_COST).max(0.0);
                // Thrown far off-arena rather than removed mid-scan; the
                // cull pass below sweeps it up
                hazard.pos.x = -200.0;
                state.flash = FLASH_SHIELDED_HIT;
                events.push(GameEvent::ShieldedHit);
            } else {
                state.phase = GamePhase::Over;
                state.flash = FLASH_GAME_OVER;
                events.push(GameEvent::RunEnded);
                break;
            }
        }
    }

    // Cull hazards well past the arena bounds
    state.hazards.retain(|hazard| {
        hazard.pos.x > -HAZARD_CULL_MARGIN
            && hazard.pos.x < ARENA_SIZE + HAZARD_CULL_MARGIN
            && hazard.pos.y > -HAZARD_CULL_MARGIN
            && hazard.pos.y < ARENA_SIZE + HAZARD_CULL_MARGIN
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Hazard, Pickup, PickupKind};
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.phase = GamePhase::Running;
        state
    }

    fn step(state: &mut GameState, input: &InputSnapshot, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        tick(state, input, dt, &mut events);
        events
    }

    #[test]
    fn test_zero_pursuit_delta_at_center() {
        let mut state = running_state();
        // Pointer target identical to the spawn position
        assert_eq!(state.pointer, state.player.pos);
        step(&mut state, &InputSnapshot::default(), 0.016);
        assert_eq!(state.player.pos, Vec2::splat(ARENA_SIZE / 2.0));
    }

    #[test]
    fn test_pointer_pursuit_closes_in() {
        let mut state = running_state();
        state.pointer = Vec2::new(300.0, 240.0);
        let before = state.player.pos;
        step(&mut state, &InputSnapshot::default(), 0.016);
        assert!(state.player.pos.x > before.x);
        assert_eq!(state.player.pos.y, before.y);
        // velocity = displacement * gain
        assert!((state.player.vel.x - (300.0 - before.x) * POINTER_GAIN).abs() < 1e-3);
    }

    #[test]
    fn test_directional_movement_parks_pointer() {
        let mut state = running_state();
        state.pointer = Vec2::new(50.0, 50.0);
        let input = InputSnapshot {
            right: true,
            ..Default::default()
        };
        step(&mut state, &input, 0.016);
        assert!(state.player.pos.x > ARENA_SIZE / 2.0);
        // Releasing the keys must not snap the player back toward the old
        // pointer target
        assert_eq!(state.pointer, state.player.pos);
        let held = state.player.pos;
        step(&mut state, &InputSnapshot::default(), 0.016);
        assert_eq!(state.player.pos, held);
    }

    #[test]
    fn test_opposed_keys_hold_position() {
        let mut state = running_state();
        state.pointer = Vec2::new(50.0, 50.0);
        let input = InputSnapshot {
            left: true,
            right: true,
            ..Default::default()
        };
        step(&mut state, &input, 0.016);
        // Zero direction, but still directional mode: no pointer pursuit
        assert_eq!(state.player.pos, Vec2::splat(ARENA_SIZE / 2.0));
        assert_eq!(state.pointer, state.player.pos);
    }

    #[test]
    fn test_player_clamped_to_walls() {
        let mut state = running_state();
        // Target far outside the arena: the unclamped pursuit jump is legal,
        // the wall clamp is not negotiable
        state.pointer = Vec2::new(-5000.0, 9000.0);
        step(&mut state, &InputSnapshot::default(), 0.05);
        assert_eq!(state.player.pos.x, WALL_MARGIN);
        assert_eq!(state.player.pos.y, ARENA_SIZE - WALL_MARGIN);
    }

    #[test]
    fn test_shield_pickup_caps_at_max() {
        let mut state = running_state();
        state.shield = SHIELD_MAX;
        state.pickups.push(Pickup {
            pos: state.player.pos,
            radius: PICKUP_RADIUS,
            kind: PickupKind::Shield,
        });
        let events = step(&mut state, &InputSnapshot::default(), 0.016);
        assert!(events.contains(&GameEvent::ShieldCollected));
        assert!(state.pickups.is_empty());
        // No overflow past the cap (minus this step's decay)
        assert!(state.shield <= SHIELD_MAX);
        assert!(state.shield >= SHIELD_MAX - 0.016 - 1e-6);
        assert_eq!(state.pulses.len(), 1);
        assert_eq!(state.pulses[0].radius, SHIELD_PULSE_RADIUS + PULSE_GROWTH * 0.016);
    }

    #[test]
    fn test_boost_pickup_adds_flat_bonus() {
        let mut state = running_state();
        state.pickups.push(Pickup {
            pos: state.player.pos,
            radius: PICKUP_RADIUS,
            kind: PickupKind::Boost,
        });
        let events = step(&mut state, &InputSnapshot::default(), 0.016);
        assert!(events.contains(&GameEvent::BoostCollected));
        assert!((state.score - (BOOST_BONUS + SCORE_RATE * 0.016)).abs() < 1e-3);
    }

    #[test]
    fn test_shielded_hit_spends_shield_and_ejects_hazard() {
        let mut state = running_state();
        state.shield = 3.5;
        state.hazards.push(Hazard {
            pos: state.player.pos,
            vel: Vec2::ZERO,
            radius: 12.0,
        });
        let events = step(&mut state, &InputSnapshot::default(), 0.016);
        assert_eq!(events, vec![GameEvent::ShieldedHit]);
        assert_eq!(state.phase, GamePhase::Running);
        // 3.5 - decay - 1.5
        assert!((state.shield - (3.5 - 0.016 - SHIELD_HIT_COST)).abs() < 1e-5);
        assert_eq!(state.flash, FLASH_SHIELDED_HIT);
        // Teleported to x = -200, swept up by the same step's cull pass
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_unshielded_hit_ends_run_exactly_once() {
        let mut state = running_state();
        // Two overlapping hazards; only the first may end the run
        for _ in 0..2 {
            state.hazards.push(Hazard {
                pos: state.player.pos,
                vel: Vec2::ZERO,
                radius: 12.0,
            });
        }
        let events = step(&mut state, &InputSnapshot::default(), 0.016);
        assert_eq!(events, vec![GameEvent::RunEnded]);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.flash, FLASH_GAME_OVER);

        // Nothing advances once the run is over
        let frozen = state.player.pos;
        let events = step(&mut state, &InputSnapshot::default(), 0.016);
        assert!(events.is_empty());
        assert_eq!(state.player.pos, frozen);
    }

    #[test]
    fn test_hazards_never_retarget() {
        let mut state = running_state();
        state.hazards.push(Hazard {
            pos: Vec2::new(100.0, -20.0),
            vel: Vec2::new(0.0, 130.0),
            radius: 10.0,
        });
        // Player runs away; the hazard keeps its spawn-time heading
        let input = InputSnapshot {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            step(&mut state, &input, 0.016);
        }
        assert_eq!(state.hazards[0].vel, Vec2::new(0.0, 130.0));
        assert_eq!(state.hazards[0].pos.x, 100.0);
    }

    #[test]
    fn test_hazard_cull_margin() {
        let mut state = running_state();
        for x in [-41.0, -39.0, ARENA_SIZE + 41.0] {
            state.hazards.push(Hazard {
                pos: Vec2::new(x, 240.0),
                vel: Vec2::ZERO,
                radius: 10.0,
            });
        }
        step(&mut state, &InputSnapshot::default(), 0.0);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].pos.x, -39.0);
    }

    #[test]
    fn test_spawn_accumulator_fires_once_per_step() {
        let mut state = running_state();
        // Drifted far past threshold, as after a long stall
        state.hazard_spawn_ms = 10_000.0;
        step(&mut state, &InputSnapshot::default(), 0.016);
        assert_eq!(state.hazards.len(), 1);
        // Reset to zero, not threshold-subtracted
        assert_eq!(state.hazard_spawn_ms, 0.0);
    }

    #[test]
    fn test_score_rate_rises_while_shielded() {
        let mut state = running_state();
        step(&mut state, &InputSnapshot::default(), 1.0);
        let unshielded = state.score;
        assert!((unshielded - SCORE_RATE).abs() < 1e-4);

        let mut state = running_state();
        state.shield = 3.0;
        step(&mut state, &InputSnapshot::default(), 1.0);
        assert!((state.score - SCORE_RATE_SHIELDED).abs() < 1e-4);
    }

    #[test]
    fn test_pulses_grow_and_expire() {
        let mut state = running_state();
        state.pulses.push(Pulse {
            pos: Vec2::splat(100.0),
            radius: 14.0,
            life: 0.02,
        });
        step(&mut state, &InputSnapshot::default(), 0.016);
        assert_eq!(state.pulses.len(), 1);
        assert!((state.pulses[0].radius - (14.0 + PULSE_GROWTH * 0.016)).abs() < 1e-4);
        step(&mut state, &InputSnapshot::default(), 0.016);
        assert!(state.pulses.is_empty());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            dts in prop::collection::vec(0.0f32..=0.05, 1..40),
            px in -1000.0f32..1500.0,
            py in -1000.0f32..1500.0,
            up in any::<bool>(),
            down in any::<bool>(),
            left in any::<bool>(),
            right in any::<bool>(),
        ) {
            let mut state = running_state();
            let input = InputSnapshot {
                up, down, left, right,
                pointer: Some(Vec2::new(px, py)),
            };
            for dt in dts {
                let mut events = Vec::new();
                tick(&mut state, &input, dt, &mut events);
                prop_assert!(state.player.pos.x >= WALL_MARGIN);
                prop_assert!(state.player.pos.x <= ARENA_SIZE - WALL_MARGIN);
                prop_assert!(state.player.pos.y >= WALL_MARGIN);
                prop_assert!(state.player.pos.y <= ARENA_SIZE - WALL_MARGIN);
                prop_assert!(state.shield >= 0.0 && state.shield <= SHIELD_MAX);
            }
        }

        #[test]
        fn prop_score_is_monotone(dts in prop::collection::vec(0.0f32..=0.05, 1..60)) {
            let mut state = running_state();
            let mut last = state.score;
            for dt in dts {
                let mut events = Vec::new();
                tick(&mut state, &InputSnapshot::default(), dt, &mut events);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
