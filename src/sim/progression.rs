//! Difficulty progression
//!
//! Pure functions of elapsed survival time. Nothing else reads or writes
//! the clock; the tick advances it and feeds it back in here.

use crate::consts::*;

/// Danger multiplier: linear ramp from 1x, capped at [`DANGER_CAP`]
pub fn danger(elapsed: f32) -> f32 {
    (1.0 + elapsed / DANGER_RAMP_SECS).min(DANGER_CAP)
}

/// Hazard spawn interval in milliseconds, shrinking with survival time
pub fn hazard_spawn_interval_ms(elapsed: f32) -> f32 {
    (HAZARD_SPAWN_START_MS - elapsed * HAZARD_SPAWN_RAMP).max(HAZARD_SPAWN_MIN_MS)
}

/// Player movement speed at a given danger level (px/s)
pub fn player_speed(danger: f32) -> f32 {
    PLAYER_BASE_SPEED + danger * PLAYER_DANGER_SPEED
}

/// Hazard launch speed at a given danger level (px/s)
pub fn hazard_speed(danger: f32) -> f32 {
    HAZARD_BASE_SPEED + danger * HAZARD_DANGER_SPEED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danger_ramp() {
        assert_eq!(danger(0.0), 1.0);
        assert_eq!(danger(12.0), 2.0);
        assert_eq!(danger(60.0), 6.0);
        // Capped from 60s onward
        assert_eq!(danger(61.0), 6.0);
        assert_eq!(danger(600.0), 6.0);
    }

    #[test]
    fn test_spawn_interval_shortens_and_floors() {
        assert_eq!(hazard_spawn_interval_ms(0.0), 1200.0);
        assert_eq!(hazard_spawn_interval_ms(10.0), 750.0);
        // Floor reached at ~18.9s
        assert_eq!(hazard_spawn_interval_ms(30.0), 350.0);
        assert_eq!(hazard_spawn_interval_ms(1000.0), 350.0);
    }

    #[test]
    fn test_speeds_scale_with_danger() {
        assert_eq!(player_speed(1.0), 234.0);
        assert_eq!(hazard_speed(1.0), 130.0);
        assert!(hazard_speed(6.0) > hazard_speed(1.0));
    }
}
