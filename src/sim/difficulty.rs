//! Difficulty curve: survival time to obstacle speed and spawn cadence

use crate::tuning::Tuning;

/// Obstacle fall speed (units per frame) for boxes spawned at `elapsed` seconds
///
/// Linear ramp: +5% of the base speed per second survived.
#[inline]
pub fn obstacle_speed(tuning: &Tuning, elapsed: f32) -> f32 {
    tuning.obstacle_base_speed * (1.0 + elapsed.max(0.0) * tuning.obstacle_speed_ramp)
}

/// Frames between obstacle spawns at `elapsed` seconds, before rounding
#[inline]
pub fn spawn_interval(tuning: &Tuning, elapsed: f32) -> f32 {
    (tuning.spawn_interval_start - elapsed.max(0.0) * tuning.spawn_interval_slope)
        .max(tuning.spawn_interval_floor)
}

/// Spawn interval rounded to whole frames (never zero)
#[inline]
pub fn spawn_interval_frames(tuning: &Tuning, elapsed: f32) -> u64 {
    (spawn_interval(tuning, elapsed).round() as u64).max(1)
}
