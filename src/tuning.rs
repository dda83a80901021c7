//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. The
//! defaults reproduce the shipped game; a JSON override may change any subset
//! of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning table is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lane count must be at least 1")]
    NoLanes,
    #[error("viewport must be positive, got {width}x{height}")]
    NonPositiveViewport { width: f32, height: f32 },
    #[error("lane width {lane_width} cannot fit an entity {entity_width} wide")]
    LaneTooNarrow { lane_width: f32, entity_width: f32 },
    #[error("spawn interval must start at or above its floor (start {start}, floor {floor})")]
    InvalidSpawnInterval { start: f32, floor: f32 },
    #[error("bomb charges start at {start} but are capped at {max}")]
    InvalidBombCap { start: u8, max: u8 },
    #[error("bomb roll window [{min}, {max}) is empty or negative")]
    InvalidBombRollWindow { min: f32, max: f32 },
    #[error("frame step must be positive, got {0}")]
    NonPositiveFrameDt(f32),
    #[error("{field} must be a non-negative duration, got {value}")]
    NegativeDuration { field: &'static str, value: f32 },
    #[error("{field} must be a non-negative rate, got {value}")]
    NegativeRate { field: &'static str, value: f32 },
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub lane_count: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Simulated seconds per frame (invincibility countdown step)
    pub frame_dt: f32,

    // === Player ===
    pub player_width_ratio: f32,
    pub player_height: f32,
    /// Distance from the bottom of the viewport to the player's top edge
    pub player_bottom_offset: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// No obstacles spawn until this many frames have run
    pub obstacle_grace_frames: u64,
    /// Frames between spawns at t=0
    pub spawn_interval_start: f32,
    /// Frames removed from the interval per second survived
    pub spawn_interval_slope: f32,
    pub spawn_interval_floor: f32,
    /// Units per frame at t=0
    pub obstacle_base_speed: f32,
    /// Fractional speed gained per second survived
    pub obstacle_speed_ramp: f32,

    // === Items ===
    pub item_size: f32,
    pub item_speed: f32,
    /// Seconds between star spawns
    pub star_period: f32,
    /// Seconds before the first bomb roll is scheduled (0 puts the first
    /// roll inside the first `[bomb_roll_min, bomb_roll_max)` window)
    pub bomb_grace: f32,
    /// Bomb rolls happen every [min, max) seconds
    pub bomb_roll_min: f32,
    pub bomb_roll_max: f32,
    /// Chance a bomb roll actually spawns a bomb item
    pub bomb_spawn_chance: f64,

    // === Power-ups ===
    pub invincibility_duration: f32,
    pub bomb_start_charges: u8,
    pub bomb_max_charges: u8,
    pub detonation_duration: f32,
    pub shockwave_max_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            frame_dt: FRAME_DT,

            player_width_ratio: PLAYER_WIDTH_RATIO,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_grace_frames: 30,
            spawn_interval_start: 30.0,
            spawn_interval_slope: 0.6,
            spawn_interval_floor: 5.0,
            obstacle_base_speed: 2.0,
            obstacle_speed_ramp: 0.05,

            item_size: ITEM_SIZE,
            item_speed: ITEM_SPEED,
            star_period: 60.0,
            bomb_grace: 0.0,
            bomb_roll_min: 15.0,
            bomb_roll_max: 16.0,
            bomb_spawn_chance: 0.5,

            invincibility_duration: INVINCIBILITY_DURATION,
            bomb_start_charges: BOMB_START_CHARGES,
            bomb_max_charges: BOMB_MAX_CHARGES,
            detonation_duration: DETONATION_DURATION,
            shockwave_max_radius: SHOCKWAVE_MAX_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Width of a single lane
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.viewport_width / self.lane_count as f32
    }

    /// Check cross-field constraints the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_count == 0 {
            return Err(TuningError::NoLanes);
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(TuningError::NonPositiveViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }

        let lane_width = self.lane_width();
        let widest = self.obstacle_width.max(self.item_size);
        if widest > lane_width {
            return Err(TuningError::LaneTooNarrow {
                lane_width,
                entity_width: widest,
            });
        }

        if self.spawn_interval_floor < 1.0 || self.spawn_interval_start < self.spawn_interval_floor {
            return Err(TuningError::InvalidSpawnInterval {
                start: self.spawn_interval_start,
                floor: self.spawn_interval_floor,
            });
        }

        if self.bomb_start_charges > self.bomb_max_charges {
            return Err(TuningError::InvalidBombCap {
                start: self.bomb_start_charges,
                max: self.bomb_max_charges,
            });
        }

        if self.bomb_roll_min <= 0.0 || self.bomb_roll_max <= self.bomb_roll_min {
            return Err(TuningError::InvalidBombRollWindow {
                min: self.bomb_roll_min,
                max: self.bomb_roll_max,
            });
        }

        // Written as `!(x > 0)` so NaN is rejected too
        if !(self.frame_dt > 0.0 && self.frame_dt.is_finite()) {
            return Err(TuningError::NonPositiveFrameDt(self.frame_dt));
        }

        for (field, value) in [
            ("invincibility_duration", self.invincibility_duration),
            ("detonation_duration", self.detonation_duration),
            ("star_period", self.star_period),
            ("bomb_grace", self.bomb_grace),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::NegativeDuration { field, value });
            }
        }

        for (field, value) in [
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("obstacle_speed_ramp", self.obstacle_speed_ramp),
            ("spawn_interval_slope", self.spawn_interval_slope),
            ("item_speed", self.item_speed),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TuningError::NegativeRate { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.lane_count, 5);
        assert!((tuning.lane_width() - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lane_count": 4, "viewport_width": 320.0 }"#).unwrap();
        assert_eq!(tuning.lane_count, 4);
        assert_eq!(tuning.bomb_max_charges, 5);
        assert!((tuning.star_period - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_zero_lanes() {
        let err = Tuning::from_json(r#"{ "lane_count": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NoLanes));
    }

    #[test]
    fn test_rejects_narrow_lanes() {
        let err = Tuning::from_json(r#"{ "lane_count": 20 }"#).unwrap_err();
        assert!(matches!(err, TuningError::LaneTooNarrow { .. }));
    }

    #[test]
    fn test_rejects_bad_bomb_cap() {
        let tuning = Tuning {
            bomb_start_charges: 6,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidBombCap { start: 6, max: 5 })
        ));
    }

    #[test]
    fn test_rejects_zero_frame_dt() {
        let err = Tuning::from_json(r#"{ "frame_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonPositiveFrameDt(dt) if dt == 0.0));

        let tuning = Tuning {
            frame_dt: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NonPositiveFrameDt(_))));
    }

    #[test]
    fn test_rejects_negative_durations() {
        let err = Tuning::from_json(r#"{ "invincibility_duration": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NegativeDuration {
                field: "invincibility_duration",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "detonation_duration": -0.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NegativeDuration {
                field: "detonation_duration",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_or_nan_rates() {
        let err = Tuning::from_json(r#"{ "obstacle_base_speed": -2.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NegativeRate {
                field: "obstacle_base_speed",
                ..
            }
        ));

        for tuning in [
            Tuning {
                obstacle_speed_ramp: f32::NAN,
                ..Default::default()
            },
            Tuning {
                spawn_interval_slope: -0.6,
                ..Default::default()
            },
            Tuning {
                item_speed: f32::INFINITY,
                ..Default::default()
            },
        ] {
            assert!(matches!(tuning.validate(), Err(TuningError::NegativeRate { .. })));
        }
    }

    #[test]
    fn test_zero_durations_are_allowed() {
        let tuning = Tuning {
            detonation_duration: 0.0,
            bomb_grace: 0.0,
            obstacle_speed_ramp: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ lane_count: }").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }
}
