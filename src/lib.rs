//! Avoid Boxes - a lane-based survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (lanes, entities, spawning, collisions, power-ups)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `renderer`: WebGPU rendering of simulation snapshots

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, Theme};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Assumed display refresh rate the frame-based rules are written against
    pub const FRAMES_PER_SECOND: f32 = 60.0;
    /// Duration of one simulated frame in seconds
    pub const FRAME_DT: f32 = 1.0 / FRAMES_PER_SECOND;

    /// Default number of lanes
    pub const LANE_COUNT: usize = 5;
    /// Default viewport dimensions (game units)
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player marker
    pub const PLAYER_WIDTH_RATIO: f32 = 0.8; // of one lane
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

    /// Falling boxes
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;

    /// Power-up items (stars and bombs)
    pub const ITEM_SIZE: f32 = 30.0;
    pub const ITEM_SPEED: f32 = 2.0;

    /// Bomb economy
    pub const BOMB_START_CHARGES: u8 = 3;
    pub const BOMB_MAX_CHARGES: u8 = 5;
    pub const DETONATION_DURATION: f32 = 0.5;
    pub const SHOCKWAVE_MAX_RADIUS: f32 = 250.0;

    /// Star invincibility (seconds)
    pub const INVINCIBILITY_DURATION: f32 = 6.0;
}
