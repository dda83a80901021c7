//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod lane;
pub mod power;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use difficulty::{obstacle_speed, spawn_interval, spawn_interval_frames};
pub use entities::{Advance, EntityRegistry};
pub use lane::{LaneBounds, centered_x, lane_bounds};
pub use power::Shockwave;
pub use snapshot::{PlayerView, Snapshot};
pub use state::{
    BoxColor, Detonation, DetonationToken, GameEvent, GamePhase, Item, ItemKind, Obstacle, Player,
    Simulation,
};
pub use tick::tick;
