//! Read-only view of the simulation for rendering and HUD
//!
//! The renderer never touches [`Simulation`] directly; it draws whatever the
//! latest snapshot contains.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::power::{Shockwave, shockwave};
use super::state::{GamePhase, Item, Obstacle, Simulation};

/// Player as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub lane: usize,
    pub invincible: bool,
    pub invincible_remaining: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub elapsed: f32,
    pub frame_count: u64,
    pub boxes_avoided: u32,
    pub bomb_charges: u8,
    pub lane_count: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub player: PlayerView,
    pub obstacles: Vec<Obstacle>,
    pub items: Vec<Item>,
    /// Present while a detonation is in flight
    pub shockwave: Option<Shockwave>,
}

impl Snapshot {
    #[inline]
    pub fn detonating(&self) -> bool {
        self.shockwave.is_some()
    }
}

impl Simulation {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            elapsed: self.elapsed,
            frame_count: self.frame_count,
            boxes_avoided: self.boxes_avoided,
            bomb_charges: self.bomb_charges,
            lane_count: self.tuning.lane_count,
            viewport_width: self.tuning.viewport_width,
            viewport_height: self.tuning.viewport_height,
            player: PlayerView {
                rect: self.player_rect(),
                lane: self.player.lane,
                invincible: self.player.invincible(),
                invincible_remaining: self.player.invincible_remaining,
            },
            obstacles: self.entities.obstacles().to_vec(),
            items: self.entities.items().to_vec(),
            shockwave: shockwave(self),
        }
    }
}
