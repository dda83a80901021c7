//! Game state and core simulation types
//!
//! The whole run lives in one owned [`Simulation`] aggregate: no globals, so
//! any number of independent games can coexist (tests rely on this).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entities::EntityRegistry;
use super::lane::centered_x;
use crate::tuning::{Tuning, TuningError};

/// Lifecycle phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing ticks
    #[default]
    Idle,
    /// Active run
    Running,
    /// Run ended by a box hit; terminal until restart or return to idle
    GameOver,
}

/// Notifications for the presentation layer (HUD, game-over panel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Survival time advanced (seconds)
    TimeUpdated(f32),
    /// Bomb charges changed
    BombCountChanged(u8),
    /// Run ended
    GameOver { elapsed: f32, boxes_avoided: u32 },
}

/// Box colour palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxColor {
    Orange,
    Red,
    Navy,
    Purple,
    Grey,
    Teal,
}

impl BoxColor {
    pub const PALETTE: [BoxColor; 6] = [
        BoxColor::Orange,
        BoxColor::Red,
        BoxColor::Navy,
        BoxColor::Purple,
        BoxColor::Grey,
        BoxColor::Teal,
    ];

    /// Linear RGBA for the renderer
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            BoxColor::Orange => [1.0, 0.55, 0.0, 1.0],
            BoxColor::Red => [1.0, 0.27, 0.27, 1.0],
            BoxColor::Navy => [0.12, 0.28, 0.53, 1.0],
            BoxColor::Purple => [0.61, 0.35, 0.71, 1.0],
            BoxColor::Grey => [0.53, 0.53, 0.53, 1.0],
            BoxColor::Teal => [0.13, 0.70, 0.67, 1.0],
        }
    }
}

/// A falling box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Units per frame, fixed at spawn
    pub speed: f32,
    pub color: BoxColor,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Temporary invincibility
    Star,
    /// One extra bomb charge
    Bomb,
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub rect: Rect,
    pub speed: f32,
    pub kind: ItemKind,
}

/// The player's marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current lane, always in `[0, lane_count)`
    pub lane: usize,
    pub width: f32,
    pub height: f32,
    /// Top edge (fixed for the whole run)
    pub y: f32,
    /// Seconds of invincibility left (0 = vulnerable)
    pub invincible_remaining: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane: tuning.lane_count / 2,
            width: tuning.lane_width() * tuning.player_width_ratio,
            height: tuning.player_height,
            y: tuning.viewport_height - tuning.player_bottom_offset,
            invincible_remaining: 0.0,
        }
    }

    #[inline]
    pub fn invincible(&self) -> bool {
        self.invincible_remaining > 0.0
    }

    /// Collision rectangle for the current lane
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        let x = centered_x(self.lane, tuning.lane_count, tuning.viewport_width, self.width);
        Rect::new(x, self.y, self.width, self.height)
    }
}

/// Identifies one detonation of one run
///
/// A completion carrying a token from an earlier run (or an already finished
/// detonation) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetonationToken {
    pub run: u64,
    pub sequence: u64,
}

/// Bomb detonation state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Detonation {
    #[default]
    Idle,
    /// Shockwave expanding; boxes are cleared when it finishes
    Detonating {
        token: DetonationToken,
        /// Survival time at which the bomb was triggered
        started_at: f32,
    },
}

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct Simulation {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Run generation, bumped on every start
    pub run: u64,
    /// Detonations triggered so far in this run
    pub(crate) detonation_sequence: u64,
    /// Timestamp (seconds) the current run started
    pub start_time: f64,
    /// Survival time (seconds)
    pub elapsed: f32,
    pub frame_count: u64,
    pub boxes_avoided: u32,
    pub bomb_charges: u8,
    pub detonation: Detonation,
    /// Survival time of the last star spawn
    pub last_star_spawn: f32,
    /// Survival time of the next bomb-pickup roll, once scheduled
    pub next_bomb_roll: Option<f32>,
    pub player: Player,
    pub entities: EntityRegistry,
    events: Vec<GameEvent>,
}

impl Simulation {
    /// Create an idle simulation from an already validated `tuning`.
    ///
    /// Tables that have not been through [`Tuning::validate`] should go
    /// through [`Simulation::try_new`]; a zero lane count panics here.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "simulation built from invalid tuning");
        let player = Player::new(&tuning);
        let bomb_charges = tuning.bomb_start_charges;
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            run: 0,
            detonation_sequence: 0,
            start_time: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            boxes_avoided: 0,
            bomb_charges,
            detonation: Detonation::Idle,
            last_star_spawn: 0.0,
            next_bomb_roll: None,
            player,
            entities: EntityRegistry::default(),
            events: Vec::new(),
        }
    }

    /// Validate `tuning`, then create an idle simulation
    pub fn try_new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::new(tuning, seed))
    }

    /// Idle simulation with the default balance table
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), seed)
    }

    /// Reset every per-run field to its initial value
    pub(crate) fn reset_run(&mut self) {
        self.elapsed = 0.0;
        self.frame_count = 0;
        self.boxes_avoided = 0;
        self.bomb_charges = self.tuning.bomb_start_charges;
        self.detonation = Detonation::Idle;
        self.detonation_sequence = 0;
        self.last_star_spawn = 0.0;
        self.next_bomb_roll = None;
        self.player = Player::new(&self.tuning);
        self.entities.clear();
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Player collision rectangle
    pub fn player_rect(&self) -> Rect {
        self.player.rect(&self.tuning)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Debug-only invariant checks
    pub(crate) fn check_invariants(&self) {
        debug_assert!(self.player.lane < self.tuning.lane_count);
        debug_assert!(self.player.invincible_remaining >= 0.0);
        debug_assert!(self.bomb_charges <= self.tuning.bomb_max_charges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_simulation_is_idle() {
        let sim = Simulation::with_seed(1);
        assert_eq!(sim.phase, GamePhase::Idle);
        assert_eq!(sim.player.lane, 2);
        assert_eq!(sim.bomb_charges, 3);
        assert!(!sim.player.invincible());
        assert!(sim.entities.obstacles().is_empty());
    }

    #[test]
    fn test_player_rect_centered() {
        let sim = Simulation::with_seed(1);
        let rect = sim.player_rect();
        assert!((rect.width - 64.0).abs() < 1e-4);
        assert!((rect.x - 168.0).abs() < 1e-4);
        assert!((rect.y - 550.0).abs() < 1e-4);
    }

    #[test]
    fn test_palette_colors_distinct() {
        assert_eq!(BoxColor::PALETTE.len(), 6);
        for (i, a) in BoxColor::PALETTE.iter().enumerate() {
            for b in &BoxColor::PALETTE[i + 1..] {
                assert_ne!(a.rgba(), b.rgba());
            }
        }
    }

    #[test]
    fn test_try_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            lane_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::try_new(tuning, 1),
            Err(TuningError::NoLanes)
        ));

        let sim = Simulation::try_new(Tuning::default(), 1).unwrap();
        assert_eq!(sim.phase, GamePhase::Idle);
    }
}
