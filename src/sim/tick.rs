//! Frame driver
//!
//! Lifecycle (`Idle -> Running -> GameOver`), player commands, and the
//! per-frame tick that runs every other component in a fixed order.

use super::collision::{collect_items, first_obstacle_hit};
use super::lane::clamp_lane;
use super::power;
use super::spawner::run_spawners;
use super::state::{DetonationToken, GameEvent, GamePhase, Simulation};

impl Simulation {
    /// Begin a fresh run at timestamp `now` (seconds)
    pub fn start(&mut self, now: f64) {
        self.reset_run();
        self.run += 1;
        self.start_time = now;
        self.phase = GamePhase::Running;
        self.emit(GameEvent::BombCountChanged(self.bomb_charges));
        self.emit(GameEvent::TimeUpdated(0.0));
        log::info!("Run {} started (seed {})", self.run, self.seed);
    }

    /// Same as [`Simulation::start`]; valid from any phase
    pub fn restart(&mut self, now: f64) {
        self.start(now);
    }

    /// Abandon the current run without reporting a game over
    pub fn return_to_idle(&mut self) {
        if self.phase == GamePhase::Running {
            log::info!("Run {} abandoned at {:.1}s", self.run, self.elapsed);
        }
        self.phase = GamePhase::Idle;
        self.detonation = Default::default();
    }

    pub fn move_left(&mut self) {
        self.shift_lane(-1);
    }

    pub fn move_right(&mut self) {
        self.shift_lane(1);
    }

    fn shift_lane(&mut self, delta: isize) {
        if !self.is_running() {
            return;
        }
        let target = self.player.lane as isize + delta;
        self.player.lane = clamp_lane(target, self.tuning.lane_count);
    }

    /// Detonate a bomb; silently ignored without charges, while one is
    /// already in flight, or outside a run
    pub fn trigger_bomb(&mut self) -> Option<DetonationToken> {
        if !self.is_running() {
            return None;
        }
        power::use_bomb(self)
    }

    /// Externally complete a detonation (e.g. from a timer callback)
    pub fn complete_detonation(&mut self, token: DetonationToken) -> bool {
        power::complete_detonation(self, token)
    }
}

/// Advance the simulation by one frame at timestamp `now` (seconds)
pub fn tick(sim: &mut Simulation, now: f64) {
    if sim.phase != GamePhase::Running {
        return;
    }

    sim.elapsed = (now - sim.start_time).max(0.0) as f32;
    sim.frame_count += 1;

    // Movement and pruning
    let advance = sim.entities.advance_and_prune(sim.tuning.viewport_height);
    sim.boxes_avoided += advance.avoided;

    // Power-up timers
    power::update_invincibility(&mut sim.player, sim.tuning.frame_dt);
    power::update_detonation(sim);

    // Lethal collisions
    let player_rect = sim.player_rect();
    if !sim.player.invincible() && first_obstacle_hit(&player_rect, &sim.entities).is_some() {
        end_run(sim);
        return;
    }

    // Pickups
    for kind in collect_items(&player_rect, &mut sim.entities) {
        power::apply_pickup(sim, kind);
    }

    run_spawners(sim);

    sim.emit(GameEvent::TimeUpdated(sim.elapsed));
    sim.check_invariants();
}

fn end_run(sim: &mut Simulation) {
    sim.phase = GamePhase::GameOver;
    sim.emit(GameEvent::GameOver {
        elapsed: sim.elapsed,
        boxes_avoided: sim.boxes_avoided,
    });
    log::info!(
        "Game over after {:.1}s, {} boxes avoided",
        sim.elapsed,
        sim.boxes_avoided
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::collision::Rect;
    use crate::sim::state::{BoxColor, Obstacle};

    fn frame_time(frame: u32) -> f64 {
        frame as f64 * FRAME_DT as f64
    }

    fn box_on_player(sim: &mut Simulation) {
        let rect = sim.player_rect();
        sim.entities.spawn_obstacle(Obstacle {
            rect,
            speed: 0.0,
            color: BoxColor::Red,
        });
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut sim = Simulation::with_seed(1);
        tick(&mut sim, 5.0);
        assert_eq!(sim.frame_count, 0);
        assert_eq!(sim.phase, GamePhase::Idle);
    }

    #[test]
    fn test_start_and_tick() {
        let mut sim = Simulation::with_seed(1);
        sim.start(100.0);
        assert_eq!(sim.phase, GamePhase::Running);
        assert_eq!(
            sim.drain_events(),
            vec![GameEvent::BombCountChanged(3), GameEvent::TimeUpdated(0.0)]
        );

        tick(&mut sim, 101.5);
        assert_eq!(sim.frame_count, 1);
        assert!((sim.elapsed - 1.5).abs() < 1e-5);
        assert_eq!(sim.drain_events(), vec![GameEvent::TimeUpdated(sim.elapsed)]);
    }

    #[test]
    fn test_lane_clamping() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        for _ in 0..10 {
            sim.move_left();
        }
        assert_eq!(sim.player.lane, 0);
        for _ in 0..10 {
            sim.move_right();
        }
        assert_eq!(sim.player.lane, 4);
    }

    #[test]
    fn test_commands_ignored_outside_run() {
        let mut sim = Simulation::with_seed(1);
        sim.move_left();
        assert_eq!(sim.player.lane, 2);
        assert_eq!(sim.trigger_bomb(), None);
        assert_eq!(sim.bomb_charges, 3);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        box_on_player(&mut sim);
        tick(&mut sim, frame_time(1));
        assert_eq!(sim.phase, GamePhase::GameOver);
        assert!(
            sim.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );

        // Terminal: further ticks do nothing
        tick(&mut sim, frame_time(2));
        assert_eq!(sim.frame_count, 1);
    }

    #[test]
    fn test_invincible_player_survives() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        sim.player.invincible_remaining = 1.0;
        box_on_player(&mut sim);
        for frame in 1..=30 {
            tick(&mut sim, frame_time(frame));
        }
        assert_eq!(sim.phase, GamePhase::Running);
    }

    #[test]
    fn test_return_to_idle_skips_game_over() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        sim.drain_events();
        sim.return_to_idle();
        assert_eq!(sim.phase, GamePhase::Idle);
        assert!(sim.drain_events().is_empty());
        tick(&mut sim, 1.0);
        assert_eq!(sim.frame_count, 0);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        sim.move_right();
        sim.trigger_bomb();
        sim.player.invincible_remaining = 3.0;
        box_on_player(&mut sim);
        tick(&mut sim, frame_time(1));

        sim.restart(50.0);
        assert_eq!(sim.phase, GamePhase::Running);
        assert_eq!(sim.player.lane, 2);
        assert_eq!(sim.bomb_charges, 3);
        assert_eq!(sim.frame_count, 0);
        assert_eq!(sim.boxes_avoided, 0);
        assert!(!sim.player.invincible());
        assert!(sim.entities.obstacles().is_empty());
        assert_eq!(sim.run, 2);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same timestamps: identical runs
        let mut a = Simulation::with_seed(99999);
        let mut b = Simulation::with_seed(99999);
        a.start(0.0);
        b.start(0.0);
        for frame in 1..=1200 {
            tick(&mut a, frame_time(frame));
            tick(&mut b, frame_time(frame));
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.frame_count, b.frame_count);
        assert_eq!(a.boxes_avoided, b.boxes_avoided);
        assert_eq!(a.entities.obstacles(), b.entities.obstacles());
    }

    #[test]
    fn test_box_under_player_touching_edge_is_safe() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        let player = sim.player_rect();
        sim.entities.spawn_obstacle(Obstacle {
            rect: Rect::new(player.x, player.y - 20.0, 40.0, 20.0),
            speed: 0.0,
            color: BoxColor::Navy,
        });
        tick(&mut sim, frame_time(1));
        assert_eq!(sim.phase, GamePhase::Running);
    }
}
