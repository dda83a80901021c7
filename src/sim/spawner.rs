//! Spawn policies for boxes, stars and bomb pickups
//!
//! Boxes follow a frame cadence that tightens with survival time. Stars arrive
//! on a fixed period. Bomb pickups are rolled at randomly jittered times
//! measured in seconds, each roll succeeding with a fixed chance.

use rand::Rng;

use super::collision::Rect;
use super::difficulty::{obstacle_speed, spawn_interval_frames};
use super::lane::centered_x;
use super::state::{BoxColor, Item, ItemKind, Obstacle, Simulation};

/// Run every spawn policy for the current frame
pub fn run_spawners(sim: &mut Simulation) {
    spawn_obstacles(sim);
    spawn_star(sim);
    spawn_bomb_pickup(sim);
}

/// Spawn a box when the frame counter lands on the current interval
pub fn spawn_obstacles(sim: &mut Simulation) {
    if sim.frame_count <= sim.tuning.obstacle_grace_frames {
        return;
    }
    let interval = spawn_interval_frames(&sim.tuning, sim.elapsed);
    if sim.frame_count % interval != 0 {
        return;
    }

    let lane = sim.rng.random_range(0..sim.tuning.lane_count);
    let color = BoxColor::PALETTE[sim.rng.random_range(0..BoxColor::PALETTE.len())];
    let tuning = &sim.tuning;
    let x = centered_x(lane, tuning.lane_count, tuning.viewport_width, tuning.obstacle_width);
    let obstacle = Obstacle {
        rect: Rect::new(x, 0.0, tuning.obstacle_width, tuning.obstacle_height),
        speed: obstacle_speed(tuning, sim.elapsed),
        color,
    };
    sim.entities.spawn_obstacle(obstacle);
}

/// One star per `star_period` seconds survived
pub fn spawn_star(sim: &mut Simulation) {
    if sim.elapsed - sim.last_star_spawn >= sim.tuning.star_period {
        spawn_item(sim, ItemKind::Star);
        sim.last_star_spawn = sim.elapsed;
    }
}

/// Roll for a bomb pickup whenever the scheduled roll time is reached
pub fn spawn_bomb_pickup(sim: &mut Simulation) {
    match sim.next_bomb_roll {
        None => {
            if sim.elapsed >= sim.tuning.bomb_grace {
                schedule_bomb_roll(sim);
            }
        }
        Some(at) if sim.elapsed >= at => {
            if sim.rng.random_bool(sim.tuning.bomb_spawn_chance.clamp(0.0, 1.0)) {
                spawn_item(sim, ItemKind::Bomb);
            }
            schedule_bomb_roll(sim);
        }
        Some(_) => {}
    }
}

fn schedule_bomb_roll(sim: &mut Simulation) {
    let delay = sim
        .rng
        .random_range(sim.tuning.bomb_roll_min..sim.tuning.bomb_roll_max);
    sim.next_bomb_roll = Some(sim.elapsed + delay);
}

/// Drop an item of `kind` from the top of a random lane
pub fn spawn_item(sim: &mut Simulation, kind: ItemKind) {
    let lane = sim.rng.random_range(0..sim.tuning.lane_count);
    let tuning = &sim.tuning;
    let x = centered_x(lane, tuning.lane_count, tuning.viewport_width, tuning.item_size);
    let item = Item {
        rect: Rect::new(x, 0.0, tuning.item_size, tuning.item_size),
        speed: tuning.item_speed,
        kind,
    };
    log::debug!("Spawned {:?} in lane {}", kind, lane);
    sim.entities.spawn_item(item);
}
