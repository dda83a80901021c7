//! Power-up state machine: star invincibility and the bomb economy
//!
//! A detonation is triggered immediately but only clears boxes once its
//! shockwave has run for `detonation_duration` seconds of survival time. The
//! pending clear is identified by a [`DetonationToken`]; completing with any
//! other token is a no-op, so a restart can never leak a clear into the next
//! run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Detonation, DetonationToken, GameEvent, ItemKind, Player, Simulation};

/// Shockwave visual derived from detonation progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shockwave {
    /// Progress through the detonation, 0..=1
    pub fraction: f32,
    pub radius: f32,
    pub opacity: f32,
    pub center: Vec2,
}

/// Count invincibility down by one frame
pub fn update_invincibility(player: &mut Player, dt: f32) {
    if player.invincible_remaining > 0.0 {
        player.invincible_remaining = (player.invincible_remaining - dt).max(0.0);
        if player.invincible_remaining == 0.0 {
            log::debug!("Invincibility expired");
        }
    }
}

/// Apply the effect of a collected item
pub fn apply_pickup(sim: &mut Simulation, kind: ItemKind) {
    match kind {
        ItemKind::Star => {
            sim.player.invincible_remaining = sim.tuning.invincibility_duration;
            log::debug!("Star collected at {:.2}s", sim.elapsed);
        }
        ItemKind::Bomb => {
            let charges = sim.bomb_charges.saturating_add(1).min(sim.tuning.bomb_max_charges);
            sim.bomb_charges = charges;
            sim.emit(GameEvent::BombCountChanged(charges));
            log::debug!("Bomb collected, {} charges", charges);
        }
    }
}

/// Start a detonation if a charge is available and none is in flight
pub fn use_bomb(sim: &mut Simulation) -> Option<DetonationToken> {
    if sim.bomb_charges == 0 || matches!(sim.detonation, Detonation::Detonating { .. }) {
        return None;
    }

    sim.bomb_charges -= 1;
    sim.detonation_sequence += 1;
    let token = DetonationToken {
        run: sim.run,
        sequence: sim.detonation_sequence,
    };
    sim.detonation = Detonation::Detonating {
        token,
        started_at: sim.elapsed,
    };
    sim.emit(GameEvent::BombCountChanged(sim.bomb_charges));
    log::debug!(
        "Bomb triggered at {:.2}s, {} charges left",
        sim.elapsed,
        sim.bomb_charges
    );
    Some(token)
}

/// Finish the in-flight detonation if its shockwave has run its course
pub fn update_detonation(sim: &mut Simulation) {
    if let Detonation::Detonating { token, started_at } = sim.detonation {
        if sim.elapsed - started_at >= sim.tuning.detonation_duration {
            complete_detonation(sim, token);
        }
    }
}

/// Clear every box for the detonation identified by `token`
///
/// Returns false (and changes nothing) for stale or already completed tokens.
pub fn complete_detonation(sim: &mut Simulation, token: DetonationToken) -> bool {
    match sim.detonation {
        Detonation::Detonating { token: current, .. } if current == token => {
            let cleared = sim.entities.clear_obstacles();
            sim.detonation = Detonation::Idle;
            log::debug!("Detonation cleared {} boxes", cleared);
            true
        }
        _ => {
            log::debug!("Ignoring stale detonation {:?}", token);
            false
        }
    }
}

/// Current shockwave, if a detonation is in flight
pub fn shockwave(sim: &Simulation) -> Option<Shockwave> {
    let Detonation::Detonating { started_at, .. } = sim.detonation else {
        return None;
    };
    let duration = sim.tuning.detonation_duration;
    let fraction = if duration > 0.0 {
        ((sim.elapsed - started_at) / duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(Shockwave {
        fraction,
        radius: fraction * sim.tuning.shockwave_max_radius,
        opacity: 1.0 - fraction,
        center: Vec2::new(sim.tuning.viewport_width / 2.0, sim.tuning.viewport_height / 2.0),
    })
}
