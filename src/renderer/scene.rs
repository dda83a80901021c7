//! Turns a simulation snapshot into a triangle list

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{ItemKind, Rect, Snapshot};

const CIRCLE_SEGMENTS: u32 = 24;
const SHOCKWAVE_SEGMENTS: u32 = 64;
const RIM_WIDTH: f32 = 2.0;
const SHOCKWAVE_LINE_WIDTH: f32 = 3.0;
const SHOCKWAVE_CORE_RADIUS: f32 = 20.0;

/// Player colour for this frame (flickers gold/red while invincible)
pub fn player_color(snapshot: &Snapshot, settings: &Settings) -> [f32; 4] {
    if !snapshot.player.invincible {
        return settings.theme.player();
    }
    if settings.reduced_motion {
        return colors::INVINCIBLE_GOLD;
    }
    // Alternate every tenth of a second
    if (snapshot.elapsed * 10.0).floor() as u64 % 2 == 0 {
        colors::INVINCIBLE_GOLD
    } else {
        colors::INVINCIBLE_RED
    }
}

/// Build every vertex for one frame, back to front
pub fn build(snapshot: &Snapshot, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        (snapshot.lane_count + 2 + snapshot.obstacles.len()) * 6
            + snapshot.items.len() * CIRCLE_SEGMENTS as usize * 9,
    );

    // Lane dividers
    let lane_width = snapshot.viewport_width / snapshot.lane_count as f32;
    for i in 0..=snapshot.lane_count {
        let x = i as f32 * lane_width;
        let line = Rect::new(x - 0.5, 0.0, 1.0, snapshot.viewport_height);
        vertices.extend_from_slice(&shapes::rect(&line, colors::LANE_LINE));
    }

    vertices.extend_from_slice(&shapes::rect(
        &snapshot.player.rect,
        player_color(snapshot, settings),
    ));

    for ob in &snapshot.obstacles {
        vertices.extend_from_slice(&shapes::rect(&ob.rect, ob.color.rgba()));
    }

    for item in &snapshot.items {
        let (fill, rim) = match item.kind {
            ItemKind::Star => (colors::STAR_FILL, colors::STAR_RIM),
            ItemKind::Bomb => (colors::BOMB_FILL, colors::BOMB_RIM),
        };
        let center = Vec2::new(
            item.rect.x + item.rect.width / 2.0,
            item.rect.y + item.rect.height / 2.0,
        );
        let radius = item.rect.width / 2.0;
        vertices.extend(shapes::circle(center, radius, fill, CIRCLE_SEGMENTS));
        vertices.extend(shapes::ring(
            center,
            radius - RIM_WIDTH / 2.0,
            radius + RIM_WIDTH / 2.0,
            rim,
            CIRCLE_SEGMENTS,
        ));
    }

    if let Some(wave) = snapshot.shockwave {
        let [r, g, b] = colors::SHOCKWAVE_RING;
        vertices.extend(shapes::ring(
            wave.center,
            wave.radius - SHOCKWAVE_LINE_WIDTH / 2.0,
            wave.radius + SHOCKWAVE_LINE_WIDTH / 2.0,
            [r, g, b, wave.opacity],
            SHOCKWAVE_SEGMENTS,
        ));
        let [r, g, b] = colors::SHOCKWAVE_CORE;
        vertices.extend(shapes::circle(
            wave.center,
            SHOCKWAVE_CORE_RADIUS,
            [r, g, b, 0.5 * wave.opacity],
            CIRCLE_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Theme;
    use crate::sim::{Simulation, tick};

    #[test]
    fn test_player_color_by_theme() {
        let sim = Simulation::with_seed(1);
        let snap = sim.snapshot();
        let dark = Settings {
            theme: Theme::Dark,
            ..Default::default()
        };
        assert_eq!(player_color(&snap, &Settings::default()), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(player_color(&snap, &dark), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_invincible_flicker() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        sim.player.invincible_remaining = 3.0;

        let mut snap = sim.snapshot();
        snap.elapsed = 0.05;
        assert_eq!(player_color(&snap, &Settings::default()), colors::INVINCIBLE_GOLD);
        snap.elapsed = 0.15;
        assert_eq!(player_color(&snap, &Settings::default()), colors::INVINCIBLE_RED);

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(player_color(&snap, &calm), colors::INVINCIBLE_GOLD);
    }

    #[test]
    fn test_scene_contains_shockwave() {
        let mut sim = Simulation::with_seed(1);
        sim.start(0.0);
        let quiet = build(&sim.snapshot(), &Settings::default()).len();

        sim.trigger_bomb();
        tick(&mut sim, 0.1);
        let loud = build(&sim.snapshot(), &Settings::default()).len();
        assert!(loud > quiet);
    }
}
