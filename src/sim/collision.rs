//! Collision detection and resolution
//!
//! Everything in the playfield is an axis-aligned rectangle, so a single
//! strict AABB test covers both lethal box hits and item pickups.

use serde::{Deserialize, Serialize};

use super::entities::EntityRegistry;
use super::state::{Item, ItemKind};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Strict overlap test: rectangles that only touch along an edge do not collide
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Index of the first obstacle overlapping `player`, if any
pub fn first_obstacle_hit(player: &Rect, registry: &EntityRegistry) -> Option<usize> {
    registry
        .obstacles()
        .iter()
        .position(|ob| overlaps(player, &ob.rect))
}

/// Remove every item overlapping `player` and return their kinds in
/// insertion order
pub fn collect_items(player: &Rect, registry: &mut EntityRegistry) -> Vec<ItemKind> {
    let mut collected = Vec::new();
    registry.retain_items(|item: &Item| {
        if overlaps(player, &item.rect) {
            collected.push(item.kind);
            false
        } else {
            true
        }
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BoxColor, Obstacle};
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared right edge
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Shared bottom edge
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Containment counts
        assert!(overlaps(&a, &Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_first_obstacle_hit() {
        let mut registry = EntityRegistry::default();
        registry.spawn_obstacle(Obstacle {
            rect: Rect::new(0.0, 0.0, 40.0, 20.0),
            speed: 2.0,
            color: BoxColor::Red,
        });
        registry.spawn_obstacle(Obstacle {
            rect: Rect::new(100.0, 100.0, 40.0, 20.0),
            speed: 2.0,
            color: BoxColor::Teal,
        });

        let player = Rect::new(110.0, 110.0, 64.0, 20.0);
        assert_eq!(first_obstacle_hit(&player, &registry), Some(1));

        let clear = Rect::new(300.0, 300.0, 64.0, 20.0);
        assert_eq!(first_obstacle_hit(&clear, &registry), None);
    }

    #[test]
    fn test_collect_multiple_items() {
        let mut registry = EntityRegistry::default();
        for (x, kind) in [(0.0, ItemKind::Star), (20.0, ItemKind::Bomb), (300.0, ItemKind::Bomb)] {
            registry.spawn_item(Item {
                rect: Rect::new(x, 0.0, 30.0, 30.0),
                speed: 2.0,
                kind,
            });
        }

        let player = Rect::new(0.0, 10.0, 64.0, 20.0);
        let kinds = collect_items(&player, &mut registry);
        assert_eq!(kinds, vec![ItemKind::Star, ItemKind::Bomb]);
        assert_eq!(registry.items().len(), 1);
        assert_eq!(registry.items()[0].rect.x, 300.0);
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f32..500.0, -100.0f32..700.0, 1.0f32..100.0, 1.0f32..100.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn rect_overlaps_itself(a in rect_strategy()) {
            prop_assert!(overlaps(&a, &a));
        }
    }
}
