//! Entity registry: live boxes and power-up items
//!
//! The registry owns both collections outright and is the only code that
//! moves entities once they are spawned.

use serde::{Deserialize, Serialize};

use super::state::{Item, Obstacle};

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// Boxes that fell past the bottom edge this step
    pub avoided: u32,
}

/// Live entity collections, iterated in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    obstacles: Vec<Obstacle>,
    items: Vec<Item>,
}

impl EntityRegistry {
    pub fn spawn_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn spawn_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Move everything down by its own speed and drop what left the viewport
    ///
    /// A box is gone once its top edge is strictly below `viewport_height`;
    /// items go as soon as their top edge reaches it.
    pub fn advance_and_prune(&mut self, viewport_height: f32) -> Advance {
        for ob in &mut self.obstacles {
            ob.rect.y += ob.speed;
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|ob| ob.rect.y <= viewport_height);
        let avoided = (before - self.obstacles.len()) as u32;

        for item in &mut self.items {
            item.rect.y += item.speed;
        }
        self.items.retain(|item| item.rect.y < viewport_height);

        Advance { avoided }
    }

    /// Remove every box regardless of position; returns how many were cleared
    pub fn clear_obstacles(&mut self) -> usize {
        let cleared = self.obstacles.len();
        self.obstacles.clear();
        cleared
    }

    /// Keep only the items `keep` returns true for
    pub fn retain_items<F: FnMut(&Item) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }

    /// Drop everything (new run)
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.items.clear();
    }
}
