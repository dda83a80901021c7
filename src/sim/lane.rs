//! Lane geometry
//!
//! The viewport is split into `lane_count` equal vertical strips. Everything
//! that lives in a lane (player, boxes, items) is horizontally centred in it.

use serde::{Deserialize, Serialize};

/// Horizontal extent of one lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneBounds {
    pub left: f32,
    pub width: f32,
}

impl LaneBounds {
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Bounds of `lane` in a viewport `viewport_width` wide
///
/// `lane` must already be clamped to `[0, lane_count)`.
#[inline]
pub fn lane_bounds(lane: usize, lane_count: usize, viewport_width: f32) -> LaneBounds {
    debug_assert!(lane < lane_count, "lane {lane} out of range 0..{lane_count}");
    let width = viewport_width / lane_count as f32;
    LaneBounds {
        left: lane as f32 * width,
        width,
    }
}

/// Left edge that centres an entity `entity_width` wide in `lane`
#[inline]
pub fn centered_x(lane: usize, lane_count: usize, viewport_width: f32, entity_width: f32) -> f32 {
    let bounds = lane_bounds(lane, lane_count, viewport_width);
    bounds.left + (bounds.width - entity_width) / 2.0
}

/// Clamp a signed lane request into `[0, lane_count - 1]`
#[inline]
pub fn clamp_lane(lane: isize, lane_count: usize) -> usize {
    lane.clamp(0, lane_count as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_lanes() {
        let b = lane_bounds(2, 5, 400.0);
        assert!((b.left - 160.0).abs() < 1e-4);
        assert!((b.width - 80.0).abs() < 1e-4);
        assert!((centered_x(2, 5, 400.0, 40.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_lane() {
        assert_eq!(clamp_lane(-1, 5), 0);
        assert_eq!(clamp_lane(3, 5), 3);
        assert_eq!(clamp_lane(5, 5), 4);
        assert_eq!(clamp_lane(7, 1), 0);
    }

    proptest! {
        #[test]
        fn lanes_tile_viewport(lane_count in 1usize..12, width in 10.0f32..4000.0) {
            let first = lane_bounds(0, lane_count, width);
            prop_assert!(first.left.abs() < 1e-3);

            for lane in 1..lane_count {
                let prev = lane_bounds(lane - 1, lane_count, width);
                let cur = lane_bounds(lane, lane_count, width);
                // No gap and no overlap between neighbours
                prop_assert!((prev.right() - cur.left).abs() < width * 1e-5);
            }

            let last = lane_bounds(lane_count - 1, lane_count, width);
            prop_assert!((last.right() - width).abs() < width * 1e-5);
        }

        #[test]
        fn centered_entity_stays_in_lane(lane in 0usize..5, entity in 1.0f32..80.0) {
            let b = lane_bounds(lane, 5, 400.0);
            let x = centered_x(lane, 5, 400.0, entity);
            prop_assert!(x >= b.left - 1e-3);
            prop_assert!(x + entity <= b.right() + 1e-3);
        }
    }
}
