//! Axis-aligned collision tests between the player box and obstacles

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned bounding box (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_rect(top_left: Vec2, width: f32, height: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Open-interval overlap on the x axis (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.min.x < max_x && self.max.x > min_x
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// True when the box shares x range with the obstacle and is not fully
/// inside the opening.
///
/// The opening is [top_height, bottom_y]; the box may touch either edge.
pub fn hits_obstacle(player: &Aabb, obstacle: &Obstacle) -> bool {
    player.overlaps_x(obstacle.x, obstacle.right_edge())
        && (player.min.y < obstacle.top_height || player.max.y > obstacle.bottom_y)
}
