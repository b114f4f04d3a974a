//! Collision tests for an axis-aligned world
//!
//! Every test is predictive: it looks at where the ball would be after this
//! tick's displacement, the same way the integrator will move it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scale::Geometry;
use super::state::{Ball, Paddle};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Does the ball's bounding box overlap the rectangle (edges touching don't count)
pub fn ball_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let max = rect.max();
    center.x + radius > rect.pos.x
        && center.x - radius < max.x
        && center.y + radius > rect.pos.y
        && center.y - radius < max.y
}

/// Which velocity components the side walls and ceiling reflect this tick
pub fn wall_bounce(ball: &Ball, geo: &Geometry) -> (bool, bool) {
    let next = ball.next_pos();
    let flip_x = next.x > geo.width - ball.radius || next.x < ball.radius;
    let flip_y = next.y < ball.radius;
    (flip_x, flip_y)
}

/// Is the ball about to cross the paddle's top edge while above it
pub fn paddle_hit(ball: &Ball, paddle: &Paddle, geo: &Geometry) -> bool {
    let next = ball.next_pos();
    next.y > geo.paddle_top() - ball.radius
        && ball.pos.x > paddle.x
        && ball.pos.x < paddle.x + paddle.width
}

/// Is the ball about to leave through the bottom edge
pub fn falls_out(ball: &Ball, geo: &Geometry) -> bool {
    ball.next_pos().y > geo.height - ball.radius
}
