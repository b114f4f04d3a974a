//! Surface scaling
//!
//! Every size and speed in the game is a base-resolution value multiplied by
//! one of the ratios in [`ScaleContext`]. Nothing is interpolated: a resize
//! recomputes everything from the new surface size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ratios between the current surface and the 800x600 base resolution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleContext {
    pub width_ratio: f32,
    pub height_ratio: f32,
    /// `width_ratio` capped at [`MAX_EFFECTIVE_RATIO`]
    pub effective_width_ratio: f32,
    /// `height_ratio` capped at [`MAX_EFFECTIVE_RATIO`]
    pub effective_height_ratio: f32,
}

impl ScaleContext {
    /// Negative or NaN dimensions are treated as zero.
    pub fn new(width: f32, height: f32) -> Self {
        let width_ratio = (width / BASE_WIDTH).max(0.0);
        let height_ratio = (height / BASE_HEIGHT).max(0.0);
        Self {
            width_ratio,
            height_ratio,
            effective_width_ratio: width_ratio.min(MAX_EFFECTIVE_RATIO),
            effective_height_ratio: height_ratio.min(MAX_EFFECTIVE_RATIO),
        }
    }

    /// Smaller of the two raw ratios (used for round things and text)
    #[inline]
    pub fn min_ratio(&self) -> f32 {
        self.width_ratio.min(self.height_ratio)
    }
}

/// All dimensions derived from the surface size and grid shape
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub scale: ScaleContext,

    pub ball_radius: f32,
    /// Magnitude of the ball's base velocity on each axis after a resize
    pub ball_speed: Vec2,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_left: f32,
    pub brick_offset_top: f32,
}

impl Geometry {
    pub fn new(width: f32, height: f32, columns: usize) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let scale = ScaleContext::new(width, height);
        let min_ratio = scale.min_ratio();
        let eff_w = scale.effective_width_ratio;
        let eff_h = scale.effective_height_ratio;

        let paddle_height = PADDLE_HEIGHT * eff_h;
        let brick_padding = BRICK_PADDING * min_ratio;
        let brick_offset_left = BRICK_OFFSET_LEFT * eff_w;

        let columns = columns.max(1) as f32;
        let available = width - brick_offset_left * 2.0;
        let brick_width =
            ((available - (columns - 1.0) * brick_padding) / columns).max(MIN_BRICK_WIDTH);

        Self {
            width,
            height,
            scale,
            ball_radius: BALL_RADIUS * min_ratio,
            ball_speed: Vec2::new(BALL_BASE_SPEED * eff_w, BALL_BASE_SPEED * eff_h),
            paddle_width: PADDLE_WIDTH * eff_w,
            paddle_height,
            paddle_speed: PADDLE_SPEED * scale.width_ratio,
            brick_width,
            brick_height: paddle_height,
            brick_padding,
            brick_offset_left,
            brick_offset_top: BRICK_OFFSET_TOP * eff_h,
        }
    }

    /// Top edge of the paddle
    #[inline]
    pub fn paddle_top(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// Where the ball rests before being served
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0,
            self.height
                - self.paddle_height
                - self.ball_radius
                - BALL_SPAWN_GAP * self.scale.effective_height_ratio,
        )
    }

    /// Paddle x that centers it horizontally
    pub fn paddle_center_x(&self) -> f32 {
        (self.width - self.paddle_width) / 2.0
    }
}
