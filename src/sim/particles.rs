//! Short-lived visual particles
//!
//! Three kinds exist: debris from broken bricks, burst particles from
//! exploded rockets, and sparks trailing rockets. They share the
//! [`VisualParticle`] capability so collections can be advanced and culled
//! uniformly. None of them affect gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scale::ScaleContext;
use crate::color::Color;
use crate::consts::*;

/// Slack for the rounding left by repeated fade steps
const FADE_EPSILON: f32 = 1e-4;

/// Something that moves each tick and eventually expires
pub trait VisualParticle {
    /// Advance one tick
    fn advance(&mut self);
    /// True once the particle should be culled
    fn is_expired(&self) -> bool;
}

/// Advance every particle then drop the expired ones, preserving order
pub fn advance_all<P: VisualParticle>(particles: &mut Vec<P>) {
    for particle in particles.iter_mut() {
        particle.advance();
    }
    particles.retain(|p| !p.is_expired());
}

/// Fragment of a broken brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    pub alpha: f32,
}

impl VisualParticle for Debris {
    fn advance(&mut self) {
        self.pos += self.vel;
        self.alpha -= DEBRIS_FADE;
    }

    fn is_expired(&self) -> bool {
        self.alpha <= FADE_EPSILON
    }
}

/// Fragment of a firework burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Downward acceleration per tick
    pub gravity: f32,
    pub size: f32,
    pub color: Color,
    /// Ticks left
    pub life: f32,
    pub alpha: f32,
}

impl BurstParticle {
    /// Alpha for a given remaining life (never negative)
    #[inline]
    pub fn alpha_for(life: f32) -> f32 {
        (life / FIREWORK_RANGE).max(0.0)
    }
}

impl VisualParticle for BurstParticle {
    fn advance(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.life -= 1.0;
        self.alpha = Self::alpha_for(self.life);
    }

    fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// Spark trailing a rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base-unit size, scaled when drawn
    pub size: f32,
    pub color: Color,
    pub life: f32,
    pub alpha: f32,
}

impl Spark {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> Self {
        let color = if rng.random_bool(0.8) {
            Color::random_bright(rng)
        } else {
            Color::YELLOW
        };
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random::<f32>() * SPARK_VELOCITY;
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: SPARK_SIZE,
            color,
            life: SPARK_LIFE,
            alpha: 1.0,
        }
    }
}

impl VisualParticle for Spark {
    fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= 1.0;
        self.size *= SPARK_SHRINK;
        self.alpha = (self.life / SPARK_LIFE).max(0.0);
    }

    fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// Debris particles from broken bricks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebrisSystem {
    particles: Vec<Debris>,
}

impl DebrisSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a puff of debris at `pos`
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: Color,
        scale: &ScaleContext,
    ) {
        let size_ratio = scale.min_ratio();
        for _ in 0..DEBRIS_PER_BRICK {
            let size = (rng.random::<f32>() * 3.0 + 1.0) * size_ratio;
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 5.0 * scale.width_ratio,
                (rng.random::<f32>() - 0.5) * 5.0 * scale.height_ratio,
            );
            self.particles.push(Debris {
                pos,
                vel,
                size,
                color,
                alpha: 1.0,
            });
        }
    }

    pub fn advance(&mut self) {
        advance_all(&mut self.particles);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Debris] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
