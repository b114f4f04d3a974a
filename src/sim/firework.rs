//! Victory fireworks
//!
//! A [`Rocket`] rises from the bottom edge, slowing under gravity, and bursts
//! into a radial pattern the tick its vertical velocity stops pointing up.
//! [`Fireworks`] owns the live rockets and evicts them once nothing of them
//! is left on screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particles::{BurstParticle, Spark, advance_all};
use super::scale::ScaleContext;
use crate::color::Color;
use crate::consts::*;

/// Shape of an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstPattern {
    Circle,
    DenseCircle,
    SparseCircle,
}

impl BurstPattern {
    pub const ALL: [BurstPattern; 3] = [
        BurstPattern::Circle,
        BurstPattern::DenseCircle,
        BurstPattern::SparseCircle,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Multiplier on [`FIREWORK_BASE_COUNT`]
    pub fn count_factor(self) -> f32 {
        match self {
            BurstPattern::Circle => 1.6,
            BurstPattern::DenseCircle => 2.4,
            BurstPattern::SparseCircle => 1.0,
        }
    }

    pub fn velocity_factor(self) -> f32 {
        match self {
            BurstPattern::Circle => 0.9,
            BurstPattern::DenseCircle => 0.7,
            BurstPattern::SparseCircle => 1.1,
        }
    }

    pub fn spread_factor(self) -> f32 {
        match self {
            BurstPattern::Circle => 0.5,
            BurstPattern::DenseCircle => 0.3,
            BurstPattern::SparseCircle => 0.8,
        }
    }

    pub fn particle_count(self) -> usize {
        (FIREWORK_BASE_COUNT * self.count_factor()).round() as usize
    }

    /// Lay particles evenly around a circle centered on `origin`
    pub fn build<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        origin: Vec2,
        scale: &ScaleContext,
    ) -> Vec<BurstParticle> {
        let count = self.particle_count();
        let velocity_base = 5.0 * self.velocity_factor();
        let spread = self.spread_factor();
        let size_ratio = scale.min_ratio();

        let palette_size = PALETTE_SIZES[rng.random_range(0..PALETTE_SIZES.len())];
        let palette: Vec<Color> = (0..palette_size)
            .map(|_| Color::random_bright(rng))
            .collect();

        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let jitter = (rng.random::<f32>() - 0.5) * 2.0 * FIREWORK_JITTER;
            let angle = i as f32 * std::f32::consts::TAU / count as f32 + jitter;
            let speed = rng.random::<f32>() + velocity_base;
            let size = (rng.random::<f32>() * 1.2 + 0.8) * size_ratio;
            let vel = Vec2::new(
                angle.cos() * speed + (rng.random::<f32>() - 0.5) * spread * 0.7,
                angle.sin() * speed + (rng.random::<f32>() - 0.5) * spread * 0.7,
            );
            let life = (rng.random::<f32>() * FIREWORK_RANGE / 2.0).round() + FIREWORK_RANGE / 2.0;
            particles.push(BurstParticle {
                pos: origin,
                vel,
                gravity: FIREWORK_GRAVITY,
                size,
                color: palette[i % palette.len()],
                life,
                alpha: BurstParticle::alpha_for(life),
            });
        }
        particles
    }
}

/// Rocket lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RocketState {
    Ascending,
    Exploded(BurstPattern),
}

/// A single firework, from launch to the last fading particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Deceleration of the ascent per tick
    pub gravity: f32,
    pub state: RocketState,
    pub color: Color,
    pub bursts: Vec<BurstParticle>,
    pub sparks: Vec<Spark>,
    /// Ticks of explosion flash left
    pub flash_time: f32,
}

impl Rocket {
    /// Launch from a random point on the bottom edge of a `width x height` surface
    pub fn launch<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, scale: &ScaleContext) -> Self {
        let pos = Vec2::new(rng.random::<f32>() * width, height);
        let launch_speed = (rng.random::<f32>() * 10.0 + 10.0) * scale.height_ratio;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 3.0 * scale.width_ratio,
            -launch_speed,
        );
        let color = Color::random(rng);
        let sparks = (0..SPARK_COUNT).map(|_| Spark::new(rng, pos)).collect();
        let flash_time = (rng.random::<f32>() * WHITE_FLASH_DURATION).round() + WHITE_FLASH_DURATION;

        Self {
            pos,
            vel,
            gravity: ROCKET_GRAVITY * scale.height_ratio,
            state: RocketState::Ascending,
            color,
            bursts: Vec::new(),
            sparks,
            flash_time,
        }
    }

    pub fn is_exploded(&self) -> bool {
        matches!(self.state, RocketState::Exploded(_))
    }

    /// Nothing left to show: exploded, no particles, flash over
    pub fn is_finished(&self) -> bool {
        self.is_exploded()
            && self.bursts.is_empty()
            && self.sparks.is_empty()
            && self.flash_time <= 0.0
    }

    /// Advance one tick
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, scale: &ScaleContext) {
        match self.state {
            RocketState::Ascending => {
                self.vel.y += self.gravity;
                self.pos += self.vel;
                if self.vel.y >= 0.0 {
                    self.explode(rng, scale);
                }
            }
            RocketState::Exploded(_) => {
                advance_all(&mut self.bursts);
                advance_all(&mut self.sparks);
                if self.flash_time > 0.0 {
                    self.flash_time -= 1.0;
                }
            }
        }
    }

    fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R, scale: &ScaleContext) {
        let pattern = BurstPattern::random(rng);
        self.bursts = pattern.build(rng, self.pos, scale);
        self.state = RocketState::Exploded(pattern);
        // Sparks are held until the burst and scatter from its center
        for spark in &mut self.sparks {
            spark.pos = self.pos;
        }
        log::debug!(
            "Rocket exploded at ({:.0}, {:.0}): {:?} with {} particles",
            self.pos.x,
            self.pos.y,
            pattern,
            self.bursts.len()
        );
    }

    /// Current flash opacity in [0, 1]
    pub fn flash_alpha(&self) -> f32 {
        (self.flash_time / WHITE_FLASH_DURATION).clamp(0.0, 1.0)
    }
}

/// The set of live rockets during the victory show
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fireworks {
    rockets: Vec<Rocket>,
}

impl Fireworks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any live rockets with a fresh salvo
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        width: f32,
        height: f32,
        scale: &ScaleContext,
    ) {
        self.rockets.clear();
        for _ in 0..count {
            self.rockets.push(Rocket::launch(rng, width, height, scale));
        }
    }

    /// Maybe launch a rocket, advance all of them, then evict finished ones
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        launch_chance: f32,
        width: f32,
        height: f32,
        scale: &ScaleContext,
    ) {
        if rng.random::<f32>() < launch_chance {
            self.rockets.push(Rocket::launch(rng, width, height, scale));
        }
        self.advance(rng, scale);
    }

    /// Advance existing rockets and evict the finished ones
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, scale: &ScaleContext) {
        self.rockets.retain(|rocket| !rocket.is_finished());
        for rocket in self.rockets.iter_mut() {
            rocket.update(rng, scale);
        }
    }

    pub fn clear(&mut self) {
        self.rockets.clear();
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn len(&self) -> usize {
        self.rockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rockets.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, rocket: Rocket) {
        self.rockets.push(rocket);
    }
}
