//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick motion, wall-clock `dt` only for countdowns
//! - Seeded RNG only
//! - Stable iteration order (column-major bricks, insertion-ordered particles)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod firework;
pub mod particles;
pub mod scale;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickField, BrickStatus};
pub use collision::Rect;
pub use firework::{BurstPattern, Fireworks, Rocket, RocketState};
pub use particles::{BurstParticle, Debris, DebrisSystem, Spark, VisualParticle};
pub use scale::{Geometry, ScaleContext};
pub use state::{Ball, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
