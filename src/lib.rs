//! Brick Breaker - a responsive ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, particles, fireworks)
//! - `renderer`: Abstract 2D canvas and scene drawing
//! - `driver`: Fixed-timestep frame driver tying simulation and drawing together
//! - `settings`: Data-driven game tuning

pub mod color;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use driver::FrameDriver;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the cadence the per-tick physics is tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta accepted by the driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical base resolution every dimension is expressed in
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;
    /// Upper bound on the effective scale ratios
    pub const MAX_EFFECTIVE_RATIO: f32 = 2.0;

    /// Ball defaults (base units)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 2.0;
    /// Gap between paddle top and ball on respawn
    pub const BALL_SPAWN_GAP: f32 = 10.0;

    /// Paddle defaults (base units)
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Brick layout (base units)
    pub const BRICK_PADDING: f32 = 1.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;
    pub const BRICK_OFFSET_TOP: f32 = 20.0;
    /// Narrowest brick allowed on tiny surfaces
    pub const MIN_BRICK_WIDTH: f32 = 1.0;

    /// Debris emitted per broken brick
    pub const DEBRIS_PER_BRICK: usize = 5;
    /// Alpha lost by a debris particle every tick
    pub const DEBRIS_FADE: f32 = 0.02;

    /// Firework burst tuning
    pub const FIREWORK_BASE_COUNT: f32 = 100.0;
    /// Lifetime range of burst particles (ticks)
    pub const FIREWORK_RANGE: f32 = 300.0;
    pub const FIREWORK_GRAVITY: f32 = 0.025;
    /// Max angular jitter per burst particle (radians)
    pub const FIREWORK_JITTER: f32 = 0.3;
    pub const PALETTE_SIZES: [usize; 3] = [6, 7, 8];
    pub const ROCKET_GRAVITY: f32 = 0.05;

    /// Ascent sparks
    pub const SPARK_COUNT: usize = 30;
    pub const SPARK_LIFE: f32 = 50.0;
    pub const SPARK_SIZE: f32 = 6.0;
    pub const SPARK_VELOCITY: f32 = 0.5;
    pub const SPARK_SHRINK: f32 = 0.97;

    /// Explosion flash
    pub const WHITE_FLASH_RADIUS: f32 = 12.0;
    pub const WHITE_FLASH_DURATION: f32 = 15.0;

    /// Banner font sizes (base units)
    pub const HUD_FONT_SIZE: f32 = 20.0;
    pub const BANNER_FONT_SIZE: f32 = 30.0;
    pub const BRAVO_FONT_SIZE: f32 = 40.0;
}
