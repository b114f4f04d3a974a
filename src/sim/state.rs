//! Game state and core simulation types
//!
//! [`GameState`] is the single aggregate the tick function mutates. It also
//! owns the controller operations (breaking bricks, losing lives, winning,
//! resetting) so their bookkeeping stays in one place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::BrickField;
use super::collision::Rect;
use super::firework::Fireworks;
use super::particles::DebrisSystem;
use super::scale::Geometry;
use crate::color::Color;
use crate::consts::BALL_BASE_SPEED;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; frozen until the delayed reset
    GameOver,
    /// Every brick broken; fireworks until the delayed reset
    Won,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Base velocity per tick, before the speed multiplier
    pub vel: Vec2,
    pub radius: f32,
    /// Progress-based speed-up, always >= 1.0
    pub speed_multiplier: f32,
    /// Blinking after a lost life (purely visual)
    pub invincible: bool,
}

impl Ball {
    /// Movement applied by the next integration step
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.vel * self.speed_multiplier
    }

    /// Where the ball will be after this tick if nothing deflects it
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.displacement()
    }

    pub fn integrate(&mut self) {
        self.pos += self.displacement();
    }
}

/// The player's paddle, resting on the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Move horizontally, staying within `[0, surface_width - width]`
    pub fn move_by(&mut self, dx: f32, surface_width: f32) {
        let max_x = (surface_width - self.width).max(0.0);
        self.x = (self.x + dx).clamp(0.0, max_x);
    }

    pub fn rect(&self, surface_height: f32) -> Rect {
        Rect::new(self.x, surface_height - self.height, self.width, self.height)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Dimensions derived from the current surface
    pub geometry: Geometry,

    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,

    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    pub brick_color: Color,

    /// Visual particles (not gameplay-affecting)
    pub debris: DebrisSystem,
    pub fireworks: Fireworks,

    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since creation
    pub elapsed: f64,
    /// `elapsed` at the most recent tick that broke a brick
    pub last_break_at: Option<f64>,

    /// Seconds until the Bravo banner clears
    pub bravo_timer: Option<f32>,
    /// Seconds until the ball stops blinking
    pub invincibility_timer: Option<f32>,
    /// Seconds until the automatic reset after a win or loss
    pub reset_timer: Option<f32>,
}

impl GameState {
    /// Create a game on a `width x height` surface
    pub fn new(settings: Settings, width: f32, height: f32, seed: u64) -> Self {
        let settings = settings.validated();
        let geometry = Geometry::new(width, height, settings.brick_columns);
        let mut bricks = BrickField::new(settings.brick_columns, settings.brick_rows);
        bricks.layout_positions(&geometry);
        let lives = settings.initial_lives;

        let mut state = Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            geometry,
            phase: GamePhase::Playing,
            score: 0,
            lives,
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::new(-geometry.ball_speed.x, -geometry.ball_speed.y),
                radius: geometry.ball_radius,
                speed_multiplier: 1.0,
                invincible: false,
            },
            paddle: Paddle {
                x: 0.0,
                width: geometry.paddle_width,
                height: geometry.paddle_height,
            },
            bricks,
            brick_color: Color::BLUE,
            debris: DebrisSystem::new(),
            fireworks: Fireworks::new(),
            time_ticks: 0,
            elapsed: 0.0,
            last_break_at: None,
            bravo_timer: None,
            invincibility_timer: None,
            reset_timer: None,
        };
        state.reset_ball_and_paddle();
        state
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn bravo_active(&self) -> bool {
        self.bravo_timer.is_some()
    }

    /// Bricks needed to win
    pub fn total_bricks(&self) -> usize {
        self.settings.total_bricks()
    }

    /// Whether the blinking ball is in its hidden half-period
    pub fn ball_hidden(&self) -> bool {
        self.ball.invincible
            && ((self.elapsed / self.settings.blink_period as f64).floor() as u64).is_multiple_of(2)
    }

    /// Recompute all geometry for a new surface size
    ///
    /// The grid is rebuilt. While playing, ball and paddle return to their
    /// start positions; otherwise they are only pulled back inside the surface.
    pub fn resize(&mut self, width: f32, height: f32) {
        let geo = Geometry::new(width, height, self.settings.brick_columns);
        self.geometry = geo;

        self.ball.radius = geo.ball_radius;
        // Horizontal direction kept, vertical direction reversed
        self.ball.vel = Vec2::new(
            geo.ball_speed.x.copysign(self.ball.vel.x),
            -geo.ball_speed.y.copysign(self.ball.vel.y),
        );
        self.paddle.width = geo.paddle_width;
        self.paddle.height = geo.paddle_height;

        self.bricks
            .rebuild(self.settings.brick_columns, self.settings.brick_rows);
        self.bricks.layout_positions(&self.geometry);

        if self.is_active() {
            self.ball.pos = geo.ball_spawn();
            self.paddle.x = geo.paddle_center_x();
        } else {
            let r = geo.ball_radius.min(geo.width / 2.0);
            self.ball.pos.x = self.ball.pos.x.clamp(r, geo.width - r);
            self.ball.pos.y = self.ball.pos.y.clamp(0.0, geo.height);
            self.paddle.move_by(0.0, geo.width);
        }

        log::info!(
            "Resized to {}x{} (ratios {:.2}x{:.2})",
            geo.width,
            geo.height,
            geo.scale.width_ratio,
            geo.scale.height_ratio
        );
    }

    /// Put ball and paddle back at their start positions and drop the speed-up
    pub fn reset_ball_and_paddle(&mut self) {
        let geo = self.geometry;
        self.ball.pos = geo.ball_spawn();
        self.ball.radius = geo.ball_radius;
        // Serve upward at the uncapped base speed, keeping the horizontal direction
        let scale = geo.scale;
        self.ball.vel = Vec2::new(
            (BALL_BASE_SPEED * scale.width_ratio).copysign(self.ball.vel.x),
            -BALL_BASE_SPEED * scale.height_ratio,
        );
        self.ball.speed_multiplier = 1.0;
        self.paddle.width = geo.paddle_width;
        self.paddle.height = geo.paddle_height;
        self.paddle.x = geo.paddle_center_x();
    }

    /// Start a new game
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.settings.initial_lives;
        self.phase = GamePhase::Playing;
        self.bravo_timer = None;
        self.invincibility_timer = None;
        self.reset_timer = None;
        self.last_break_at = None;
        self.ball.invincible = false;
        self.brick_color = Color::random(&mut self.rng);
        self.bricks
            .rebuild(self.settings.brick_columns, self.settings.brick_rows);
        self.bricks.layout_positions(&self.geometry);
        self.debris.clear();
        self.fireworks.clear();
        self.reset_ball_and_paddle();
        log::info!(
            "Game reset (seed {}, brick color {})",
            self.seed,
            self.brick_color
        );
    }

    /// Break one brick: score it, puff debris, speed the ball up.
    ///
    /// Returns false if the brick was not active. Brick positions must be laid out.
    pub fn break_brick(&mut self, column: usize, row: usize) -> bool {
        let Some(pos) = self.bricks.get(column, row).map(|b| b.pos) else {
            return false;
        };
        if !self.bricks.break_cell(column, row) {
            return false;
        }

        self.score += 1;
        let geo = self.geometry;
        let center = Rect {
            pos,
            size: Vec2::new(geo.brick_width, geo.brick_height),
        }
        .center();
        self.debris
            .spawn(&mut self.rng, center, self.brick_color, &geo.scale);

        let progress = self.score as f32 / self.total_bricks().max(1) as f32;
        self.ball.speed_multiplier = 1.0 + progress * self.settings.max_speed_increase;
        true
    }

    /// Record that `count` bricks broke this tick, arming the Bravo banner
    /// when the previous break was recent enough
    pub fn register_breaks(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let window = self.settings.bravo_window as f64;
        if self
            .last_break_at
            .is_some_and(|last| self.elapsed - last < window)
        {
            self.bravo_timer = Some(self.settings.bravo_duration);
        }
        self.last_break_at = Some(self.elapsed);
    }

    /// Enter the won phase if every brick is gone. Returns true on victory.
    pub fn check_win(&mut self) -> bool {
        if self.phase != GamePhase::Playing || (self.score as usize) < self.total_bricks() {
            return false;
        }
        self.phase = GamePhase::Won;
        self.reset_timer = Some(self.settings.victory_delay);
        let geo = self.geometry;
        self.fireworks.start(
            &mut self.rng,
            self.settings.initial_rockets,
            geo.width,
            geo.height,
            &geo.scale,
        );
        log::info!("Victory! All {} bricks broken", self.total_bricks());
        true
    }

    /// The ball left through the bottom edge
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.reset_ball_and_paddle();
            self.ball.invincible = true;
            self.invincibility_timer = Some(self.settings.invincibility_duration);
            log::info!("Life lost, {} remaining", self.lives);
        } else {
            self.phase = GamePhase::GameOver;
            self.reset_timer = Some(self.settings.game_over_delay);
            log::info!("Game over with score {}", self.score);
        }
    }

    /// Run the countdowns; fires whatever expires
    pub fn update_timers(&mut self, dt: f32) {
        countdown(&mut self.bravo_timer, dt);
        if countdown(&mut self.invincibility_timer, dt) {
            self.ball.invincible = false;
        }
        if countdown(&mut self.reset_timer, dt) {
            self.reset();
        }
    }
}

/// Decrement a single-slot timer. Returns true the tick it expires.
fn countdown(timer: &mut Option<f32>, dt: f32) -> bool {
    match timer {
        Some(remaining) if *remaining > dt => {
            *remaining -= dt;
            false
        }
        Some(_) => {
            *timer = None;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), 800.0, 600.0, 42)
    }

    fn laid_out() -> GameState {
        let mut state = new_state();
        let geo = state.geometry;
        state.bricks.layout_positions(&geo);
        state
    }

    #[test]
    fn test_new_game() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.total_bricks(), 100);
        assert_eq!(state.seed, 42);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 570.0));
        assert_eq!(state.paddle.x, 325.0);
        assert!(state.ball.vel.y < 0.0, "served upward");
        assert_eq!(state.ball.speed_multiplier, 1.0);
    }

    #[test]
    fn test_paddle_move_clamps() {
        let mut paddle = Paddle {
            x: 10.0,
            width: 150.0,
            height: 10.0,
        };
        paddle.move_by(-50.0, 800.0);
        assert_eq!(paddle.x, 0.0);
        paddle.move_by(10_000.0, 800.0);
        assert_eq!(paddle.x, 650.0);
    }

    #[test]
    fn test_break_brick_scores_and_speeds_up() {
        let mut state = laid_out();
        assert!(state.break_brick(0, 0));
        assert_eq!(state.score, 1);
        assert_eq!(state.debris.len(), 5);
        assert!((state.ball.speed_multiplier - (1.0 + 0.01 * 0.85)).abs() < 1e-6);

        assert!(!state.break_brick(0, 0), "already broken");
        assert_eq!(state.score, 1);
        assert!(!state.break_brick(99, 0), "out of range");
    }

    #[test]
    fn test_multiplier_monotonic_then_reset() {
        let mut state = laid_out();
        let mut last = state.ball.speed_multiplier;
        for c in 0..20 {
            state.break_brick(c, 0);
            assert!(state.ball.speed_multiplier > last);
            last = state.ball.speed_multiplier;
        }
        state.reset();
        assert_eq!(state.ball.speed_multiplier, 1.0);
    }

    #[test]
    fn test_win_exactly_at_total() {
        let mut state = laid_out();
        let mut broken = 0;
        for c in 0..20 {
            for r in 0..5 {
                state.break_brick(c, r);
                broken += 1;
                let won = state.check_win();
                assert_eq!(won, broken == 100, "win at score {}", state.score);
            }
        }
        assert!(state.is_won());
        assert_eq!(state.fireworks.len(), 5);
        assert_eq!(state.reset_timer, Some(45.0));
    }

    #[test]
    fn test_three_bottom_outs_end_game() {
        let mut state = new_state();
        state.lose_life();
        assert_eq!(state.lives, 2);
        assert!(state.ball.invincible);
        assert_eq!(state.invincibility_timer, Some(5.0));
        assert!(state.is_active());

        state.lose_life();
        state.lose_life();
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.reset_timer, Some(2.0));

        state.update_timers(1.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        state.update_timers(1.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_invincibility_expires() {
        let mut state = new_state();
        state.lose_life();
        state.update_timers(4.5);
        assert!(state.ball.invincible);
        state.update_timers(0.5);
        assert!(!state.ball.invincible);
        assert_eq!(state.invincibility_timer, None);
    }

    #[test]
    fn test_second_life_loss_rearms_invincibility() {
        let mut state = new_state();
        state.lose_life();
        state.update_timers(4.0);
        state.lose_life();
        assert_eq!(state.invincibility_timer, Some(5.0));
    }

    #[test]
    fn test_first_break_never_bravo() {
        let mut state = new_state();
        state.register_breaks(1);
        assert!(!state.bravo_active());
        assert_eq!(state.last_break_at, Some(0.0));
    }

    #[test]
    fn test_slow_breaks_no_bravo() {
        let mut state = new_state();
        state.register_breaks(1);
        state.elapsed += 1.5;
        state.register_breaks(1);
        assert!(!state.bravo_active());
    }

    #[test]
    fn test_bravo_lasts_from_second_break() {
        let mut state = new_state();
        let dt = 0.25;
        let advance = |state: &mut GameState| {
            state.elapsed += dt as f64;
            state.update_timers(dt);
        };

        state.register_breaks(1);
        advance(&mut state);
        advance(&mut state);
        // 500ms later
        state.register_breaks(2);
        assert!(state.bravo_active());

        let mut clears = 0;
        let mut was_active = true;
        for step in 1..=10 {
            advance(&mut state);
            let active = state.bravo_active();
            if was_active && !active {
                clears += 1;
                assert_eq!(step, 6, "clears 1500ms after the second break");
            }
            if step < 6 {
                assert!(active, "still active at +{}ms", step * 250);
            }
            was_active = active;
        }
        assert_eq!(clears, 1);
    }

    #[test]
    fn test_bravo_rearm_supersedes() {
        let mut state = new_state();
        state.register_breaks(1);
        state.elapsed += 0.5;
        state.register_breaks(1);
        state.elapsed += 0.75;
        state.update_timers(0.75);
        assert_eq!(state.bravo_timer, Some(0.75));
        state.register_breaks(1);
        assert_eq!(state.bravo_timer, Some(1.5));
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = laid_out();
        state.break_brick(3, 3);
        state.register_breaks(1);
        state.lose_life();
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.active_count(), 100);
        assert!(state.debris.is_empty());
        assert!(!state.ball.invincible);
        assert_eq!(state.invincibility_timer, None);
        assert_eq!(state.last_break_at, None);
        assert!(state.is_active());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut state = new_state();
        state.resize(1024.0, 768.0);
        let first = state.geometry;
        let ball = state.ball.clone();
        state.resize(1024.0, 768.0);
        assert_eq!(state.geometry, first);
        assert_eq!(state.ball.pos, ball.pos);
        assert_eq!(state.ball.vel.x, ball.vel.x);
        assert_eq!(state.ball.vel.y, -ball.vel.y);
    }

    #[test]
    fn test_resize_reverses_vertical_direction_and_recenters() {
        let mut state = new_state();
        state.ball.vel = Vec2::new(2.0, 2.0);
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.resize(800.0, 600.0);
        assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));

        state.ball.vel = Vec2::new(-2.0, -2.0);
        state.resize(400.0, 300.0);
        assert_eq!(state.ball.vel, Vec2::new(-1.0, 1.0));
        assert_eq!(state.ball.pos, state.geometry.ball_spawn());
        assert_eq!(state.paddle.width, 75.0);
    }

    #[test]
    fn test_resize_caps_speed_but_respawn_does_not() {
        let mut state = GameState::new(Settings::default(), 4000.0, 600.0, 1);
        state.ball.vel = Vec2::new(3.0, 3.0);
        state.resize(4000.0, 600.0);
        // Width ratio 5 is capped at 2 on resize
        assert_eq!(state.ball.vel, Vec2::new(4.0, -2.0));

        state.lose_life();
        assert_eq!(state.ball.vel, Vec2::new(10.0, -2.0));
        assert_eq!(state.ball.speed_multiplier, 1.0);
    }

    #[test]
    fn test_resize_while_won_keeps_in_bounds() {
        let mut state = new_state();
        state.phase = GamePhase::Won;
        state.ball.pos = Vec2::new(790.0, 590.0);
        state.paddle.x = 650.0;
        state.resize(400.0, 300.0);
        assert!(state.ball.pos.x <= 400.0 - state.ball.radius);
        assert!(state.ball.pos.y <= 300.0);
        assert!(state.paddle.x + state.paddle.width <= 400.0);
    }

    proptest! {
        #[test]
        fn prop_multiplier_bounded_and_monotonic(
            cells in prop::collection::vec((0usize..20, 0usize..5), 0..200)
        ) {
            let mut state = laid_out();
            let max = 1.0 + state.settings.max_speed_increase;
            let mut last = state.ball.speed_multiplier;
            prop_assert_eq!(last, 1.0);

            for (c, r) in cells {
                let score = state.score;
                let broke = state.break_brick(c, r);
                let mult = state.ball.speed_multiplier;
                prop_assert!((1.0..=max + 1e-6).contains(&mult), "{} out of range", mult);
                if broke {
                    prop_assert_eq!(state.score, score + 1);
                    prop_assert!(mult > last);
                } else {
                    prop_assert_eq!(mult, last);
                }
                last = mult;
            }
        }
    }
}
