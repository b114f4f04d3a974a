//! Scene drawing
//!
//! Turns a [`GameState`] into canvas calls. Back to front: background,
//! bricks, debris, ball, paddle, HUD, phase banner, fireworks, Bravo.

use glam::Vec2;

use super::canvas::{Canvas, TextAlign};
use crate::color::Color;
use crate::consts::*;
use crate::sim::{GamePhase, GameState, Rect, Rocket};

/// Color shared by the ball, the paddle and the HUD
const ACCENT: Color = Color::BLUE;

/// Draw one complete frame
pub fn draw_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let full = Rect::new(0.0, 0.0, canvas.width(), canvas.height());
    canvas.set_global_alpha(1.0);

    if state.is_won() {
        canvas.fill_rect(full, Color::BLACK);
        draw_fireworks(state, canvas);
        draw_banner(state, canvas, "You won!", BANNER_FONT_SIZE, Color::GREEN);
    } else {
        canvas.clear(full);
        draw_bricks(state, canvas);
        draw_debris(state, canvas);
        if !state.ball_hidden() {
            canvas.fill_circle(state.ball.pos, state.ball.radius, ACCENT, 1.0);
        }
        canvas.fill_rect(state.paddle.rect(state.geometry.height), ACCENT);
        draw_hud(state, canvas);
        if state.phase == GamePhase::GameOver {
            draw_banner(state, canvas, "Game Over", BANNER_FONT_SIZE, Color::RED);
        }
    }

    if state.bravo_active() {
        draw_banner(state, canvas, "Bravo!", BRAVO_FONT_SIZE, Color::GOLD);
    }
}

fn draw_bricks<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let geo = &state.geometry;
    for (_, _, brick) in state.bricks.active() {
        let rect = Rect::new(brick.pos.x, brick.pos.y, geo.brick_width, geo.brick_height);
        canvas.fill_rect(rect, state.brick_color);
    }
}

fn draw_debris<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    for p in state.debris.particles() {
        canvas.fill_circle(p.pos, p.size, p.color, p.alpha);
    }
}

fn draw_hud<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let scale = &state.geometry.scale;
    let font_size = HUD_FONT_SIZE * scale.min_ratio();
    let y = 15.0 * scale.height_ratio;

    canvas.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(8.0 * scale.width_ratio, y),
        font_size,
        ACCENT,
        TextAlign::Start,
    );
    canvas.fill_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(state.geometry.width - 80.0 * scale.width_ratio, y),
        font_size,
        ACCENT,
        TextAlign::Start,
    );
}

/// Centered message
fn draw_banner<C: Canvas + ?Sized>(
    state: &GameState,
    canvas: &mut C,
    text: &str,
    base_size: f32,
    color: Color,
) {
    let geo = &state.geometry;
    canvas.fill_text(
        text,
        Vec2::new(geo.width / 2.0, geo.height / 2.0),
        base_size * geo.scale.min_ratio(),
        color,
        TextAlign::Center,
    );
}

fn draw_fireworks<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let size_ratio = state.geometry.scale.min_ratio();
    for rocket in state.fireworks.rockets() {
        draw_rocket(rocket, size_ratio, canvas);
    }
}

fn draw_rocket<C: Canvas + ?Sized>(rocket: &Rocket, size_ratio: f32, canvas: &mut C) {
    if !rocket.is_exploded() {
        canvas.fill_circle(rocket.pos, 2.0 * size_ratio, Color::WHITE, 1.0);
        return;
    }

    if rocket.flash_time > 0.0 {
        canvas.fill_circle(
            rocket.pos,
            WHITE_FLASH_RADIUS * 1.2 * size_ratio,
            Color::WHITE,
            rocket.flash_alpha(),
        );
    }

    for spark in &rocket.sparks {
        canvas.set_global_alpha(spark.alpha);
        canvas.fill_circle(spark.pos, spark.size * size_ratio, spark.color, 1.0);
    }
    canvas.set_global_alpha(1.0);

    for p in &rocket.bursts {
        canvas.fill_circle(p.pos, p.size, p.color, p.alpha);
    }
}
