//! Brick Breaker - headless entry point
//!
//! Runs an autoplay session against a recording canvas and logs how it went.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use brick_breaker::consts::SIM_DT;
use brick_breaker::renderer::DrawList;
use brick_breaker::sim::{GamePhase, TickInput};
use brick_breaker::{FrameDriver, Settings};

const DEFAULT_FRAMES: u64 = 60 * 60;
const SURFACE_WIDTH: f32 = 800.0;
const SURFACE_HEIGHT: f32 = 600.0;

/// Brick Breaker - headless autoplay
#[derive(Parser)]
#[command(name = "brick-breaker")]
#[command(about = "Play a brick-breaker game against itself and report the outcome", long_about = None)]
struct Cli {
    /// JSON settings file (missing fields keep their defaults)
    settings: Option<PathBuf>,

    /// Frames to run at 60 per second
    #[arg(default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Write the last frame's draw commands to this JSON file
    dump: Option<PathBuf>,

    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Brick Breaker (headless) starting...");

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if let Ok(json) = settings.to_json() {
        log::debug!("Effective settings: {json}");
    }

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut driver = FrameDriver::new(settings, SURFACE_WIDTH, SURFACE_HEIGHT, seed);
    let mut canvas = DrawList::new(SURFACE_WIDTH, SURFACE_HEIGHT);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut last_phase = driver.state().phase;
    let mut games_won = 0u32;
    let mut games_lost = 0u32;
    let mut best_score = 0u32;

    for _ in 0..cli.frames {
        canvas.reset();
        driver.frame(&mut canvas, &input, SIM_DT);

        let state = driver.state();
        best_score = best_score.max(state.score);
        if state.phase != last_phase {
            match state.phase {
                GamePhase::Won => games_won += 1,
                GamePhase::GameOver => games_lost += 1,
                GamePhase::Playing => {}
            }
            last_phase = state.phase;
        }
    }

    let state = driver.state();
    log::info!(
        "Ran {} ticks: won {}, lost {}, best score {}",
        state.time_ticks,
        games_won,
        games_lost,
        best_score
    );
    log::info!(
        "Final frame: {:?}, score {}, lives {}, {} draw commands",
        state.phase,
        state.score,
        state.lives,
        canvas.len()
    );

    if let Some(path) = &cli.dump {
        match serde_json::to_string_pretty(&canvas) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Wrote last frame to {}", path.display()),
                Err(e) => log::warn!("Failed to write {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to serialize last frame: {e}"),
        }
    }
}
