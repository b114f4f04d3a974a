//! Frame driver
//!
//! Hosts call [`FrameDriver::frame`] once per display refresh with the real
//! time since the previous call. The driver turns that into whole simulation
//! ticks at a fixed rate, then draws once.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Canvas, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Owns the game state and the fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: GameState,
    accumulator: f32,
}

impl FrameDriver {
    pub fn new(settings: Settings, width: f32, height: f32, seed: u64) -> Self {
        log::info!("Starting {width}x{height} game with seed {seed}");
        Self {
            state: GameState::new(settings, width, height, seed),
            accumulator: 0.0,
        }
    }

    /// Surface size changed; all geometry is recomputed immediately
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Advance by `elapsed` seconds of real time and draw the result.
    /// Returns the number of ticks run.
    pub fn frame<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        input: &TickInput,
        elapsed: f32,
    ) -> u32 {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop whatever the substep cap left over instead of spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        draw_frame(&self.state, canvas);
        substeps
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
