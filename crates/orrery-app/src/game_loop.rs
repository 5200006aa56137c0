//! Fixed-timestep loop: simulation at 60 Hz, rendering once per redraw.

use std::time::Instant;
use tracing::warn;

/// Simulation step in seconds.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame fed to the accumulator; anything slower runs in slow motion
/// instead of piling up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Measure the time since the last call and advance by it.
    ///
    /// `update(dt)` runs zero or more times with [`FIXED_DT`]. Returns the
    /// seconds elapsed since the previous frame, after clamping.
    pub fn tick(&mut self, update: impl FnMut(f64)) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time, update)
    }

    /// Drop all progress and start timing from now.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Advance by an explicit frame time.
    pub fn advance(&mut self, frame_time: f64, mut update: impl FnMut(f64)) -> f64 {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update(FIXED_DT);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }
        self.frame_count += 1;
        frame_time
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    #[cfg(test)]
    fn alpha(&self) -> f64 {
        self.accumulator / FIXED_DT
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
