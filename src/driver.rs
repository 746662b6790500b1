//! Frame driver
//!
//! Called once per display refresh by the host. Owns nothing but the time
//! cursor: it measures elapsed real time, lets the game fire due transitions,
//! steps the simulation while running, and always renders.

use crate::consts::MAX_FRAME_DT;
use crate::sim::{Game, GameEvent, Snapshot, TickInput, sanitize_dt};

/// Draws a frame from a read-only snapshot
pub trait Renderer {
    fn render(&mut self, frame: &Snapshot<'_>);
}

/// Renderer that draws nothing (headless runs and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Snapshot<'_>) {}
}

/// Per-frame orchestration of a [`Game`]
#[derive(Debug, Default, Clone)]
pub struct FrameDriver {
    /// Timestamp (seconds) of the previous frame
    last_time: Option<f64>,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the previous timestamp, e.g. after the host was suspended
    ///
    /// The next frame then counts as zero elapsed time.
    pub fn reset_clock(&mut self) {
        self.last_time = None;
    }

    /// Drive one frame at host time `now` (seconds)
    ///
    /// Returns the simulation events produced this frame.
    pub fn frame<R: Renderer + ?Sized>(
        &mut self,
        now: f64,
        game: &mut Game,
        input: &TickInput,
        renderer: &mut R,
    ) -> Vec<GameEvent> {
        let elapsed = match self.last_time {
            Some(last) => now - last,
            None => 0.0,
        };
        if now.is_finite() {
            self.last_time = Some(now);
        }
        let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed
        } else {
            0.0
        };

        // Timers run on real time; the physics step is clamped
        game.advance_clock(elapsed);
        let dt = sanitize_dt(elapsed as f32);
        debug_assert!(dt <= MAX_FRAME_DT);

        let events = if game.is_running() {
            game.step(dt, input)
        } else {
            Vec::new()
        };

        renderer.render(&game.snapshot());
        self.frames += 1;
        events
    }
}
